use super::media::Media;
use serde::{Deserialize, Serialize};

/// Aggregate of user ratings for one media.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingStats {
    /// `None` when nobody rated yet.
    pub average: Option<f64>,
    pub count: i64,
}

impl RatingStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_sum(count: i64, sum: Option<i64>) -> Self {
        let average = match (count, sum) {
            (0, _) | (_, None) => None,
            (count, Some(sum)) => Some(sum as f64 / count as f64),
        };
        Self { average, count }
    }
}

/// Rating block shown next to a media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: i64,
    /// Community average, or the editorial rating while nobody rated.
    pub display_rating: Option<f64>,
}

impl RatingSummary {
    #[must_use]
    pub fn new(stats: RatingStats, editorial: Option<f64>) -> Self {
        Self {
            average: stats.average,
            count: stats.count,
            display_rating: stats.average.or(editorial),
        }
    }
}

/// What the signed-in viewer has already done with a media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewerState {
    pub is_favorite: bool,
    pub is_watched: bool,
    pub user_rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteEntry {
    pub media: Media,
    pub added_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub media: Media,
    pub watched_at: String,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_average_from_aggregate() {
        let stats = RatingStats::from_sum(2, Some(17));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average, Some(8.5));

        assert_eq!(RatingStats::from_sum(0, None).average, None);
    }

    #[test]
    fn display_rating_falls_back_to_editorial() {
        let unrated = RatingSummary::new(RatingStats::from_sum(0, None), Some(7.4));
        assert_eq!(unrated.display_rating, Some(7.4));

        let rated = RatingSummary::new(RatingStats::from_sum(2, Some(17)), Some(7.4));
        assert_eq!(rated.display_rating, Some(8.5));
    }
}
