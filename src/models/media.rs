use crate::domain::duration::format_duration;
use crate::domain::{CategoryId, MediaId, MediaKind, MediaStatus};
use serde::{Deserialize, Serialize};

/// Kind-specific attributes. A series never carries an embed URL or a
/// runtime; those live on its episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaVariant {
    Movie {
        embed_url: Option<String>,
        duration: Option<i32>,
    },
    Series,
}

impl MediaVariant {
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Movie { .. } => MediaKind::Movie,
            Self::Series => MediaKind::Series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    #[serde(flatten)]
    pub variant: MediaVariant,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub status: MediaStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Media {
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.variant.kind()
    }

    #[must_use]
    pub const fn duration(&self) -> Option<i32> {
        match self.variant {
            MediaVariant::Movie { duration, .. } => duration,
            MediaVariant::Series => None,
        }
    }

    #[must_use]
    pub fn duration_label(&self) -> Option<String> {
        self.duration().map(format_duration)
    }
}

/// Validated media form, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDraft {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub variant: MediaVariant,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub status: MediaStatus,
    pub category_ids: Vec<CategoryId>,
}

/// Filters of the admin media list.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaFilter {
    pub kind: Option<MediaKind>,
    pub status: Option<MediaStatus>,
}

/// A media with its derived display values, as listed on public pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaCard {
    #[serde(flatten)]
    pub media: Media,
    pub duration_label: Option<String>,
}

impl From<Media> for MediaCard {
    fn from(media: Media) -> Self {
        let duration_label = media.duration_label();
        Self {
            media,
            duration_label,
        }
    }
}

#[must_use]
pub fn cards(items: Vec<Media>) -> Vec<MediaCard> {
    items.into_iter().map(MediaCard::from).collect()
}
