use crate::domain::duration::format_duration;
use crate::domain::{EpisodeId, MediaId, SeasonId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub media_id: MediaId,
    pub season_number: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub season_id: SeasonId,
    pub episode_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub embed_url: String,
    pub duration: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub release_date: Option<String>,
    pub created_at: String,
}

impl Episode {
    #[must_use]
    pub fn duration_label(&self) -> Option<String> {
        self.duration.map(format_duration)
    }
}

/// A season with its episodes in `episode_number` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonWithEpisodes {
    #[serde(flatten)]
    pub season: Season,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonDraft {
    pub season_number: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeDraft {
    pub episode_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub embed_url: String,
    pub duration: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub release_date: Option<String>,
}
