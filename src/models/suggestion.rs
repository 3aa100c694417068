use crate::domain::{MediaKind, SuggestionId, SuggestionStatus, UserId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub user_id: UserId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub external_link: Option<String>,
    pub votes: i32,
    pub status: SuggestionStatus,
    /// Username of the author, when the profile still exists.
    pub author: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionDraft {
    pub title: String,
    pub kind: MediaKind,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub external_link: Option<String>,
}

/// Outcome of a vote toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteState {
    pub voted: bool,
    pub votes: i32,
}
