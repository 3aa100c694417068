use serde::{Deserialize, Serialize};

use crate::domain::{MediaKind, MediaStatus, SuggestionSort, SuggestionStatus};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionListQuery {
    #[serde(rename = "type")]
    pub kind: Option<MediaKind>,
    #[serde(default)]
    pub sort: SuggestionSort,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaListQuery {
    #[serde(rename = "type")]
    pub kind: Option<MediaKind>,
    pub status: Option<MediaStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ModerationQuery {
    #[serde(default)]
    pub status: SuggestionStatus,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: SuggestionStatus,
}
