//! Domain primitives for the catalog.
//!
//! Identifiers are newtypes over UUIDs so a `MediaId` can never be passed
//! where a `SeasonId` is expected. The enums here are the closed sets stored
//! as lower-case text columns.

pub mod duration;
pub mod slug;
pub mod trending;

use chrono::{Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn value(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a movie or series.
    MediaId
);
define_id!(CategoryId);
define_id!(SeasonId);
define_id!(EpisodeId);
define_id!(
    /// Identifier of an account. Users and profiles share it.
    UserId
);
define_id!(SuggestionId);

/// Error returned when a stored or submitted enum value is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            other => Err(ParseEnumError::new("media type", other)),
        }
    }
}

/// Publication state. Only `Published` media is visible on public pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl MediaStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(ParseEnumError::new("media status", other)),
        }
    }
}

/// Moderation state of a content suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Added,
}

impl SuggestionStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Added => "added",
        }
    }

    /// Allowed moves: a pending suggestion is approved or rejected, an
    /// approved one is marked added, and any decided suggestion can be
    /// reopened.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (*self, next),
            (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Added)
                | (Self::Approved | Self::Rejected | Self::Added, Self::Pending)
        )
    }
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "added" => Ok(Self::Added),
            other => Err(ParseEnumError::new("suggestion status", other)),
        }
    }
}

/// Ordering of the public suggestion board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSort {
    #[default]
    Votes,
    Recent,
}

/// Current time as a fixed-width RFC 3339 string, so text ordering matches
/// time ordering.
#[must_use]
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[must_use]
pub fn days_ago_timestamp(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_round_trips_through_text() {
        assert_eq!("movie".parse::<MediaKind>(), Ok(MediaKind::Movie));
        assert_eq!(MediaKind::Series.to_string(), "series");
        assert!("film".parse::<MediaKind>().is_err());
    }

    #[test]
    fn only_published_is_public() {
        assert!(MediaStatus::Published.is_public());
        assert!(!MediaStatus::Draft.is_public());
        assert!(!MediaStatus::Archived.is_public());
    }

    #[test]
    fn suggestion_transitions() {
        use SuggestionStatus::*;

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Added));
        assert!(Rejected.can_transition_to(Pending));
        assert!(Added.can_transition_to(Pending));

        assert!(!Pending.can_transition_to(Added));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Added));
        assert!(!Added.can_transition_to(Approved));
    }

    #[test]
    fn timestamps_are_fixed_width_and_ordered() {
        let earlier = days_ago_timestamp(1);
        let now = now_timestamp();
        assert_eq!(earlier.len(), now.len());
        assert!(earlier < now);
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn ids_serialize_as_plain_uuids() {
        let id = MediaId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: MediaId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
