//! Submitted forms and their validation into write-ready drafts.
//!
//! Every check runs before the store is touched. Numeric fields accept JSON
//! numbers as well as numeric strings, and blank strings mean "not set".

use crate::domain::slug::{is_valid_slug, slugify};
use crate::domain::{CategoryId, MediaKind, MediaStatus};
use crate::models::media::{MediaDraft, MediaVariant};
use crate::models::season::{EpisodeDraft, SeasonDraft};
use crate::models::suggestion::SuggestionDraft;
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FormError(pub String);

impl FormError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A form field that may arrive as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    fn as_number(&self, field: &str) -> Result<Option<f64>, FormError> {
        match self {
            Self::Number(n) => Ok(Some(*n)),
            Self::Text(s) if s.trim().is_empty() => Ok(None),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| FormError::new(format!("{field} must be a number"))),
        }
    }
}

impl From<i32> for FormValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

fn optional_float(
    field: &str,
    value: Option<&FormValue>,
    range: std::ops::RangeInclusive<f64>,
) -> Result<Option<f64>, FormError> {
    let Some(n) = value.map(|v| v.as_number(field)).transpose()?.flatten() else {
        return Ok(None);
    };

    if !n.is_finite() || !range.contains(&n) {
        return Err(FormError::new(format!(
            "{field} must be between {} and {}",
            range.start(),
            range.end()
        )));
    }

    Ok(Some(n))
}

#[allow(clippy::cast_possible_truncation)]
fn optional_int(
    field: &str,
    value: Option<&FormValue>,
    min: i32,
    max: i32,
) -> Result<Option<i32>, FormError> {
    let Some(n) = value.map(|v| v.as_number(field)).transpose()?.flatten() else {
        return Ok(None);
    };

    if n.fract() != 0.0 {
        return Err(FormError::new(format!("{field} must be a whole number")));
    }

    if n < f64::from(min) || n > f64::from(max) {
        return Err(FormError::new(if max == i32::MAX {
            format!("{field} must be at least {min}")
        } else {
            format!("{field} must be between {min} and {max}")
        }));
    }

    Ok(Some(n as i32))
}

fn required_int(field: &str, value: Option<&FormValue>, min: i32) -> Result<i32, FormError> {
    optional_int(field, value, min, i32::MAX)?
        .ok_or_else(|| FormError::new(format!("{field} is required")))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required_text(field: &str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::new(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Blank means unset; anything else must be an absolute http(s) URL.
fn optional_url(field: &str, value: Option<String>) -> Result<Option<String>, FormError> {
    let Some(raw) = optional_text(value) else {
        return Ok(None);
    };

    match url::Url::parse(&raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(Some(raw)),
        _ => Err(FormError::new(format!("{field} must be a valid URL"))),
    }
}

fn required_url(field: &str, value: Option<String>) -> Result<String, FormError> {
    optional_url(field, value)?.ok_or_else(|| FormError::new(format!("{field} is required")))
}

fn optional_date(field: &str, value: Option<String>) -> Result<Option<String>, FormError> {
    let Some(raw) = optional_text(value) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|_| Some(raw))
        .map_err(|_| FormError::new(format!("{field} must be a YYYY-MM-DD date")))
}

// ============================================================================
// Media
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MediaInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub embed_url: Option<String>,
    pub year: Option<FormValue>,
    pub rating: Option<FormValue>,
    pub duration: Option<FormValue>,
    #[serde(default)]
    pub status: MediaStatus,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
}

impl MediaInput {
    pub fn validate(self) -> Result<MediaDraft, FormError> {
        let title = required_text("title", &self.title)?;

        let slug = self.slug.trim().to_string();
        if slug.is_empty() {
            return Err(FormError::new("slug is required"));
        }
        if !is_valid_slug(&slug) {
            return Err(FormError::new(
                "slug may only contain lowercase letters, digits and single hyphens",
            ));
        }

        let variant = match self.kind {
            MediaKind::Movie => MediaVariant::Movie {
                embed_url: Some(required_url("embed_url", self.embed_url)?),
                duration: optional_int("duration", self.duration.as_ref(), 1, i32::MAX)?,
            },
            MediaKind::Series => MediaVariant::Series,
        };

        let mut category_ids = self.categories;
        category_ids.sort_unstable();
        category_ids.dedup();
        if category_ids.is_empty() {
            return Err(FormError::new("at least one category is required"));
        }

        Ok(MediaDraft {
            title,
            slug,
            description: optional_text(self.description),
            poster_url: optional_url("poster_url", self.poster_url)?,
            backdrop_url: optional_url("backdrop_url", self.backdrop_url)?,
            variant,
            year: optional_int("year", self.year.as_ref(), 1900, 2100)?,
            rating: optional_float("rating", self.rating.as_ref(), 0.0..=10.0)?,
            status: self.status,
            category_ids,
        })
    }
}

// ============================================================================
// Seasons & episodes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonInput {
    pub season_number: Option<FormValue>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
}

impl SeasonInput {
    pub fn validate(self) -> Result<SeasonDraft, FormError> {
        Ok(SeasonDraft {
            season_number: required_int("season_number", self.season_number.as_ref(), 1)?,
            title: optional_text(self.title),
            description: optional_text(self.description),
            poster_url: optional_url("poster_url", self.poster_url)?,
            release_date: optional_date("release_date", self.release_date)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeInput {
    pub episode_number: Option<FormValue>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub embed_url: Option<String>,
    pub duration: Option<FormValue>,
    pub thumbnail_url: Option<String>,
    pub release_date: Option<String>,
}

impl EpisodeInput {
    pub fn validate(self) -> Result<EpisodeDraft, FormError> {
        Ok(EpisodeDraft {
            episode_number: required_int("episode_number", self.episode_number.as_ref(), 1)?,
            title: required_text("title", &self.title)?,
            description: optional_text(self.description),
            embed_url: required_url("embed_url", self.embed_url)?,
            duration: optional_int("duration", self.duration.as_ref(), 1, i32::MAX)?,
            thumbnail_url: optional_url("thumbnail_url", self.thumbnail_url)?,
            release_date: optional_date("release_date", self.release_date)?,
        })
    }
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
}

impl CategoryInput {
    /// Returns the trimmed name and the derived slug. A supplied slug is
    /// normalised through the same derivation.
    pub fn validate(self) -> Result<(String, String), FormError> {
        let name = required_text("name", &self.name)?;
        let source = optional_text(self.slug).unwrap_or_else(|| name.clone());
        let slug = slugify(&source);
        if slug.is_empty() {
            return Err(FormError::new("name must contain at least one letter or digit"));
        }
        Ok((name, slug))
    }
}

// ============================================================================
// Suggestions & ratings
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionInput {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub description: Option<String>,
    pub year: Option<FormValue>,
    #[serde(alias = "imdb_link")]
    pub external_link: Option<String>,
}

impl SuggestionInput {
    pub fn validate(self) -> Result<SuggestionDraft, FormError> {
        let max_year = Utc::now().year() + 1;

        Ok(SuggestionDraft {
            title: required_text("title", &self.title)?,
            kind: self.kind,
            description: optional_text(self.description),
            year: optional_int("year", self.year.as_ref(), 1900, max_year)?,
            external_link: optional_url("external_link", self.external_link)?,
        })
    }
}

/// A user rating must be a whole number from 1 to 10.
pub fn validate_rating(value: &FormValue) -> Result<i32, FormError> {
    optional_int("rating", Some(value), 1, 10)?.ok_or_else(|| FormError::new("rating is required"))
}
