//! Domain service for accounts.
//!
//! Handles sign-up, password sign-in and resolving the session user.

use crate::domain::UserId;
use crate::models::user::Profile;
use serde::Deserialize;
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates the account and its profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for a malformed email or a short
    /// password and [`AuthError::Conflict`] if the email is taken.
    async fn signup(&self, request: SignupRequest) -> Result<Profile, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<Profile, AuthError>;

    /// Resolves the profile behind a session.
    async fn current_user(&self, id: UserId) -> Result<Profile, AuthError>;
}
