//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::repositories::user::{hash_password, verify_password};
use crate::db::{ConstraintViolation, Store, constraint_violation};
use crate::domain::UserId;
use crate::models::user::Profile;
use crate::services::auth_service::{AuthError, AuthService, SignupRequest};
use async_trait::async_trait;
use tracing::{info, warn};

const DUPLICATE_EMAIL: &str = "An account already exists for this email";

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

/// Lower-cases and checks the address has a local part and a domain.
fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::Validation("Invalid email address".to_string())),
    }
}

fn default_username(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn signup(&self, request: SignupRequest) -> Result<Profile, AuthError> {
        let email = normalize_email(&request.email)?;

        if request.password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        let username = request
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| default_username(&email));

        if self.store.get_credentials(&email).await?.is_some() {
            return Err(AuthError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let security = self.security.clone();
        let password = request.password;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, Some(&security)))
                .await
                .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))??;

        let profile = self
            .store
            .create_user_with_profile(&email, password_hash, &username)
            .await
            .map_err(|err| match constraint_violation(&err) {
                Some(ConstraintViolation::Unique(_)) => {
                    AuthError::Conflict(DUPLICATE_EMAIL.to_string())
                }
                _ => AuthError::from(err),
            })?;

        info!(user_id = %profile.id, username = %profile.username, "Account created");
        Ok(profile)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        let email = email.trim().to_lowercase();

        let Some(credentials) = self.store.get_credentials(&email).await? else {
            warn!("Login attempt for unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(credentials.password_hash, password).await? {
            warn!(user_id = %credentials.id, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.store
            .get_profile(credentials.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn current_user(&self, id: UserId) -> Result<Profile, AuthError> {
        self.store
            .get_profile(id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
