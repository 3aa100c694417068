use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use tokio::task;

use crate::config::SecurityConfig;
use crate::domain::{UserId, now_timestamp};
use crate::entities::{profiles, users};
use crate::models::user::{Credentials, Profile};

impl From<profiles::Model> for Profile {
    fn from(model: profiles::Model) -> Self {
        Self {
            id: UserId::from(model.id),
            username: model.username,
            is_admin: model.is_admin,
            created_at: model.created_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Creates the credentials row and the profile row together.
    pub async fn create_with_profile(
        &self,
        email: &str,
        password_hash: String,
        username: &str,
    ) -> Result<Profile> {
        let id = UserId::generate();
        let now = now_timestamp();

        let txn = self.conn.begin().await?;

        users::ActiveModel {
            id: Set(id.value()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        }
        .insert(&txn)
        .await
        .context("Failed to insert user")?;

        let profile = profiles::ActiveModel {
            id: Set(id.value()),
            username: Set(username.to_string()),
            is_admin: Set(false),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .context("Failed to insert profile")?;

        txn.commit().await?;

        Ok(Profile::from(profile))
    }

    pub async fn get_credentials(&self, email: &str) -> Result<Option<Credentials>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(|u| Credentials {
            id: UserId::from(u.id),
            email: u.email,
            password_hash: u.password_hash,
        }))
    }

    pub async fn get_profile(&self, id: UserId) -> Result<Option<Profile>> {
        let profile = profiles::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query profile by ID")?;

        Ok(profile.map(Profile::from))
    }

    /// Returns false when no account uses `email`.
    pub async fn set_admin(&self, email: &str, is_admin: bool) -> Result<bool> {
        let Some(credentials) = self.get_credentials(email).await? else {
            return Ok(false);
        };

        let Some(profile) = profiles::Entity::find_by_id(credentials.id.value())
            .one(&self.conn)
            .await?
        else {
            return Ok(false);
        };

        let mut active: profiles::ActiveModel = profile.into();
        active.is_admin = Set(is_admin);
        active.updated_at = Set(now_timestamp());
        active.update(&self.conn).await?;

        Ok(true)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(users::Entity::find().count(&self.conn).await?)
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the argon2 crate defaults.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC string on the blocking pool.
pub async fn verify_password(password_hash: String, password: &str) -> Result<bool> {
    let password = password.to_string();

    task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

        Ok::<bool, anyhow::Error>(
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await
    .context("Password verification task panicked")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_verify_with_configured_params() {
        let config = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        };
        let hash = hash_password("correct horse", Some(&config)).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_password(hash.clone(), "correct horse").await.unwrap());
        assert!(!verify_password(hash, "battery staple").await.unwrap());
    }
}
