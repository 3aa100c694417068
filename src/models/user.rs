use crate::domain::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
    pub created_at: String,
}

/// Stored sign-in data. Never serialized.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
}
