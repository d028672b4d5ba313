//! User entity.

use chrono::{DateTime, Utc};

/// An account that owns links.
///
/// Only the keyed hash of the password is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: i64, name: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            password_hash,
            created_at,
        }
    }
}

/// Input data for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub password_hash: String,
}
