//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by a user.
///
/// `code` is the base-36 encoding of `id`. A `Link` value handed out by a
/// repository always carries its code; the code-less intermediate row only
/// exists inside the creating transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub full_url: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        full_url: String,
        owner_id: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            full_url,
            owner_id,
            created_at,
        }
    }

    /// Returns true if the link belongs to `user_id`.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a new link.
///
/// The full URL must already be validated as absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub owner_id: i64,
    pub full_url: String,
}
