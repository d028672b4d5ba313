//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Derives a short code from a freshly assigned link id.
pub type CodeEncoder = fn(u64) -> String;

/// Repository interface for managing links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a link and assigns its short code as one unit of work.
    ///
    /// The link row is inserted without a code, the storage-assigned id is
    /// passed to `encode`, and the resulting code is written back. No reader
    /// may observe the row between the two writes: implementations run both
    /// inside one transaction (or under one exclusive lock).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the derived code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink, encode: CodeEncoder) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by id, only if it is owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by `owner_id` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Deletes a link owned by `owner_id` together with all of its usage events.
    ///
    /// Returns the deleted link, or `Ok(None)` if no link with that id is
    /// owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_owned(&self, id: i64, owner_id: i64) -> Result<Option<Link>, AppError>;

    /// Counts all links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
