//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence boundary of the service. Implementations
//! live in `crate::infrastructure`:
//!
//! - PostgreSQL: `crate::infrastructure::persistence`
//! - In-process: `crate::infrastructure::memory::MemoryStore`
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link creation, lookup and owner-scoped deletion
//! - [`UsageRepository`] - Usage event recording and analytics queries
//! - [`UserRepository`] - Account storage

pub mod link_repository;
pub mod usage_repository;
pub mod user_repository;

pub use link_repository::{CodeEncoder, LinkRepository};
pub use usage_repository::UsageRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use usage_repository::MockUsageRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
