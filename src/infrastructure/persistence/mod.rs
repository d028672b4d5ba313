//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Schema lives in `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Transactional link creation and owner-scoped access
//! - [`PgUsageRepository`] - Usage events and the per-URL aggregation query
//! - [`PgUserRepository`] - User accounts

pub mod pg_link_repository;
pub mod pg_usage_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_usage_repository::PgUsageRepository;
pub use pg_user_repository::PgUserRepository;
