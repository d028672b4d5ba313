//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer and the
//! redirect cache.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`memory`] - In-process storage backend
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod memory;
pub mod persistence;
