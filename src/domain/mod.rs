//! Domain layer containing business entities and logic.
//!
//! Nothing in here knows about HTTP, PostgreSQL or Redis. Storage is reached
//! only through the repository traits, which `crate::infrastructure` implements.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`analytics`] - Pure aggregation of usage events into reports
//! - [`usage_worker`] - Asynchronous usage event persistence
//!
//! # Usage Recording Flow
//!
//! 1. The redirect handler resolves a code and answers immediately
//! 2. A [`entities::NewUsageEvent`] is pushed onto a bounded channel
//! 3. [`usage_worker::run_usage_worker`] persists it with retry
//! 4. Reports read the stored events via [`repositories::UsageRepository`]

pub mod analytics;
pub mod entities;
pub mod repositories;
pub mod usage_worker;
