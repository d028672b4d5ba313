//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI one entry point per operation.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution and deletion
//! - [`services::usage_recorder::UsageRecorder`] - Non-blocking usage event enqueueing
//! - [`services::redirect_service::RedirectService`] - Resolve-and-record for redirects
//! - [`services::stats_service::StatsService`] - Top domains and usage graph reports
//! - [`services::user_service::UserService`] - Registration and credential checking

pub mod services;
