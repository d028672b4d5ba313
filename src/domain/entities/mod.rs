//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a full URL, owned by a user
//! - [`UsageEvent`] - One redirect through a link
//! - [`User`] - An account that owns links
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewLink`, `NewUsageEvent`, `NewUser` carry only what the caller supplies;
//! identifiers and timestamps are assigned by storage.

pub mod link;
pub mod usage;
pub mod user;

pub use link::{Link, NewLink};
pub use usage::{FullUrlUseCount, NewUsageEvent, UsageEvent};
pub use user::{NewUser, User};
