//! Data Transfer Objects for API requests and responses.
//!
//! Every successful response is wrapped in [`envelope::ApiResponse`]; errors
//! use [`crate::error::ErrorBody`]. Request bodies are checked with
//! `validator`.

pub mod envelope;
pub mod health;
pub mod links;
pub mod stats;
pub mod users;
