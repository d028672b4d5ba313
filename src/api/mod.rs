//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and formats responses in the
//! `{"result": ...}` envelope.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extractors`] - JSON body extractor and the authenticated caller
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting and tracing
//! - [`routes`] - Route groups under `/v1`

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
