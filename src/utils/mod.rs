//! Utility functions for short code derivation and URL processing.
//!
//! - [`code_generator`] - Base-36 short codes from link ids
//! - [`url_validator`] - Absolute-URL validation and host extraction

pub mod code_generator;
pub mod url_validator;
