//! Absolute-URL validation and host extraction.
//!
//! Links only ever point at absolute URLs; the same parser is used to pull the
//! host out of stored URLs when ranking domains.

use url::Url;

/// Errors that can occur while validating a full URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only absolute URLs are supported")]
    NotAbsolute,
}

/// Checks that `input` is an absolute URL: a non-empty scheme and a non-empty host.
///
/// The URL is not rewritten; callers keep storing the string they were given.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] if the input does not parse at all
/// (relative references such as `not-a-url` land here), and
/// [`UrlValidationError::NotAbsolute`] if it parses but has no host
/// (`mailto:`, `file:///tmp`, ...).
pub fn validate_absolute_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if url.scheme().is_empty() {
        return Err(UrlValidationError::NotAbsolute);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::NotAbsolute),
    }
}

/// Extracts the host portion of a stored full URL for domain ranking.
///
/// Keeps an explicit non-default port (`example.com:8080`), so the same host
/// on different ports is ranked separately. Returns `None` when the URL does
/// not parse or has no host.
pub fn url_host(full_url: &str) -> Option<String> {
    let url = Url::parse(full_url).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?;

    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
