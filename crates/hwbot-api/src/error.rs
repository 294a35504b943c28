//! Error types for the review API client.

use thiserror::Error;

/// Errors that can occur while fetching or interpreting a review API response.
///
/// `Transport`, `BadStatus` and `MalformedPayload` come out of the HTTP
/// round-trip; the remaining variants are data-quality failures in an
/// otherwise successful response. None of them are fatal to the poll loop.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure: connection refused, timeout, DNS.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-200 status code.
    #[error("unexpected status {status} from {url} (from_date={from_date})")]
    BadStatus {
        status: reqwest::StatusCode,
        url: String,
        from_date: i64,
    },

    /// The response body could not be decoded as JSON.
    #[error("malformed payload from {url}: {source}")]
    MalformedPayload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The payload (or one of its fields) has the wrong JSON type.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// A required key is absent.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// A homework carries a status outside the known verdict set.
    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),
}

/// Result type for review API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
