//! HTTP client for the homework review API.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{ApiError, Result};

/// Production endpoint for homework status queries.
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Upper bound on one polling request; a hung connection must not stall a
/// poll cycle indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the review API polling endpoint.
///
/// Holds the OAuth token and a pre-built `reqwest::Client`; cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    /// Create a client against the production endpoint.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (used by tests).
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        // Fails only on TLS backend or system configuration breakage,
        // which is unrecoverable at startup.
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to initialize HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// The endpoint this client queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework updates newer than `from_date`.
    ///
    /// Returns the decoded payload unmodified; shape checking is the job of
    /// [`crate::response::validate`]. Never retries; every failure is
    /// classified and propagated to the caller.
    pub async fn fetch(&self, from_date: i64) -> Result<Value> {
        debug!(endpoint = %self.endpoint, from_date, "polling review API");

        let response = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %self.endpoint, from_date, error = %e, "request failed");
                ApiError::Transport {
                    url: self.endpoint.clone(),
                    source: e,
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!(endpoint = %self.endpoint, from_date, %status, "unexpected status");
            return Err(ApiError::BadStatus {
                status,
                url: self.endpoint.clone(),
                from_date,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            error!(endpoint = %self.endpoint, from_date, error = %e, "undecodable body");
            ApiError::MalformedPayload {
                url: self.endpoint.clone(),
                source: e,
            }
        })
    }
}
