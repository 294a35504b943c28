//! Client for the homework review API.
//!
//! This crate covers the data-source half of hwbot:
//! - `ApiClient` - issues the polling request and classifies transport failures
//! - `validate` - confirms the shape of a decoded payload
//! - `parse_status` - turns one homework record into a notification string
//!
//! The payload stays a `serde_json::Value` until `validate` has confirmed its
//! shape, so a malformed response can be reported precisely instead of
//! surfacing as an opaque deserialization error.
//!
//! # Example
//!
//! ```no_run
//! use hwbot_api::{ApiClient, validate, parse_status};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("oauth-token");
//!     let payload = client.fetch(0).await?;
//!     let (homeworks, cursor) = validate(payload)?;
//!     for record in &homeworks {
//!         println!("{}", parse_status(record)?);
//!     }
//!     println!("next cursor: {}", cursor);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod response;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use response::{parse_status, validate, verdict_for};
