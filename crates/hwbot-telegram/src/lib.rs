//! Telegram notification relay for homework review statuses.
//!
//! This crate wires the review API client from `hwbot-api` to a single
//! Telegram chat: one poll loop, one cursor, one chat. It detects status
//! changes in submitted assignments and relays a human-readable sentence
//! per changed homework.
//!
//! # Environment Variables
//!
//! Required:
//! - `PRACTICUM_TOKEN`: OAuth token for the review API
//! - `TELEGRAM_TOKEN`: bot token from @BotFather
//! - `TELEGRAM_CHAT_ID`: numeric id of the chat that receives notifications
//!
//! A missing variable is fatal at startup; nothing else ever kills the loop.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use hwbot_api::ApiClient;
//! use hwbot_telegram::{Config, StatusPoller, TelegramNotifier};
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = ApiClient::new(&config.practicum_token);
//!     let notifier = TelegramNotifier::new(&config);
//!
//!     let (shutdown_tx, shutdown_rx) = watch::channel(false);
//!     let mut poller = StatusPoller::new(
//!         client,
//!         notifier,
//!         chrono::Utc::now().timestamp(),
//!         config.poll_interval,
//!         shutdown_rx,
//!     );
//!
//!     tokio::spawn(async move { poller.run().await });
//!     tokio::signal::ctrl_c().await?;
//!     shutdown_tx.send(true)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod notifier;
pub mod poller;

pub use config::Config;
pub use error::{BotError, Result};
pub use notifier::{Notify, TelegramNotifier};
pub use poller::StatusPoller;
