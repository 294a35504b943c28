//! Relay configuration.
//!
//! Built once at startup from environment variables and handed to the poll
//! loop by value; there is no process-wide configuration state.

use std::time::Duration;

use teloxide::types::ChatId;

use crate::error::{BotError, Result};

/// Environment variable holding the review API OAuth token.
pub const PRACTICUM_TOKEN_ENV: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the target chat id.
pub const TELEGRAM_CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Default delay between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Configuration for the relay, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the review API.
    pub practicum_token: String,
    /// Bot token from @BotFather.
    pub telegram_token: String,
    /// The single chat all notifications go to.
    pub chat_id: ChatId,
    /// Delay between poll cycles.
    pub poll_interval: Duration,
}

impl Config {
    /// Load the configuration from environment variables.
    ///
    /// All three credentials must be present and non-empty; the chat id must
    /// parse as a signed integer. Any violation is fatal at startup.
    pub fn from_env() -> Result<Self> {
        Self::build(
            require(PRACTICUM_TOKEN_ENV)?,
            require(TELEGRAM_TOKEN_ENV)?,
            &require(TELEGRAM_CHAT_ID_ENV)?,
        )
    }

    /// Assemble and check a configuration from raw credential strings.
    pub fn build(
        practicum_token: String,
        telegram_token: String,
        chat_id: &str,
    ) -> Result<Self> {
        if practicum_token.trim().is_empty() {
            return Err(BotError::MissingVar(PRACTICUM_TOKEN_ENV));
        }
        if telegram_token.trim().is_empty() {
            return Err(BotError::MissingVar(TELEGRAM_TOKEN_ENV));
        }

        let chat_id = chat_id
            .parse::<i64>()
            .map_err(|_| BotError::BadChatId(chat_id.to_string()))?;

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id: ChatId(chat_id),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

fn require(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BotError::MissingVar(name)),
    }
}
