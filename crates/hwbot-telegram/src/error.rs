//! Error types for the notification relay.

use thiserror::Error;

/// Errors that can occur in the relay.
///
/// `MissingVar` and `BadChatId` only happen at startup and are fatal;
/// everything else is absorbed at the poll-loop boundary.
#[derive(Debug, Error)]
pub enum BotError {
    /// A required environment variable is absent or empty.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// The configured chat id is not a valid Telegram chat identifier.
    #[error("TELEGRAM_CHAT_ID is not a valid chat id: {0:?}")]
    BadChatId(String),

    /// Review API failure, one per poll cycle at most.
    #[error(transparent)]
    Api(#[from] hwbot_api::ApiError),

    /// The bot transport rejected a send.
    #[error("message delivery failed: {0}")]
    Delivery(#[from] teloxide::RequestError),
}

/// Result type for relay operations.
pub type Result<T> = std::result::Result<T, BotError>;
