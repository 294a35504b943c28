//! Message delivery to the configured Telegram chat.

use teloxide::prelude::*;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;

/// Delivery seam between the poll loop and Telegram.
///
/// The poll loop is generic over this trait so its decision logic can be
/// exercised without a live bot.
pub trait Notify {
    /// Deliver `text` to the configured chat. Never retried.
    fn notify(&self, text: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Real notifier backed by the Telegram Bot API.
///
/// The `teloxide::Bot` is constructed once at startup and held for the life
/// of the process.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Build the notifier from the relay configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            bot: Bot::new(&config.telegram_token),
            chat_id: config.chat_id,
        }
    }
}

impl Notify for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<()> {
        match self.bot.send_message(self.chat_id, text).await {
            Ok(_) => {
                info!(chat_id = %self.chat_id, "notification sent");
                Ok(())
            }
            Err(e) => {
                warn!(chat_id = %self.chat_id, error = %e, "failed to send notification");
                Err(e.into())
            }
        }
    }
}
