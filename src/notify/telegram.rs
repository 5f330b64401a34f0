//! Telegram Bot API delivery.

use teloxide::Bot;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, ParseMode, Recipient};
use thiserror::Error;
use tracing::debug;

use super::Notifier;
use crate::config::ChatTarget;

/// Errors delivering a message.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The Bot API rejected the request or could not be reached.
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Sends messages to a single chat with MarkdownV2 parsing.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    chat: ChatTarget,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat: ChatTarget) -> Self {
        TelegramNotifier { bot, chat }
    }
}

pub(crate) fn recipient(chat: &ChatTarget) -> Recipient {
    match chat {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Channel(name) => Recipient::ChannelUsername(name.clone()),
    }
}

impl Notifier for TelegramNotifier {
    type Error = DeliveryError;

    async fn deliver(&self, text: String) -> Result<(), Self::Error> {
        let message = self
            .bot
            .send_message(recipient(&self.chat), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
        debug!(chat = %self.chat, message_id = message.id.0, "Delivered message");
        Ok(())
    }
}
