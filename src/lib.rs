//! Linear Relay - forwards Linear webhooks to a Telegram chat.
//!
//! Deliveries are verified against the shared secret on their raw bytes,
//! checked for freshness, rendered as Telegram MarkdownV2 and sent to the
//! configured chat.

pub mod config;
pub mod message;
pub mod notify;
pub mod server;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
