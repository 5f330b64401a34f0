//! Delivering formatted messages to Telegram.
//!
//! The HTTP layer talks to a [`Notifier`] rather than to Telegram directly,
//! so tests can record deliveries instead of sending them.

use std::future::Future;

pub mod commands;
pub mod telegram;

pub use telegram::{DeliveryError, TelegramNotifier};

/// Sends a formatted message to the configured chat.
///
/// # Example (recorder for testing)
///
/// ```ignore
/// struct Recorder(Mutex<Vec<String>>);
///
/// impl Notifier for Recorder {
///     type Error = std::convert::Infallible;
///
///     async fn deliver(&self, text: String) -> Result<(), Self::Error> {
///         self.0.lock().unwrap().push(text);
///         Ok(())
///     }
/// }
/// ```
pub trait Notifier: Send + Sync + 'static {
    /// The error type returned when delivery fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Delivers one MarkdownV2 message.
    fn deliver(&self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
