//! Event → message dispatch and the never-fail boundary.
//!
//! [`try_format_event`] does the real work and can fail on payloads with an
//! unexpected shape. [`format_event`] is what callers use: it always returns
//! a non-empty message, substituting [`fallback_message`] on error.

use thiserror::Error;
use tracing::warn;

use super::escape::escape_markdown;
use super::{comment, generic, issue, project};
use crate::webhooks::{Entity, WebhookEvent};

/// Why an event could not be rendered normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The entity payload did not have the shape its type promises.
    #[error("malformed {entity_type} payload: {reason}")]
    MalformedPayload { entity_type: String, reason: String },

    /// Priority outside 0..=4.
    #[error("invalid priority {0}")]
    InvalidPriority(u8),

    /// Due date not in `YYYY-MM-DD` form.
    #[error("invalid due date {0:?}")]
    InvalidDueDate(String),
}

/// Renders an event as a MarkdownV2 message.
///
/// Never fails and never returns an empty string.
pub fn format_event(event: &WebhookEvent) -> String {
    match try_format_event(event) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => fallback_message(event),
        Err(e) => {
            warn!(
                webhook_id = %event.webhook_id,
                entity_type = %event.entity_type(),
                action = %event.action,
                error = %e,
                "Falling back to generic message"
            );
            fallback_message(event)
        }
    }
}

/// Renders an event, reporting formatting failures instead of hiding them.
pub fn try_format_event(event: &WebhookEvent) -> Result<String, FormatError> {
    match &event.entity {
        Entity::Issue(data) => issue::render_issue(event, data),
        Entity::Comment(data) => Ok(comment::render_comment(event, data)),
        Entity::Project(data) => Ok(project::render_project(event, data)),
        Entity::Other { entity_type, .. } => Ok(generic::render_generic(event, entity_type)),
        Entity::Malformed {
            entity_type,
            reason,
            ..
        } => Err(FormatError::MalformedPayload {
            entity_type: entity_type.to_string(),
            reason: reason.clone(),
        }),
    }
}

/// The short message used when normal rendering fails.
pub fn fallback_message(event: &WebhookEvent) -> String {
    format!(
        "⚠️ {} {} by {}",
        escape_markdown(event.entity_type().as_str()),
        event.action.past_tense(),
        escape_markdown(&event.actor.name)
    )
}
