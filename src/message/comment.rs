//! Comment events.

use super::escape::{escape_markdown, escape_truncated};
use crate::webhooks::{Action, CommentData, WebhookEvent};

/// Character limit for the quoted comment body.
pub const BODY_LIMIT: usize = 200;

pub(super) fn render_comment(event: &WebhookEvent, comment: &CommentData) -> String {
    let header = format!("💬 *New comment by {}*", escape_markdown(&event.actor.name));

    match event.action {
        Action::Create | Action::Update => {
            format!("{header}\n\"{}\"", escape_truncated(&comment.body, BODY_LIMIT))
        }
        Action::Remove => header,
    }
}
