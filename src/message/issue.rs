//! Issue events.
//!
//! ```text
//! 🆕 *New issue*
//! [Fix login](https://linear.app/acme/issue/ENG-42) by Ada
//!     ↳ parent: Auth overhaul
//! High • Jun 1, 2024 • \[Todo\] \-\> \[In Progress\]
//! 👤 Grace
//!
//! Users cannot log in\.\.\.
//! ```

use chrono::NaiveDate;

use super::escape::{escape_markdown, escape_truncated};
use super::format::FormatError;
use crate::webhooks::{Action, IssueData, WebhookEvent};

/// Character limit for the description excerpt on new issues.
pub const DESCRIPTION_LIMIT: usize = 300;

/// Separator between metadata fragments.
pub const METADATA_SEPARATOR: &str = " • ";

pub(super) fn render_issue(event: &WebhookEvent, issue: &IssueData) -> Result<String, FormatError> {
    let mut lines = vec![header(event.action, issue.parent.is_some()).to_string()];

    let url = if issue.url.is_empty() {
        &event.url
    } else {
        &issue.url
    };
    let title = if issue.title.trim().is_empty() {
        &issue.identifier
    } else {
        &issue.title
    };
    let creator = issue
        .creator
        .as_ref()
        .map_or(event.actor.name.as_str(), |c| c.name.as_str());
    lines.push(format!(
        "[{}]({}) by {}",
        escape_markdown(title),
        url,
        escape_markdown(creator)
    ));

    if let Some(parent) = &issue.parent {
        lines.push(format!("    ↳ parent: {}", escape_markdown(&parent.title)));
    }

    if let Some(metadata) = metadata_line(event, issue)? {
        lines.push(metadata);
    }

    if let Some(assignee) = &issue.assignee {
        lines.push(format!("👤 {}", escape_markdown(&assignee.name)));
    }

    let mut message = lines.join("\n");

    if event.action == Action::Create
        && let Some(description) = issue.description.as_deref()
    {
        message.push_str("\n\n");
        message.push_str(&escape_truncated(description, DESCRIPTION_LIMIT));
    }

    Ok(message)
}

fn header(action: Action, has_parent: bool) -> &'static str {
    match (action, has_parent) {
        (Action::Create, true) => "🧩 *New sub\\-issue*",
        (Action::Create, false) => "🆕 *New issue*",
        (Action::Update, _) => "✏️ *Issue updated*",
        (Action::Remove, _) => "🗑 *Issue removed*",
    }
}

/// Priority, due date and status joined by [`METADATA_SEPARATOR`], or `None`
/// if none of them are present.
fn metadata_line(event: &WebhookEvent, issue: &IssueData) -> Result<Option<String>, FormatError> {
    let mut fragments = Vec::new();

    if let Some(label) = issue.priority.map(priority_label).transpose()?.flatten() {
        fragments.push(label.to_string());
    }

    if let Some(due) = issue.due_date.as_deref() {
        fragments.push(format_due_date(due)?);
    }

    if let Some(state) = &issue.state {
        let previous = event
            .updated_from
            .as_ref()
            .and_then(|from| from.state.as_ref());
        let status = match (event.action, previous) {
            (Action::Update, Some(previous)) => format!("[{}] -> [{}]", previous.name, state.name),
            _ => state.name.clone(),
        };
        fragments.push(status);
    }

    if fragments.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        fragments
            .iter()
            .map(|f| escape_markdown(f))
            .collect::<Vec<_>>()
            .join(METADATA_SEPARATOR),
    ))
}

/// Maps Linear's numeric priority to its label. `0` means "no priority".
pub fn priority_label(priority: u8) -> Result<Option<&'static str>, FormatError> {
    match priority {
        0 => Ok(None),
        1 => Ok(Some("Urgent")),
        2 => Ok(Some("High")),
        3 => Ok(Some("Medium")),
        4 => Ok(Some("Low")),
        other => Err(FormatError::InvalidPriority(other)),
    }
}

/// `2024-06-01` → `Jun 1, 2024`.
pub fn format_due_date(due: &str) -> Result<String, FormatError> {
    NaiveDate::parse_from_str(due, "%Y-%m-%d")
        .map(|date| date.format("%b %-d, %Y").to_string())
        .map_err(|_| FormatError::InvalidDueDate(due.to_string()))
}
