//! Entity types without a dedicated renderer.

use super::escape::escape_markdown;
use crate::webhooks::WebhookEvent;

fn icon(entity_type: &str) -> &'static str {
    match entity_type {
        "IssueLabel" | "ProjectLabel" | "Label" => "🏷",
        "Cycle" => "🔄",
        "Reaction" => "👍",
        "Attachment" => "📎",
        _ => "🔔",
    }
}

/// One line: `<icon> <actor> <action>ed a <entity type>`.
pub(super) fn render_generic(event: &WebhookEvent, entity_type: &str) -> String {
    format!(
        "{} {} {} a {}",
        icon(entity_type),
        escape_markdown(&event.actor.name),
        event.action.past_tense(),
        escape_markdown(&entity_type.to_lowercase())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::escape::{RESERVED_CHARS, has_unescaped_reserved};
    use crate::test_utils::event;
    use crate::webhooks::{Action, Entity};
    use serde_json::json;

    fn render(action: Action, entity_type: &str) -> String {
        let e = event(
            action,
            Entity::Other {
                entity_type: entity_type.to_string(),
                raw: json!({ "name": "bug" }),
            },
        );
        render_generic(&e, entity_type)
    }

    #[test]
    fn issue_label_is_one_line() {
        let text = render(Action::Create, "IssueLabel");
        assert_eq!(text, "🏷 Ada Lovelace created a issuelabel");
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn unknown_type_uses_bell() {
        assert_eq!(
            render(Action::Remove, "Document"),
            "🔔 Ada Lovelace removed a document"
        );
    }

    #[test]
    fn cycle_icon() {
        assert!(render(Action::Update, "Cycle").starts_with("🔄 "));
    }

    #[test]
    fn every_reserved_char_is_escaped() {
        let all: String = RESERVED_CHARS.iter().collect();
        let mut e = event(
            Action::Create,
            Entity::Other {
                entity_type: all.clone(),
                raw: json!({}),
            },
        );
        e.actor.name = all.clone();

        let text = render_generic(&e, &all);
        let escaped = escape_markdown(&all);
        assert_eq!(text, format!("🔔 {escaped} created a {escaped}"));
        assert!(!has_unescaped_reserved(text.trim_start_matches("🔔 ")));
    }
}
