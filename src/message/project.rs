//! Project events.

use super::escape::escape_markdown;
use crate::webhooks::{Action, ProjectData, WebhookEvent};

pub(super) fn render_project(event: &WebhookEvent, project: &ProjectData) -> String {
    let label = match event.action {
        Action::Create => "New project",
        Action::Update => "Project updated",
        Action::Remove => "Project removed",
    };

    format!(
        "📁 *{label}*: {}\n\\- {}",
        escape_markdown(&project.name),
        escape_markdown(&event.actor.name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::escape::{RESERVED_CHARS, has_unescaped_reserved};
    use crate::test_utils::event;
    use crate::webhooks::Entity;

    fn project(name: &str) -> ProjectData {
        ProjectData {
            name: name.to_string(),
            description: None,
            state: "planned".into(),
            priority: 0,
            lead: None,
            teams: Vec::new(),
        }
    }

    fn render(action: Action, data: ProjectData) -> String {
        render_project(&event(action, Entity::Project(data.clone())), &data)
    }

    #[test]
    fn create() {
        assert_eq!(
            render(Action::Create, project("Q3 Launch")),
            "📁 *New project*: Q3 Launch\n\\- Ada Lovelace"
        );
    }

    #[test]
    fn update_and_remove() {
        assert!(render(Action::Update, project("P")).starts_with("📁 *Project updated*: P\n"));
        assert!(render(Action::Remove, project("P")).starts_with("📁 *Project removed*: P\n"));
    }

    #[test]
    fn name_is_escaped() {
        let text = render(Action::Create, project("v2.0 (GA)"));
        assert!(text.contains(r"v2\.0 \(GA\)"));
    }

    #[test]
    fn every_reserved_char_is_escaped() {
        let all: String = RESERVED_CHARS.iter().collect();
        let data = project(&all);
        let mut e = event(Action::Update, Entity::Project(data.clone()));
        e.actor.name = all.clone();

        let text = render_project(&e, &data);
        let escaped = escape_markdown(&all);
        assert_eq!(
            text,
            format!("📁 *Project updated*: {escaped}\n\\- {escaped}")
        );
        assert!(!has_unescaped_reserved(&escaped));
    }
}
