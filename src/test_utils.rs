//! Shared test fixtures.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::notify::Notifier;

use crate::webhooks::events::{Actor, ActorKind, PreviousState, TeamRef};
use crate::webhooks::{Action, Entity, IssueData, UpdatedFrom, WebhookEvent};

/// Timestamp used by fixture events (2024-05-01T10:00:00Z).
pub const FIXTURE_TIMESTAMP_MS: i64 = 1_714_557_600_000;

pub fn actor() -> Actor {
    Actor {
        id: "user_1".into(),
        kind: ActorKind::User,
        name: "Ada Lovelace".into(),
        email: Some("ada@example.com".into()),
        url: None,
    }
}

/// An event from Ada Lovelace wrapping `entity`.
pub fn event(action: Action, entity: Entity) -> WebhookEvent {
    WebhookEvent {
        action,
        entity,
        actor: actor(),
        created_at: DateTime::<Utc>::from_timestamp_millis(FIXTURE_TIMESTAMP_MS)
            .expect("fixture timestamp is in range"),
        url: "https://linear.app/acme/view/event".into(),
        updated_from: None,
        webhook_timestamp: FIXTURE_TIMESTAMP_MS,
        webhook_id: "webhook_1".into(),
        organization_id: "org_1".into(),
    }
}

/// A minimal issue: title, identifier and url, nothing optional set.
pub fn issue() -> IssueData {
    IssueData {
        title: "Fix login".into(),
        description: None,
        priority: None,
        estimate: None,
        due_date: None,
        number: 42,
        url: "https://linear.app/acme/issue/ENG-42".into(),
        identifier: "ENG-42".into(),
        state: None,
        team: Some(TeamRef {
            name: "Engineering".into(),
            key: "ENG".into(),
        }),
        assignee: None,
        creator: None,
        parent: None,
        labels: None,
        project: None,
        cycle: None,
    }
}

pub fn updated_from_state(name: &str) -> UpdatedFrom {
    UpdatedFrom {
        state: Some(PreviousState {
            name: name.to_string(),
        }),
        ..UpdatedFrom::default()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("simulated delivery failure")]
pub struct SimulatedDeliveryError;

/// A [`Notifier`] that records messages instead of sending them.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<usize>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose every delivery fails.
    pub fn failing() -> Self {
        RecordingNotifier {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Notifier for RecordingNotifier {
    type Error = SimulatedDeliveryError;

    async fn deliver(&self, text: String) -> Result<(), Self::Error> {
        *self.attempts.lock().unwrap() += 1;
        if self.fail {
            return Err(SimulatedDeliveryError);
        }
        self.sent.lock().unwrap().push(text);
        Ok(())
    }
}
