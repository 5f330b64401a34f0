//! Linear webhook payload parser.
//!
//! Parses a raw (already signature-checked) body into a typed
//! [`WebhookEvent`].
//!
//! # Parsing Strategy
//!
//! 1. The envelope (`action`, `type`, `actor`, timestamps, ids) must parse;
//!    otherwise the delivery is malformed and `Err` is returned
//! 2. `data` is parsed according to `type`
//! 3. If `data` does not fit the typed shape for its entity type, the event
//!    is still returned with [`Entity::Malformed`] so it can be reported
//! 4. Unknown entity types keep their raw `data` as [`Entity::Other`]

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::events::{
    Action, Actor, CommentData, Entity, EntityType, IssueData, ProjectData, UpdatedFrom,
    WebhookEvent,
};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required envelope fields).
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Field has an invalid value (e.g. unknown action).
    #[error("invalid field value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

// ============================================================================
// Raw payload structure for deserialization
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    action: String,
    #[serde(rename = "type")]
    entity_type: String,
    actor: Actor,
    created_at: DateTime<Utc>,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    url: String,
    #[serde(default)]
    updated_from: Option<serde_json::Value>,
    webhook_timestamp: i64,
    #[serde(default)]
    webhook_id: String,
    #[serde(default)]
    organization_id: String,
}

/// Parses a webhook body into a typed event.
///
/// # Returns
///
/// * `Ok(event)` - The envelope parsed; `event.entity` may still be
///   [`Entity::Malformed`]
/// * `Err(e)` - Not JSON, missing envelope fields, or an unknown action
///
/// # Examples
///
/// ```
/// use linear_relay::webhooks::{Entity, parse_webhook};
///
/// let payload = br#"{
///     "action": "create",
///     "type": "IssueLabel",
///     "actor": { "id": "u1", "type": "user", "name": "Ada" },
///     "createdAt": "2024-05-01T10:00:00.000Z",
///     "data": { "name": "bug" },
///     "url": "https://linear.app/acme/settings/labels",
///     "webhookTimestamp": 1714557600000,
///     "webhookId": "wh1",
///     "organizationId": "org1"
/// }"#;
///
/// let event = parse_webhook(payload).unwrap();
/// assert!(matches!(event.entity, Entity::Other { .. }));
/// ```
pub fn parse_webhook(payload: &[u8]) -> Result<WebhookEvent, ParseError> {
    let raw: RawEnvelope = serde_json::from_slice(payload)?;

    let action = match raw.action.as_str() {
        "create" => Action::Create,
        "update" => Action::Update,
        "remove" => Action::Remove,
        other => {
            return Err(ParseError::InvalidField {
                field: "action",
                value: other.to_string(),
            });
        }
    };

    let entity = parse_entity(EntityType::parse(&raw.entity_type), raw.data);

    // A malformed snapshot only loses the status transition, so it is dropped
    // rather than failing the delivery.
    let updated_from = raw
        .updated_from
        .and_then(|v| serde_json::from_value::<UpdatedFrom>(v).ok());

    Ok(WebhookEvent {
        action,
        entity,
        actor: raw.actor,
        created_at: raw.created_at,
        url: raw.url,
        updated_from,
        webhook_timestamp: raw.webhook_timestamp,
        webhook_id: raw.webhook_id,
        organization_id: raw.organization_id,
    })
}

fn parse_entity(entity_type: EntityType, data: serde_json::Value) -> Entity {
    match entity_type {
        EntityType::Issue => typed::<IssueData>(EntityType::Issue, data, Entity::Issue),
        EntityType::Comment => typed::<CommentData>(EntityType::Comment, data, Entity::Comment),
        EntityType::Project => typed::<ProjectData>(EntityType::Project, data, Entity::Project),
        EntityType::Other(name) => Entity::Other {
            entity_type: name,
            raw: data,
        },
    }
}

fn typed<T: DeserializeOwned>(
    entity_type: EntityType,
    data: serde_json::Value,
    wrap: fn(T) -> Entity,
) -> Entity {
    match T::deserialize(&data) {
        Ok(payload) => wrap(payload),
        Err(e) => Entity::Malformed {
            entity_type,
            reason: e.to_string(),
            raw: data,
        },
    }
}
