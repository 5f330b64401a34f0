//! Linear webhook event types.
//!
//! A delivery is an envelope (action, actor, timestamps, ids) around an
//! entity payload whose shape depends on the entity type. The entity is a sum
//! type keyed by that type, so code that renders an event matches on it
//! instead of guessing at the payload shape.
//!
//! # Entity Types
//!
//! - `Issue` - typed as [`IssueData`]
//! - `Comment` - typed as [`CommentData`]
//! - `Project` - typed as [`ProjectData`]
//! - anything else (`IssueLabel`, `Cycle`, `Reaction`, ...) - kept as raw JSON

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Remove,
}

impl Action {
    /// The wire name (`create`, `update`, `remove`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Remove => "remove",
        }
    }

    /// Past-tense verb for prose (`created`, `updated`, `removed`).
    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::Create => "created",
            Action::Update => "updated",
            Action::Remove => "removed",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of identity that triggered an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "integration")]
    Integration,
    #[serde(rename = "oauth_client", alias = "oauthClient", alias = "OauthClient")]
    OauthClient,
    /// A kind this relay does not know about.
    #[serde(other)]
    Unknown,
}

/// The identity that triggered an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActorKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A user reference embedded in an entity (creator, assignee, lead, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A workflow state (issue status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub state_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub number: u32,
}

/// Payload of an `Issue` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueData {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 0 = no priority, 1 = urgent ... 4 = low.
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub estimate: Option<f64>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: Option<String>,
    pub number: u64,
    #[serde(default)]
    pub url: String,
    pub identifier: String,
    #[serde(default)]
    pub state: Option<WorkflowState>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub assignee: Option<UserRef>,
    #[serde(default)]
    pub creator: Option<UserRef>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub labels: Option<Vec<LabelRef>>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub cycle: Option<CycleRef>,
}

/// Payload of a `Comment` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    #[serde(default)]
    pub body: String,
    /// Linear reports this as `editedAt`; present means edited.
    #[serde(default, alias = "editedAt", deserialize_with = "edited_flag")]
    pub edited: bool,
    pub issue_id: String,
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// Accepts either a boolean or an `editedAt` timestamp.
fn edited_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(b)) => b,
        Some(_) => true,
    })
}

/// Payload of a `Project` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub lead: Option<UserRef>,
    #[serde(default)]
    pub teams: Vec<TeamRef>,
}

/// The entity type named by the envelope's `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Issue,
    Comment,
    Project,
    Other(String),
}

impl EntityType {
    pub fn parse(name: &str) -> Self {
        match name {
            "Issue" => EntityType::Issue,
            "Comment" => EntityType::Comment,
            "Project" => EntityType::Project,
            other => EntityType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Issue => "Issue",
            EntityType::Comment => "Comment",
            EntityType::Project => "Project",
            EntityType::Other(name) => name,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entity an event concerns, keyed by entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Issue(IssueData),
    Comment(CommentData),
    Project(ProjectData),

    /// A typed entity whose `data` did not have the expected shape.
    ///
    /// Kept so the event can still be reported instead of dropped.
    Malformed {
        entity_type: EntityType,
        reason: String,
        raw: serde_json::Value,
    },

    /// An entity type without a typed payload.
    Other {
        entity_type: String,
        raw: serde_json::Value,
    },
}

impl Entity {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Entity::Issue(_) => EntityType::Issue,
            Entity::Comment(_) => EntityType::Comment,
            Entity::Project(_) => EntityType::Project,
            Entity::Malformed { entity_type, .. } => entity_type.clone(),
            Entity::Other { entity_type, .. } => EntityType::Other(entity_type.clone()),
        }
    }
}

/// Previous values of the fields an `update` changed.
///
/// Only fields the formatter reads are typed; everything else is kept in
/// `other`, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedFrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PreviousState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousState {
    pub name: String,
}

/// A verified, parsed Linear webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub action: Action,
    pub entity: Entity,
    pub actor: Actor,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub updated_from: Option<UpdatedFrom>,
    /// Milliseconds since the Unix epoch, as claimed by the sender.
    pub webhook_timestamp: i64,
    pub webhook_id: String,
    pub organization_id: String,
}

impl WebhookEvent {
    pub fn entity_type(&self) -> EntityType {
        self.entity.entity_type()
    }
}
