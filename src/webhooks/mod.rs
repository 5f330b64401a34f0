//! Webhook handling for Linear events.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Freshness checks on the signed `webhookTimestamp`
//! - An optional source address allow-list
//! - Parsing of payloads into typed events

pub mod allowlist;
pub mod events;
pub mod freshness;
pub mod parser;
pub mod signature;
pub mod verifier;

pub use allowlist::{LINEAR_WEBHOOK_IPS, is_allowed_source};
pub use events::{
    Action, Actor, ActorKind, CommentData, Entity, EntityType, IssueData, ProjectData,
    UpdatedFrom, WebhookEvent,
};
pub use freshness::{Clock, DEFAULT_MAX_AGE_MS, FixedClock, SystemClock, verify_freshness};
pub use parser::{ParseError, parse_webhook};
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
pub use verifier::{VerifyError, WebhookVerifier};
