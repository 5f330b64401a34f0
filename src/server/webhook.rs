//! Webhook endpoint handler.
//!
//! Verifies a Linear delivery, renders it and hands the message to the
//! notifier before answering. Verification runs on the raw body bytes, before
//! any parsing.

use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AppState;
use crate::message::format_event;
use crate::notify::Notifier;
use crate::webhooks::{ParseError, VerifyError, parse_webhook};

/// Header carrying the hex HMAC-SHA256 of the body.
const HEADER_SIGNATURE: &str = "linear-signature";
/// Header carrying Linear's delivery id.
const HEADER_DELIVERY: &str = "linear-delivery";
/// Header carrying the entity type of the event.
const HEADER_EVENT: &str = "linear-event";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The delivery failed signature, freshness or source checks.
    #[error("rejected: {0}")]
    Rejected(#[from] VerifyError),

    /// The body is not a Linear webhook envelope.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::Rejected(VerifyError::ForbiddenSource(_)) => StatusCode::FORBIDDEN,
            WebhookError::Rejected(_) => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Headers:
///   - `Linear-Signature`: hex HMAC-SHA256 of the body (required)
///   - `Linear-Delivery`, `Linear-Event`: logged when present
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 200 OK: Verified and handed to the notifier (even if delivery failed)
/// - 400 Bad Request: Body is not a valid envelope
/// - 401 Unauthorized: Missing/invalid signature or stale timestamp
/// - 403 Forbidden: Source address not allowed (allow-list enabled)
pub async fn webhook_handler<N: Notifier>(
    State(app_state): State<AppState<N>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError> {
    let delivery = optional_header(&headers, HEADER_DELIVERY).unwrap_or("-");
    let event_header = optional_header(&headers, HEADER_EVENT).unwrap_or("-");

    debug!(
        delivery = %delivery,
        event = %event_header,
        peer = %peer,
        "Received webhook"
    );

    let verifier = app_state.verifier();

    if let Err(e) = verifier.check_source(peer.ip()) {
        warn!(delivery = %delivery, peer = %peer, "Webhook from unexpected source");
        return Err(e.into());
    }

    // Signature BEFORE parsing: the HMAC covers the bytes as sent.
    if let Err(e) = verifier.check_signature(&body, optional_header(&headers, HEADER_SIGNATURE)) {
        warn!(delivery = %delivery, error = %e, "Invalid webhook signature");
        return Err(e.into());
    }

    let event = parse_webhook(&body).inspect_err(|e| {
        warn!(delivery = %delivery, error = %e, "Malformed webhook payload");
    })?;

    if let Err(e) = verifier.check_freshness(event.webhook_timestamp, app_state.clock().now_ms()) {
        warn!(
            delivery = %delivery,
            webhook_id = %event.webhook_id,
            error = %e,
            "Stale webhook"
        );
        return Err(e.into());
    }

    let text = format_event(&event);

    match app_state.notifier().deliver(text).await {
        Ok(()) => {
            info!(
                webhook_id = %event.webhook_id,
                entity_type = %event.entity_type(),
                action = %event.action,
                "Relayed webhook"
            );
        }
        Err(e) => {
            // Linear would retry on a non-2xx answer, and every retry would be
            // a duplicate for the parts that did get through.
            warn!(
                webhook_id = %event.webhook_id,
                error = %e,
                "Failed to deliver message"
            );
        }
    }

    Ok((StatusCode::OK, "OK"))
}

/// Extracts a header value as a string, if present and valid UTF-8.
fn optional_header<'a>(headers: &'a HeaderMap, name: &'static str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
