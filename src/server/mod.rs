//! HTTP server for the relay.
//!
//! # Endpoints
//!
//! - `POST /webhook` - Accepts Linear webhook deliveries
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

use crate::notify::Notifier;
use crate::webhooks::{Clock, SystemClock, WebhookVerifier};

pub mod health;
pub mod webhook;

pub use health::health_handler;
pub use webhook::{WebhookError, webhook_handler};

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. Nothing in
/// it changes after startup.
pub struct AppState<N> {
    inner: Arc<AppStateInner<N>>,
}

struct AppStateInner<N> {
    verifier: WebhookVerifier,
    clock: Arc<dyn Clock>,
    notifier: N,
}

impl<N> Clone for AppState<N> {
    fn clone(&self) -> Self {
        AppState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: Notifier> AppState<N> {
    /// Creates state that reads the system clock.
    pub fn new(verifier: WebhookVerifier, notifier: N) -> Self {
        Self::with_clock(verifier, notifier, Arc::new(SystemClock))
    }

    /// Creates state with an explicit clock.
    pub fn with_clock(verifier: WebhookVerifier, notifier: N, clock: Arc<dyn Clock>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                verifier,
                clock,
                notifier,
            }),
        }
    }

    pub fn verifier(&self) -> &WebhookVerifier {
        &self.inner.verifier
    }

    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }

    pub fn notifier(&self) -> &N {
        &self.inner.notifier
    }
}

/// Builds the axum Router with all endpoints.
///
/// The webhook handler reads the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_router<N: Notifier>(app_state: AppState<N>) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/webhook", post(webhook_handler::<N>))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
