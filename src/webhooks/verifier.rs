//! The configured webhook verifier.
//!
//! Wraps the free functions in [`super::signature`], [`super::freshness`] and
//! [`super::allowlist`] with the secret and policy for one deployment, and
//! reports *why* a delivery was rejected so the HTTP layer can log it.

use std::net::IpAddr;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use super::allowlist::is_allowed_source;
use super::freshness::{DEFAULT_MAX_AGE_MS, timestamp_skew_ms};
use super::signature::parse_signature_header;

/// Reasons a delivery fails verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// No signing secret is configured.
    #[error("no webhook secret configured")]
    MissingSecret,

    /// The request carried no signature header.
    #[error("missing signature header")]
    MissingSignature,

    /// The signature header is not 32 bytes of hex.
    #[error("malformed signature header")]
    MalformedSignature,

    /// The signature does not match the body.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// The webhook timestamp is outside the freshness window.
    #[error("stale webhook: timestamp is {skew_ms}ms from now (max {max_age_ms}ms)")]
    StaleEvent { skew_ms: u64, max_age_ms: u64 },

    /// The peer address is not a known webhook source.
    #[error("delivery from unexpected source address {0}")]
    ForbiddenSource(IpAddr),
}

/// Verifies deliveries for a single webhook secret and freshness policy.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: Vec<u8>,
    max_age_ms: u64,
    enforce_allowlist: bool,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"<redacted>")
            .field("max_age_ms", &self.max_age_ms)
            .field("enforce_allowlist", &self.enforce_allowlist)
            .finish()
    }
}

impl WebhookVerifier {
    /// Creates a verifier with the default one-minute window and no allow-list.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        WebhookVerifier {
            secret: secret.into(),
            max_age_ms: DEFAULT_MAX_AGE_MS,
            enforce_allowlist: false,
        }
    }

    /// Overrides the freshness window.
    pub fn with_max_age_ms(mut self, max_age_ms: u64) -> Self {
        self.max_age_ms = max_age_ms;
        self
    }

    /// Turns the source address allow-list on or off.
    pub fn with_allowlist(mut self, enforce: bool) -> Self {
        self.enforce_allowlist = enforce;
        self
    }

    pub fn max_age_ms(&self) -> u64 {
        self.max_age_ms
    }

    pub fn enforces_allowlist(&self) -> bool {
        self.enforce_allowlist
    }

    /// Checks the HMAC signature of the raw body.
    pub fn check_signature(
        &self,
        payload: &[u8],
        signature_header: Option<&str>,
    ) -> Result<(), VerifyError> {
        if self.secret.is_empty() {
            return Err(VerifyError::MissingSecret);
        }
        let header = signature_header.ok_or(VerifyError::MissingSignature)?;
        let expected = parse_signature_header(header).ok_or(VerifyError::MalformedSignature)?;

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .map_err(|_| VerifyError::MissingSecret)?;
        mac.update(payload);
        mac.verify_slice(&expected)
            .map_err(|_| VerifyError::SignatureMismatch)
    }

    /// Checks that the webhook timestamp is within the window around `now_ms`.
    pub fn check_freshness(&self, webhook_timestamp_ms: i64, now_ms: i64) -> Result<(), VerifyError> {
        let skew_ms = timestamp_skew_ms(webhook_timestamp_ms, now_ms);
        if skew_ms <= self.max_age_ms {
            Ok(())
        } else {
            Err(VerifyError::StaleEvent {
                skew_ms,
                max_age_ms: self.max_age_ms,
            })
        }
    }

    /// Checks the peer address against the allow-list, if enforced.
    ///
    /// The rejection carries the peer address exactly as observed.
    pub fn check_source(&self, peer: IpAddr) -> Result<(), VerifyError> {
        if !self.enforce_allowlist || is_allowed_source(peer) {
            Ok(())
        } else {
            Err(VerifyError::ForbiddenSource(peer))
        }
    }
}
