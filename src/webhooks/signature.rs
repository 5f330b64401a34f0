//! Linear webhook signature verification using HMAC-SHA256.
//!
//! Linear signs each delivery with HMAC-SHA256 over the raw request body,
//! keyed by the webhook's signing secret. The digest arrives hex-encoded in
//! the `Linear-Signature` header, with no algorithm prefix.
//!
//! The signature must be checked against the bytes exactly as received.
//! Re-serializing a parsed body changes key order, whitespace and number
//! formatting, and a legitimate payload would then fail verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA256 digest in bytes.
pub const SIGNATURE_LEN: usize = 32;

/// Parses a `Linear-Signature` header value into raw digest bytes.
///
/// Returns `None` for anything that is not exactly 32 bytes of hex.
/// Surrounding whitespace is ignored. Never panics.
///
/// # Examples
///
/// ```
/// use linear_relay::webhooks::parse_signature_header;
///
/// let header = "ab".repeat(32);
/// assert_eq!(parse_signature_header(&header).map(|s| s.len()), Some(32));
///
/// // Invalid: bad hex
/// assert!(parse_signature_header("xyz").is_none());
///
/// // Invalid: too short
/// assert!(parse_signature_header("abcd1234").is_none());
/// ```
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let bytes = hex::decode(header.trim()).ok()?;
    (bytes.len() == SIGNATURE_LEN).then_some(bytes)
}

/// Computes the HMAC-SHA256 signature of a payload using the given secret.
///
/// This is useful for testing purposes (generating expected signatures).
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a signature the way Linear sends it: lowercase hex, no prefix.
pub fn format_signature_header(signature: &[u8]) -> String {
    hex::encode(signature)
}

/// Verifies a Linear webhook signature against the raw payload and secret.
///
/// Returns `true` only if the header decodes to a digest that matches the
/// HMAC of `payload`. A missing header, malformed hex, a digest of the wrong
/// length, or an empty secret all yield `false`. Comparison is constant-time.
///
/// # Arguments
///
/// * `payload` - The raw request body, exactly as received
/// * `signature_header` - The value of the `Linear-Signature` header, if any
/// * `secret` - The webhook signing secret configured in Linear
///
/// # Examples
///
/// ```
/// use linear_relay::webhooks::{compute_signature, format_signature_header, verify_signature};
///
/// let payload = br#"{"action":"create","type":"Issue"}"#;
/// let secret = b"lin_wh_secret";
///
/// let header = format_signature_header(&compute_signature(payload, secret));
///
/// assert!(verify_signature(payload, Some(&header), secret));
/// assert!(!verify_signature(payload, Some(&header), b"wrong-secret"));
/// assert!(!verify_signature(payload, None, secret));
/// ```
pub fn verify_signature(payload: &[u8], signature_header: Option<&str>, secret: &[u8]) -> bool {
    if secret.is_empty() {
        return false;
    }

    let expected_signature = match signature_header.and_then(parse_signature_header) {
        Some(sig) => sig,
        None => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);

    // Constant-time comparison via the HMAC library
    mac.verify_slice(&expected_signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn header_for(payload: &[u8], secret: &[u8]) -> String {
        format_signature_header(&compute_signature(payload, secret))
    }

    #[test]
    fn parse_signature_header_full_length() {
        let header = "a".repeat(64);
        let result = parse_signature_header(&header).unwrap();
        assert_eq!(result, vec![0xaa; 32]);
    }

    #[test]
    fn parse_signature_header_uppercase_hex() {
        let header = "AB".repeat(32);
        assert_eq!(parse_signature_header(&header), Some(vec![0xab; 32]));
    }

    #[test]
    fn parse_signature_header_trims_whitespace() {
        let header = format!("  {}\n", "0f".repeat(32));
        assert_eq!(parse_signature_header(&header), Some(vec![0x0f; 32]));
    }

    #[test]
    fn parse_signature_header_rejects_wrong_length() {
        assert_eq!(parse_signature_header("1234abcd"), None);
        assert_eq!(parse_signature_header(&"ab".repeat(33)), None);
        assert_eq!(parse_signature_header(""), None);
    }

    #[test]
    fn parse_signature_header_rejects_github_style_prefix() {
        let header = format!("sha256={}", "ab".repeat(32));
        assert_eq!(parse_signature_header(&header), None);
    }

    #[test]
    fn parse_signature_header_odd_length_hex() {
        assert_eq!(parse_signature_header(&"a".repeat(63)), None);
    }

    #[test]
    fn verify_signature_missing_header_returns_false() {
        assert!(!verify_signature(b"{}", None, b"secret"));
    }

    #[test]
    fn verify_signature_empty_secret_returns_false() {
        let payload = b"test payload";
        let header = header_for(payload, b"");
        assert!(!verify_signature(payload, Some(&header), b""));
    }

    #[test]
    fn verify_signature_wrong_secret() {
        let payload = b"test payload";
        let header = header_for(payload, b"correct-secret");

        assert!(verify_signature(payload, Some(&header), b"correct-secret"));
        assert!(!verify_signature(payload, Some(&header), b"wrong-secret"));
    }

    #[test]
    fn verify_signature_malformed_header_returns_false() {
        let payload = b"test";
        let secret = b"secret";

        assert!(!verify_signature(payload, Some(""), secret));
        assert!(!verify_signature(payload, Some("not-hex"), secret));
        assert!(!verify_signature(payload, Some("zz"), secret));
        assert!(!verify_signature(payload, Some("abcd"), secret));
    }

    #[test]
    fn verify_signature_reserialized_body_fails() {
        let raw = br#"{"type": "Issue",  "action": "create"}"#;
        let secret = b"secret";
        let header = header_for(raw, secret);

        let value: serde_json::Value = serde_json::from_slice(raw).unwrap();
        let reserialized = serde_json::to_vec(&value).unwrap();

        assert!(verify_signature(raw, Some(&header), secret));
        assert!(!verify_signature(&reserialized, Some(&header), secret));
    }

    #[test]
    fn verify_signature_binary_payload() {
        let payload = &[0x00, 0x01, 0xff, 0xfe, 0x00, 0x00, 0x7f];
        let header = header_for(payload, b"secret");
        assert!(verify_signature(payload, Some(&header), b"secret"));
    }

    #[test]
    fn format_signature_header_is_lowercase_hex() {
        assert_eq!(format_signature_header(&[0x12, 0x34, 0xab, 0xcd]), "1234abcd");
    }

    proptest! {
        #[test]
        fn prop_sign_verify_roundtrip(payload: Vec<u8>, secret in prop::collection::vec(any::<u8>(), 1..64)) {
            let header = header_for(&payload, &secret);
            prop_assert!(verify_signature(&payload, Some(&header), &secret));
        }

        /// Flipping any single bit of the body invalidates the original signature.
        #[test]
        fn prop_single_bit_flip_fails(
            payload in prop::collection::vec(any::<u8>(), 1..512),
            secret in prop::collection::vec(any::<u8>(), 1..64),
            index: prop::sample::Index,
            bit in 0u8..8,
        ) {
            let header = header_for(&payload, &secret);
            let mut mutated = payload.clone();
            let i = index.index(mutated.len());
            mutated[i] ^= 1 << bit;
            prop_assert!(!verify_signature(&mutated, Some(&header), &secret));
        }

        #[test]
        fn prop_wrong_secret_fails(
            payload: Vec<u8>,
            secret1 in prop::collection::vec(any::<u8>(), 1..64),
            secret2 in prop::collection::vec(any::<u8>(), 1..64),
        ) {
            prop_assume!(secret1 != secret2);
            let header = header_for(&payload, &secret1);
            prop_assert!(!verify_signature(&payload, Some(&header), &secret2));
        }

        #[test]
        fn prop_malformed_header_no_panic(header: String, payload: Vec<u8>, secret: Vec<u8>) {
            let _ = parse_signature_header(&header);
            let _ = verify_signature(&payload, Some(&header), &secret);
        }

        #[test]
        fn prop_signature_length(payload: Vec<u8>, secret: Vec<u8>) {
            prop_assert_eq!(compute_signature(&payload, &secret).len(), SIGNATURE_LEN);
        }
    }
}
