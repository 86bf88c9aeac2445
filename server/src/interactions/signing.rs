//! Ed25519 Request Signing
//!
//! Verifies the detached signature the platform attaches to every inbound
//! interaction request. The message is `timestamp ‖ raw body`, signed with
//! the application's Ed25519 key; signature and public key arrive
//! hex-encoded.
//!
//! Verification is fail-closed: any missing, malformed, or mismatched input
//! yields `false`. The function never panics and never returns an error, so
//! callers have exactly one branch to get wrong.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Verify `signature_hex` over `timestamp ‖ body` against `public_key_hex`.
#[must_use]
pub fn verify_signature(
    public_key_hex: &str,
    timestamp: &str,
    body: &[u8],
    signature_hex: &str,
) -> bool {
    let Ok(key_bytes) = hex::decode(public_key_hex) else {
        return false;
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(key_bytes) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    let Ok(sig_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&sig_bytes) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    verifying_key.verify(&message, &signature).is_ok()
}
