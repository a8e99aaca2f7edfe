//! Timepad webhook signature verification.
//!
//! Timepad signs the raw request body with HMAC-SHA1 keyed by the shared
//! secret phrase and sends it as `X-Hub-Signature: sha1=<hex>`.
//!
//! SHA-1 is weak; it is kept only because the sender offers nothing else.
//! Move to SHA-256 as soon as Timepad supports it.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use tracing::warn;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// Literal prefix in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha1=";

/// Compute the header value a trusted sender would send for `body`.
pub fn expected_signature(secret: &str, body: &[u8]) -> Result<String, InvalidLength> {
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())?;
    mac.update(body);
    Ok(format!(
        "{}{}",
        SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Verify an `X-Hub-Signature` header against the raw request body.
///
/// `body` must be the exact bytes received; a missing header is treated as
/// empty and always fails.
///
/// # Returns
///
/// `true` only if the header equals `sha1=` + hex HMAC of the body, in full.
pub fn verify_hub_signature(secret: &str, body: &[u8], header: Option<&str>) -> bool {
    let provided = header.unwrap_or("");

    if provided.is_empty() {
        warn!(body_length = body.len(), "hub_signature_missing");
        return false;
    }

    let expected = match expected_signature(secret, body) {
        Ok(sig) => sig,
        Err(_) => {
            warn!("hub_signature_invalid_key");
            return false;
        }
    };

    // Constant-time comparison to prevent timing attacks
    let valid = constant_time_compare(&expected, provided);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = provided.len(),
            has_prefix = provided.starts_with(SIGNATURE_PREFIX),
            "hub_signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
