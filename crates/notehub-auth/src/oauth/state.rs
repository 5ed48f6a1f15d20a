//! Random `state` values for the OAuth authorization redirect.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Generates a cryptographically random `state` parameter.
///
/// 32 random bytes from the thread-local CSPRNG, base64url-encoded
/// (43 characters).
#[must_use]
pub fn generate_state() -> String {
    let random_bytes: [u8; 32] = rand::thread_rng().r#gen();
    URL_SAFE_NO_PAD.encode(random_bytes)
}
