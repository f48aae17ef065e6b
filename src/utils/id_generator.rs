//! Random identifier generation.
//!
//! Session cookies and locally issued message IDs share one generator: random
//! bytes from `getrandom`, encoded as URL-safe base64 without padding.

use base64::Engine as _;

/// Random bytes behind a session ID (128 bits).
const SESSION_ID_BYTES: usize = 16;

/// Encoded length of a session ID.
pub const SESSION_ID_LEN: usize = 22;

/// Random bytes behind a local message ID.
const MESSAGE_ID_BYTES: usize = 12;

/// Generates `n` random bytes, URL-safe base64 encoded.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
fn random_token(n: usize) -> String {
    let mut buffer = vec![0u8; n];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Generates an unguessable booking session ID.
///
/// # Examples
///
/// ```ignore
/// let id = generate_session_id();
/// assert_eq!(id.len(), 22);
/// ```
pub fn generate_session_id() -> String {
    random_token(SESSION_ID_BYTES)
}

/// Generates a message ID for deliveries that never reach a mail provider.
pub fn generate_message_id() -> String {
    format!("local-{}", random_token(MESSAGE_ID_BYTES))
}

/// Checks the shape of a session ID taken from a cookie.
///
/// Only the format is checked; whether the session exists is up to the store.
pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
