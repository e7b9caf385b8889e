//! Conversation id generation

use chrono::Utc;
use rand::Rng;

const PREFIX: &str = "conv";
const SUFFIX_LEN: usize = 9;
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a fresh conversation id: `conv_<unix-millis>_<random suffix>`.
///
/// Uniqueness rests on the millisecond timestamp plus a 9-character random
/// alphanumeric suffix; two ids generated in the same millisecond still
/// collide with negligible probability.
pub fn generate_conversation_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();
    format!("{PREFIX}_{millis}_{suffix}")
}
