use chrono::Utc;
use rand::Rng;

const NATIVE_ID_LEN: usize = 24;

/// Generates a store-native identifier: 4 bytes of big-endian unix seconds
/// followed by 8 random bytes, hex encoded.
#[must_use]
pub fn new_native_id() -> String {
    let mut bytes = [0u8; 12];
    let secs = Utc::now().timestamp().clamp(0, i64::from(u32::MAX)) as u32;
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    rand::thread_rng().fill(&mut bytes[4..]);
    hex::encode(bytes)
}

/// Returns true if `s` has the shape of a native identifier.
#[must_use]
pub fn is_native_id(s: &str) -> bool {
    s.len() == NATIVE_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}
