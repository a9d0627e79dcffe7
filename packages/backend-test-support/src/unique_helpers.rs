//! Unique test data, so concurrently running tests never share a room.

use ulid::Ulid;

/// A unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// assert_ne!(a, unique_str("player"));
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique room code: six upper-case characters from a ULID's random tail.
pub fn unique_room_code() -> String {
    let ulid = Ulid::new().to_string();
    ulid[ulid.len() - 6..].to_string()
}
