//! HTTP cache control module
//!
//! `ETag` generation and conditional request handling for static site
//! assets. Snapshot data responses bypass this module entirely.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from content length and a fast content hash,
/// e.g. `"1a2b-c3d4e5"`.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Check whether the client's `If-None-Match` header matches our `ETag`.
///
/// The header may carry a single tag, a comma-separated list, or the `*`
/// wildcard. A match means the client's copy is current and a 304 should be
/// returned.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(client) = if_none_match else {
        return false;
    };
    client
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate == etag)
}
