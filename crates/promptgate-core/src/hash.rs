//! Content hashing
//!
//! The content hash is the sole join key between "this exact content was
//! seen before" and "an administrator approved this exact content". It is
//! always computed over the original, uncensored text so identical user
//! intents collapse to the same key regardless of detected category.

use sha2::{Digest, Sha256};

/// Deterministic fingerprint of the original message text
pub fn content_hash(text: &str) -> String {
    use std::fmt::Write;

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
