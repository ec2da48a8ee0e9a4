//! Content hashes for artifacts

use sha2::{Digest, Sha256};

/// First 8 hex characters of the SHA-256 digest of `bytes`.
pub fn short_content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("{:x}", result)[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::short_content_hash;

    #[test]
    fn matches_known_sha256_prefix() {
        // sha256("abc") = ba7816bf...
        assert_eq!(short_content_hash(b"abc"), "ba7816bf");
    }

    #[test]
    fn differs_for_different_content() {
        assert_ne!(short_content_hash(b"one"), short_content_hash(b"two"));
        assert_eq!(short_content_hash(b"").len(), 8);
    }
}
