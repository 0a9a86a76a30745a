//! Password-reset token generation
//!
//! The raw token (emailed to the user) is never persisted; only its
//! SHA-256 digest is stored, so a database compromise alone cannot
//! yield a usable token.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a new reset token pair: `(raw, digest)`.
///
/// `raw` is 32 cryptographically random bytes rendered as 64 hex
/// characters. `digest` is what gets stored on the account.
pub fn generate_reset_token() -> (String, String) {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    let raw = hex::encode(random_bytes);

    let digest = reset_token_digest(&raw);
    (raw, digest)
}

/// Deterministic digest of a raw token, used to look up a presented
/// token against the stored value.
pub fn reset_token_digest(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_token_is_64_hex_chars() {
        let (raw, _) = generate_reset_token();
        assert_eq!(raw.len(), 64);
        assert!(raw.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_digest_matches_digest_of_raw() {
        let (raw, digest) = generate_reset_token();
        assert_eq!(reset_token_digest(&raw), digest);
        assert_ne!(raw, digest);
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_reset_token();
        let (b, _) = generate_reset_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(
            reset_token_digest("fixed-input"),
            reset_token_digest("fixed-input")
        );
    }
}
