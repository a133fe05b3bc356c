use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Token for an arbitrary Unix-second timestamp: hex-encoded HMAC-SHA256 of
/// the decimal timestamp string, keyed by the shared secret.
#[must_use]
pub fn token_at(secret: &str, unix_time: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(unix_time.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Token valid for the current second. Tokens have no expiry window beyond
/// second granularity, so callers must generate one immediately before each
/// request.
#[must_use]
pub fn generate_token(secret: &str) -> String {
    token_at(secret, Utc::now().timestamp())
}

/// Byte-for-byte comparison against the token for the current second.
#[must_use]
pub fn verify_token(secret: &str, presented: &str) -> bool {
    presented == generate_token(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_deterministic_per_second() {
        let a = token_at("secret", 1717675200);
        let b = token_at("secret", 1717675200);
        assert_eq!(a, b);
    }

    #[test]
    fn test_token_changes_with_time() {
        assert_ne!(token_at("secret", 1717675200), token_at("secret", 1717675201));
    }

    #[test]
    fn test_token_changes_with_secret() {
        assert_ne!(token_at("secret", 1717675200), token_at("other", 1717675200));
    }

    #[test]
    fn test_token_is_hex_sha256_digest() {
        let token = token_at("secret", 0);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_accepts_current_token() {
        assert!(verify_token("secret", &generate_token("secret")));
    }

    #[test]
    fn test_verify_rejects_wrong_token() {
        assert!(!verify_token("secret", "deadbeef"));
    }
}
