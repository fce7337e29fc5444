//! Cryptographic utilities for API key hashing.

use sha2::{Digest, Sha256};

/// Prefix carried by every issued API key.
pub const API_KEY_PREFIX: &str = "hs_";

/// Number of characters after the prefix kept as the public key identifier.
const KEY_ID_LEN: usize = 8;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true if the key has the `hs_` prefix and enough characters to be a real key.
pub fn is_well_formed_api_key(key: &str) -> bool {
    key.starts_with(API_KEY_PREFIX) && key.len() >= API_KEY_PREFIX.len() + KEY_ID_LEN
}

/// Extracts the identifying prefix from an API key (first 8 characters after "hs_").
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    if is_well_formed_api_key(key) {
        key.get(API_KEY_PREFIX.len()..API_KEY_PREFIX.len() + KEY_ID_LEN)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("same_input"), sha256_hex("same_input"));
        assert_ne!(sha256_hex("input1"), sha256_hex("input2"));
    }

    #[test]
    fn test_is_well_formed_api_key() {
        assert!(is_well_formed_api_key("hs_12345678"));
        assert!(is_well_formed_api_key("hs_abcdefgh12345"));
        assert!(!is_well_formed_api_key("hs_1234567"));
        assert!(!is_well_formed_api_key("sk_abcdefgh12345"));
        assert!(!is_well_formed_api_key(""));
    }

    #[test]
    fn test_extract_key_prefix() {
        assert_eq!(extract_key_prefix("hs_abcdefgh12345"), Some("abcdefgh"));
        assert_eq!(extract_key_prefix("hs_12345678"), Some("12345678"));
        assert_eq!(extract_key_prefix("hs_short"), None);
        assert_eq!(extract_key_prefix("HS_abcdefgh12345"), None);
    }

    #[test]
    fn test_extract_key_prefix_multibyte_does_not_panic() {
        // Byte length passes the check but index 11 falls inside a char.
        assert_eq!(extract_key_prefix("hs_abcdefgé"), None);
    }
}
