use crate::error::WalletError;
use std::env;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable holding the distributor's signing key.
pub const PRIVATE_KEY_VAR: &str = "PRIVATE_KEY";

/// Hex-encoded secp256k1 secret, normalized without the `0x` prefix.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(String);

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey")
            .field(&"***REDACTED***")
            .finish()
    }
}

impl SigningKey {
    /// Validates a raw key: optional `0x`, then exactly 64 hex characters.
    pub fn parse(raw: &str) -> Result<Self, WalletError> {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if body.len() != 64 {
            return Err(WalletError::InvalidKeyLength { length: body.len() });
        }

        let mut bytes = hex::decode(body).map_err(|_| WalletError::InvalidKeyFormat)?;
        let all_zero = bytes.iter().all(|b| *b == 0);
        bytes.zeroize();
        if all_zero {
            return Err(WalletError::InvalidKeyFormat);
        }

        Ok(Self(body.to_ascii_lowercase()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

pub struct WalletManager;

impl WalletManager {
    /// Loads the signing key from `var`. Call `dotenv()` first to pick up `.env`.
    pub fn from_env(var: &str) -> Result<SigningKey, WalletError> {
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => SigningKey::parse(&value),
            _ => Err(WalletError::MissingKey {
                var: var.to_string(),
            }),
        }
    }
}

/// Shortens an address for display: `0x1234...abcd`.
pub fn mask_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_parse_accepts_prefixed_and_bare_keys() {
        let bare = SigningKey::parse(KEY).unwrap();
        let prefixed = SigningKey::parse(&format!("0x{}", KEY)).unwrap();
        assert_eq!(bare.expose(), prefixed.expose());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let key = SigningKey::parse(&format!("  0x{}\n", KEY.to_uppercase())).unwrap();
        assert_eq!(key.expose(), KEY);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        match SigningKey::parse("0xabcd") {
            Err(WalletError::InvalidKeyLength { length }) => assert_eq!(length, 4),
            other => panic!("Expected InvalidKeyLength, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let bad = "z".repeat(64);
        assert!(matches!(
            SigningKey::parse(&bad),
            Err(WalletError::InvalidKeyFormat)
        ));
    }

    #[test]
    fn test_parse_rejects_zero_key() {
        let zero = "0".repeat(64);
        assert!(matches!(
            SigningKey::parse(&zero),
            Err(WalletError::InvalidKeyFormat)
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = SigningKey::parse(KEY).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(KEY));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_from_env_missing() {
        let err = WalletManager::from_env("CORE_LOGIC_TEST_UNSET_KEY").unwrap_err();
        assert!(matches!(err, WalletError::MissingKey { .. }));
        assert_eq!(
            err.to_string(),
            "Please provide CORE_LOGIC_TEST_UNSET_KEY in the environment or .env file"
        );
    }

    #[test]
    fn test_mask_address() {
        assert_eq!(
            mask_address("0x52908400098527886E0F7030069857D2E4169EE7"),
            "0x5290...9EE7"
        );
        assert_eq!(mask_address("0x1234"), "0x1234");
    }
}
