//! # Gateway Auth
//!
//! Every request carries the shared key in its body as `auth_key`. There is
//! exactly one valid key per gateway process.

pub mod crypto;

use std::fmt;

use crypto::constant_time_str_eq;

/// The shared key requests must present.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthKey(String);

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Whether `presented` matches the configured key.
    pub fn verify(&self, presented: &str) -> bool {
        constant_time_str_eq(&self.0, presented)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let key = AuthKey::new("auth");
        assert!(key.verify("auth"));
        assert!(!key.verify("nope"));
        assert!(!key.verify(""));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = AuthKey::new("s3cret");
        assert!(!format!("{:?}", key).contains("s3cret"));
    }
}
