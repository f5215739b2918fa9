//! HS256 login tokens.

use crate::errors::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT claims carried by a login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id as a decimal string
    pub sub: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Issued at, seconds since the epoch
    pub iat: i64,
}

impl Claims {
    /// The account id named by `sub`.
    pub fn account_id(&self) -> Result<i64> {
        self.sub.parse().map_err(|_| Error::Unauthenticated)
    }
}

/// Issues and verifies login tokens with one shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Builds keys from a shared secret and a token lifetime in hours.
    #[must_use]
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issues a token whose subject is `account_id`.
    pub fn issue(&self, account_id: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(Into::into)
    }

    /// Verifies signature, algorithm and expiry. Any failure is [`Error::Unauthenticated`].
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| Error::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        let keys = TokenKeys::new("test-secret", 24);
        let token = keys.issue(42).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.account_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenKeys::new("one", 24).issue(42).unwrap();
        assert!(matches!(
            TokenKeys::new("two", 24).verify(&token),
            Err(Error::Unauthenticated)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = TokenKeys::new("test-secret", -1);
        let token = keys.issue(42).unwrap();
        assert!(matches!(keys.verify(&token), Err(Error::Unauthenticated)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let keys = TokenKeys::new("test-secret", 24);
        assert!(matches!(keys.verify("not.a.jwt"), Err(Error::Unauthenticated)));
    }
}
