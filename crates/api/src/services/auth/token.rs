//! Signed bearer tokens.
//!
//! HS256 JWTs carrying the user ID as `sub`. Tokens are derived credentials:
//! issued at registration and never persisted.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use haven_core::UserId;

use super::AuthError;

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 12;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Issues and verifies bearer tokens for authenticated users.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Sign a token for a user, valid for twelve hours.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        let exp = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: user_id.to_string(),
            exp: usize::try_from(exp.timestamp()).unwrap_or(usize::MAX),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenSigning(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its user ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for any malformed, expired, or
    /// badly-signed token.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|_| AuthError::InvalidToken)?;

        let id: i32 = data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(UserId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&SecretString::from("kX9#mP2$vL8@qW5!nR3^tZ7&yB1*uC4%"))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let codec = codec();
        let token = codec.issue(UserId::new(42)).expect("issue token");
        assert!(!token.is_empty());

        let user_id = codec.verify(&token).expect("verify token");
        assert_eq!(user_id, UserId::new(42));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let codec = codec();
        assert!(matches!(
            codec.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = codec().issue(UserId::new(1)).expect("issue token");

        let other = TokenCodec::new(&SecretString::from("zQ4!wE8@rT2#yU6$iO0%pA3^sD7&fG1*"));
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }
}
