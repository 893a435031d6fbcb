//! # Bearer tokens — HS256 signed with a process-wide secret
//!
//! Every authenticated request carries a compact signed token in the
//! `Authorization: JWT <token>` header. The payload holds the subject user
//! id, username, email, and an expiry; encoding and decoding both use the
//! shared secret from settings. Verification failures (malformed token, bad
//! signature, past expiry) come back as [`ApiError::Unauthorized`] so
//! handlers can return a structured 401 instead of falling over.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user id.
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Keys derived from the shared secret, built once at startup.
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl TokenKeys {
    pub fn new(secret: &str, expiration_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            expiration_hours: expiration_hours as i64,
        }
    }

    /// Issue a fresh token for a user.
    pub fn issue(&self, user: &User) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode token: {e}").into())
    }

    /// Decode and verify a token, including its expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "ricky@gmail.com".into(),
            email: "ricky@gmail.com".into(),
            password_hash: String::new(),
            first_name: "Ricky".into(),
            last_name: "Putra".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_round_trips_the_subject() {
        let keys = TokenKeys::new("test-secret", 24);
        let user = sample_user();
        let token = keys.issue(&user).unwrap();
        assert!(!token.is_empty());

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.username);
        assert_eq!(claims.email, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let keys = TokenKeys::new("test-secret", 24);
        let token = keys.issue(&sample_user()).unwrap();

        let other = TokenKeys::new("another-secret", 24);
        assert!(matches!(
            other.verify(&token),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Issued with a negative lifetime so the expiry is already past.
        let keys = TokenKeys::new("test-secret", 0);
        let expired = TokenKeys {
            encoding_key: EncodingKey::from_secret("test-secret".as_ref()),
            decoding_key: DecodingKey::from_secret("test-secret".as_ref()),
            expiration_hours: -2,
        };
        let token = expired.issue(&sample_user()).unwrap();
        assert!(matches!(keys.verify(&token), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = TokenKeys::new("test-secret", 24);
        assert!(keys.verify("not.a.token").is_err());
        assert!(keys.verify("").is_err());
    }
}
