use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::UserId;
use crate::utils::AppError;

pub const TOKEN_TTL_HOURS: i64 = 24;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: i64,    // issued at
    pub exp: i64,    // expiration
    pub jti: String, // JWT ID
}

/// Signs and verifies credentials with one static HS256 secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a credential for `user_id` valid for 24 hours.
    pub fn issue(&self, user_id: UserId) -> Result<String, AppError> {
        self.issue_with_ttl(user_id, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Issues a credential with an explicit lifetime. A negative `ttl` yields
    /// a credential that is already expired.
    pub fn issue_with_ttl(&self, user_id: UserId, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Token(format!("Failed to generate token: {}", e)))
    }

    /// Returns the user id carried by a valid credential.
    ///
    /// Bad signatures, malformed tokens, non-numeric subjects and expired
    /// tokens all yield `None`.
    pub fn verify(&self, token: &str) -> Option<UserId> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims.sub.parse().ok(),
            Err(e) => {
                log::debug!("Rejected credential: {}", e);
                None
            }
        }
    }
}
