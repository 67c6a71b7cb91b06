use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;

/// Claims carried by every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Unique token id, keeps two tokens issued in the same second distinct
    pub jti: Uuid,
    /// Issued-at (unix timestamp seconds)
    pub iat: u64,
    /// Expiry (unix timestamp seconds)
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(jsonwebtoken::errors::Error),
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Signs and validates session JWTs with the configured HMAC secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    lifetime: Duration,
}

fn timestamp(value: DateTime<Utc>) -> u64 {
    u64::try_from(value.timestamp()).unwrap_or(0)
}

impl TokenIssuer {
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = config.jwt.secret.as_bytes();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            algorithm: config.jwt.algorithm.into(),
            issuer: config.jwt.issuer.clone(),
            lifetime: Duration::seconds(i64::try_from(config.token_expiration).unwrap_or(i64::MAX)),
        }
    }

    /// Issue a token for `user_id`, valid from now
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token for `user_id` as if it were `now`
    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4(),
            iat: timestamp(now),
            exp: timestamp(now + self.lifetime),
            iss: self.issuer.clone(),
        };

        jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(TokenError::Sign)
    }

    /// Check signature, issuer and expiry and return the claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}
