//! HS256 JWT verifier.
//!
//! Tokens carry the subject in a `user` claim (`sub` is accepted too) and
//! must carry `exp`.

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, SubjectId};
use crate::ports::TokenVerifier;

/// Claims read from an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: u64,
}

impl Claims {
    pub fn for_user(user: impl Into<String>, exp: u64) -> Self {
        Self {
            user: Some(user.into()),
            sub: None,
            exp,
        }
    }

    /// `user` wins over `sub` when both are present.
    pub fn subject(self) -> Option<String> {
        self.user.or(self.sub)
    }
}

pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &SecretString, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.leeway_secs)
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<SubjectId, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                tracing::debug!("Token expired");
                AuthError::TokenExpired
            }
            _ => {
                tracing::debug!("Token validation failed: {}", e);
                AuthError::InvalidToken
            }
        })?;

        let subject = data.claims.subject().ok_or_else(|| {
            tracing::debug!("Token carries neither user nor sub");
            AuthError::InvalidToken
        })?;
        SubjectId::new(subject).map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    fn verifier() -> JwtTokenVerifier {
        JwtTokenVerifier::new(&SecretString::new(SECRET.to_string()), 0)
    }

    fn token(claims: serde_json::Value, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[tokio::test]
    async fn valid_token_yields_user_claim() {
        let jwt = token(serde_json::json!({"user": "alice", "exp": in_one_hour()}), SECRET);

        let subject = verifier().verify(&jwt).await.unwrap();
        assert_eq!(subject.as_str(), "alice");
    }

    #[tokio::test]
    async fn sub_claim_is_accepted() {
        let jwt = token(serde_json::json!({"sub": "bob", "exp": in_one_hour()}), SECRET);

        assert_eq!(verifier().verify(&jwt).await.unwrap().as_str(), "bob");
    }

    #[tokio::test]
    async fn user_claim_wins_when_sub_is_also_present() {
        let jwt = token(
            serde_json::json!({"user": "alice", "sub": "issuer-id-42", "exp": in_one_hour()}),
            SECRET,
        );

        assert_eq!(verifier().verify(&jwt).await.unwrap().as_str(), "alice");
    }

    #[tokio::test]
    async fn token_without_subject_is_invalid() {
        let jwt = token(serde_json::json!({"exp": in_one_hour()}), SECRET);

        assert_eq!(verifier().verify(&jwt).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let jwt = token(
            serde_json::json!({"user": "alice", "exp": Utc::now().timestamp() - 3600}),
            SECRET,
        );

        assert_eq!(verifier().verify(&jwt).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_signature_is_invalid() {
        let jwt = token(
            serde_json::json!({"user": "alice", "exp": in_one_hour()}),
            "some-other-secret-that-is-also-long-enough",
        );

        assert_eq!(verifier().verify(&jwt).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_and_blank_subjects_are_invalid() {
        assert_eq!(verifier().verify("not-a-jwt").await, Err(AuthError::InvalidToken));

        let blank = token(serde_json::json!({"user": " ", "exp": in_one_hour()}), SECRET);
        assert_eq!(verifier().verify(&blank).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn missing_exp_is_invalid() {
        let jwt = token(serde_json::json!({"user": "alice"}), SECRET);
        assert_eq!(verifier().verify(&jwt).await, Err(AuthError::InvalidToken));
    }
}
