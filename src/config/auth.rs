//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest HS256 secret accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 shared secret)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to verify token signatures
    pub jwt_secret: SecretString,

    /// Subject allowed to cancel across every room
    #[serde(default = "default_admin_subject")]
    pub admin_subject: String,

    /// Clock skew tolerated on `exp`, in seconds
    #[serde(default)]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(jwt_secret.into()),
            admin_subject: default_admin_subject(),
            leeway_secs: 0,
        }
    }

    pub fn is_admin(&self, subject: &str) -> bool {
        subject == self.admin_subject
    }

    /// Validate authentication configuration
    ///
    /// In production, the secret must be at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.admin_subject.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ADMIN_SUBJECT"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        Ok(())
    }
}

fn default_admin_subject() -> String {
    "admin".to_string()
}
