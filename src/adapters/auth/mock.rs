//! Mock token verifier for testing.
//!
//! # Example
//!
//! ```ignore
//! use pairbet::adapters::auth::MockTokenVerifier;
//! use pairbet::domain::foundation::SubjectId;
//!
//! let verifier = MockTokenVerifier::new()
//!     .with_subject("valid-token", SubjectId::new("alice").unwrap());
//!
//! let subject = verifier.verify("valid-token").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, SubjectId};
use crate::ports::TokenVerifier;

/// Maps fixed tokens to subjects. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct MockTokenVerifier {
    tokens: HashMap<String, SubjectId>,
    /// Returned for every verification when set.
    force_error: Option<AuthError>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to `subject`.
    pub fn with_subject(mut self, token: impl Into<String>, subject: SubjectId) -> Self {
        self.tokens.insert(token.into(), subject);
        self
    }

    /// Forces all verifications to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<SubjectId, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> SubjectId {
        SubjectId::new("alice").unwrap()
    }

    #[tokio::test]
    async fn known_token_maps_to_subject() {
        let verifier = MockTokenVerifier::new().with_subject("t1", alice());

        assert_eq!(verifier.verify("t1").await, Ok(alice()));
        assert_eq!(verifier.token_count(), 1);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let verifier = MockTokenVerifier::new();
        assert_eq!(verifier.verify("t1").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let verifier = MockTokenVerifier::new()
            .with_subject("t1", alice())
            .with_error(AuthError::service_unavailable("down"));

        assert!(verifier.verify("t1").await.unwrap_err().is_transient());
    }
}
