//! Token verification port.
//!
//! The core only needs to know which subject a credential names. How the
//! credential is checked (signed JWT, session store, test double) is an
//! adapter concern.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `AuthError::InvalidToken` for malformed or badly signed tokens
//! - Return `AuthError::TokenExpired` for expired tokens
//! - Return `AuthError::ServiceUnavailable` for transient failures
//! - Never panic on untrusted input

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, SubjectId};

/// Verifies an opaque credential and returns the subject it names.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` (no `Bearer ` prefix).
    async fn verify(&self, token: &str) -> Result<SubjectId, AuthError>;
}
