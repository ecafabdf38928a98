//! Authentication types for the domain layer.
//!
//! The only thing the core needs from a credential is the subject it names.
//! Any verifier (JWT, opaque session store, test double) produces these
//! types via the `TokenVerifier` port.

use thiserror::Error;

/// Authentication errors that can occur during credential verification.
///
/// These errors are **domain-centric** - they describe what went wrong
/// from the application's perspective, not the verifier's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The credential is missing from the handshake.
    #[error("Missing token")]
    MissingToken,

    /// The token is malformed or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The caller is authenticated but not allowed to perform the action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The verifier is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the client should obtain a fresh credential.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }

    /// Message sent to the peer in an `error` frame.
    ///
    /// Never leaks verifier internals.
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::ServiceUnavailable(_) => "Authentication unavailable",
            AuthError::InsufficientPermissions => "Insufficient permissions",
            _ => "Invalid token",
        }
    }
}
