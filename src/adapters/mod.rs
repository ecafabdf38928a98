//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Token verifiers (HS256 JWT, mock)
//! - `http` - REST endpoints for the operator front end
//! - `websocket` - Slot worker gateway and the hub that owns all room state

pub mod auth;
pub mod http;
pub mod websocket;

pub use auth::{JwtTokenVerifier, MockTokenVerifier};
pub use websocket::{spawn_hub, HubHandle, HubSettings};
