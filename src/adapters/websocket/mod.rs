//! WebSocket adapters for slot workers and status listeners.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Gateway (one task pair per socket)               │
//! │   handshake → reader: frames → HubEvent   writer: Outbound → frames  │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ HubEvent queue
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           Hub (single task)                          │
//! │   Room: alice          Room: bob                                     │
//! │   ├── Slot1: conn-a    ├── Slot1: conn-d                             │
//! │   ├── Slot2: conn-b    └── listeners: conn-e                         │
//! │   └── listeners: conn-c                                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`hub`] - Single-consumer coordinator for rooms, slots, and bets
//! - [`handler`] - Axum WebSocket upgrade handler and handshake
//! - [`scheduler`] - Tokio-backed bet timers

pub mod handler;
pub mod hub;
pub mod messages;
pub mod scheduler;

pub use handler::{websocket_router, ws_handler, GatewayError, GatewayState};
pub use hub::{spawn_hub, Hub, HubCommand, HubEvent, HubHandle, HubSettings};
pub use messages::{BetErrorReport, ClientMessage, ServerMessage};
pub use scheduler::TokioScheduler;
