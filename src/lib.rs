//! Pairbet - Two-slot worker pairing and synchronized bet orchestration.
//!
//! Slot workers connect over WebSocket, authenticate, and claim one of two
//! slots in their subject's room. The operator front end issues bets over
//! HTTP; the hub dispatches opposite sides to both slots, tracks each leg's
//! settlement, and cross-cancels the surviving leg when one side fails.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
