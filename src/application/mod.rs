//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `VaultEngine`, the single entry point for every
//! presentation-layer intent. It owns the session context and the order
//! history handle, and schedules order status transitions on the tokio clock.

pub mod engine;
pub mod session;
