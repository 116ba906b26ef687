//! Quest Board: HTTP host.
//!
//! Wraps the engine in an axum service: inbound messages and button presses
//! are routed through the shared [`ActionRouter`](questboard_router::router::ActionRouter),
//! notifications queue up in per-recipient outboxes, and a background task
//! snapshots the board to disk.

pub mod config;
pub mod error;
pub mod feedback;
pub mod outbox;
pub mod release_notes;
pub mod routes;
pub mod state;
pub mod tasks;
