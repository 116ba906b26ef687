//! Quest Board: action router.
//!
//! Turns inbound commands and button presses into board and session
//! mutations. Each call to [`router::ActionRouter::handle`] returns an
//! [`outcome::Outcome`]: the reply for the actor, the notifications for
//! everyone else and any host-side effects. The router itself never performs
//! I/O.

pub mod action;
pub mod command;
pub mod messages;
pub mod outcome;
pub mod render;
pub mod router;
