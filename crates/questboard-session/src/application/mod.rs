//! Application layer for the session context.

pub mod session_store;
