//! Application layer for the board context.

pub mod query_handlers;
