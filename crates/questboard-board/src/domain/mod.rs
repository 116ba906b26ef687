//! Domain layer for the board context.

pub mod aggregates;
pub mod entities;
pub mod snapshot;
