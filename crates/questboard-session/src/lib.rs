//! Quest Board: conversation session bounded context.
//!
//! Tracks each user's progress through the three-step title / description /
//! reward flow used to create or edit a quest. Sessions are ephemeral and are
//! never persisted.

pub mod application;
pub mod domain;
