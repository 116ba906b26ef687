//! Quest Board: board bounded context.
//!
//! Owns every piece of durable state: the user directory, each owner's quest
//! sequence, the per-owner archive slot and the release log.

pub mod application;
pub mod domain;
