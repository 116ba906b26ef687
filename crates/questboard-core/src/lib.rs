//! Quest Board Core: shared domain abstractions.
//!
//! This crate defines the identifiers, error taxonomy and seams (clock,
//! notifier, snapshot store) that every other crate depends on. It contains
//! no infrastructure code.

pub mod callback;
pub mod clock;
pub mod error;
pub mod ids;
pub mod markup;
pub mod notification;
pub mod policy;
pub mod repository;
