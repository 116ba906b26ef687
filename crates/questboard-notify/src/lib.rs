//! Quest Board: notification fan-out.
//!
//! [`fanout`] decides who hears about a mutation, [`dispatch`] pushes those
//! messages through a [`Notifier`](questboard_core::notification::Notifier)
//! without letting one unreachable recipient spoil the batch, and [`release`]
//! handles the once-per-release announcement sent at startup.

pub mod dispatch;
pub mod fanout;
pub mod release;
