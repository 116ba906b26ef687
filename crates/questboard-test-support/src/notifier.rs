//! Test notifier: records deliveries and fails for chosen recipients.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use questboard_core::ids::UserId;
use questboard_core::notification::{DeliveryError, Notification, Notifier};

/// A notifier that records every successful delivery. Recipients marked
/// unreachable fail with `DeliveryError::Unreachable` and are not recorded.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    unreachable: HashSet<UserId>,
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create a notifier that reaches everyone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that cannot reach `ids`.
    #[must_use]
    pub fn with_unreachable(ids: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            unreachable: ids.into_iter().collect(),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of everything delivered so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        if self.unreachable.contains(&notification.recipient) {
            return Err(DeliveryError::Unreachable(notification.recipient));
        }
        self.delivered.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// A notifier that rejects every delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn deliver(&self, _notification: &Notification) -> Result<(), DeliveryError> {
        Err(DeliveryError::Rejected("transport down".into()))
    }
}
