//! In-process outbox standing in for a chat transport.
//!
//! Each recipient gets a bounded FIFO queue; clients poll
//! `GET /api/v1/outbox/{user_id}` to drain theirs.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use questboard_core::ids::UserId;
use questboard_core::notification::{DeliveryError, Notification, Notifier};

/// Queues notifications per recipient until they are drained.
#[derive(Debug)]
pub struct OutboxNotifier {
    capacity: usize,
    queues: Mutex<HashMap<UserId, VecDeque<Notification>>>,
}

impl OutboxNotifier {
    /// Creates an outbox holding at most `capacity` messages per recipient.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queues: Mutex::new(HashMap::new()),
        }
    }

    /// Removes and returns everything queued for `user`, oldest first.
    pub fn drain(&self, user: UserId) -> Vec<Notification> {
        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        queues
            .remove(&user)
            .map(Vec::from)
            .unwrap_or_default()
    }

    /// Number of messages waiting for `user`.
    pub fn pending(&self, user: UserId) -> usize {
        let queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        queues.get(&user).map_or(0, VecDeque::len)
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        let queue = queues.entry(notification.recipient).or_default();
        if queue.len() >= self.capacity {
            return Err(DeliveryError::Rejected(format!(
                "outbox for {} is full ({} messages)",
                notification.recipient, self.capacity
            )));
        }
        queue.push_back(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_returns_messages_in_order_and_empties_queue() {
        // Arrange
        let outbox = OutboxNotifier::new(8);
        outbox
            .deliver(&Notification::text(UserId(1), "first"))
            .await
            .unwrap();
        outbox
            .deliver(&Notification::text(UserId(1), "second"))
            .await
            .unwrap();
        outbox
            .deliver(&Notification::text(UserId(2), "other"))
            .await
            .unwrap();

        // Act
        let drained = outbox.drain(UserId(1));

        // Assert
        let texts: Vec<&str> = drained.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(outbox.pending(UserId(1)), 0);
        assert_eq!(outbox.pending(UserId(2)), 1);
    }

    #[tokio::test]
    async fn test_full_queue_rejects_delivery() {
        let outbox = OutboxNotifier::new(1);
        outbox
            .deliver(&Notification::text(UserId(1), "kept"))
            .await
            .unwrap();

        let result = outbox.deliver(&Notification::text(UserId(1), "dropped")).await;

        assert!(matches!(result, Err(DeliveryError::Rejected(_))));
        assert_eq!(outbox.drain(UserId(1))[0].text, "kept");
    }

    #[test]
    fn test_drain_unknown_user_is_empty() {
        assert!(OutboxNotifier::new(4).drain(UserId(99)).is_empty());
    }
}
