//! Sequential delivery with per-recipient failure isolation.

use questboard_core::notification::{Notification, Notifier};
use tracing::{debug, warn};

/// Outcome of one dispatch batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Messages the notifier accepted.
    pub delivered: usize,
    /// Messages that failed and were skipped.
    pub failed: usize,
}

/// Delivers `notifications` in order.
///
/// A failed delivery is logged and skipped; the rest of the batch still goes
/// out and nothing is retried.
pub async fn dispatch(notifier: &dyn Notifier, notifications: &[Notification]) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for notification in notifications {
        match notifier.deliver(notification).await {
            Ok(()) => {
                debug!(recipient = %notification.recipient, "notification delivered");
                report.delivered += 1;
            }
            Err(error) => {
                warn!(recipient = %notification.recipient, %error, "notification dropped");
                report.failed += 1;
            }
        }
    }
    report
}
