//! Shared application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use questboard_core::error::DomainError;
use questboard_notify::dispatch::{DeliveryReport, dispatch};
use questboard_persistence::manager::PersistenceManager;
use questboard_router::outcome::{Effect, Outcome};
use questboard_router::router::ActionRouter;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::feedback::FeedbackLog;
use crate::outbox::OutboxNotifier;
use crate::tasks;

/// Shared state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The engine; one action at a time.
    pub engine: Arc<Mutex<ActionRouter>>,
    /// Where notifications are queued.
    pub notifier: Arc<OutboxNotifier>,
    /// Snapshot storage.
    pub persistence: PersistenceManager,
    /// Operator feedback log.
    pub feedback: FeedbackLog,
    /// Cancelled to stop the server.
    pub shutdown: CancellationToken,
    restart_requested: Arc<AtomicBool>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("persistence", &self.persistence)
            .field("feedback", &self.feedback)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Creates a new `AppState`.
    #[must_use]
    pub fn new(
        engine: ActionRouter,
        notifier: Arc<OutboxNotifier>,
        persistence: PersistenceManager,
        feedback: FeedbackLog,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            notifier,
            persistence,
            feedback,
            shutdown,
            restart_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an admin asked for a restart.
    #[must_use]
    pub fn restart_requested(&self) -> bool {
        self.restart_requested.load(Ordering::SeqCst)
    }

    /// Delivers notifications and carries out effects of an outcome.
    ///
    /// Runs after the engine lock has been released. Delivery failures are
    /// only counted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if an effect could not be
    /// carried out. Mutations already applied to the board stay applied.
    pub async fn settle(&self, outcome: &Outcome) -> Result<DeliveryReport, DomainError> {
        let report = dispatch(self.notifier.as_ref(), &outcome.notifications).await;
        for effect in &outcome.effects {
            self.apply(effect).await?;
        }
        Ok(report)
    }

    async fn apply(&self, effect: &Effect) -> Result<(), DomainError> {
        match effect {
            Effect::RecordFeedback(entry) => self.feedback.append(entry).await,
            Effect::Restart => {
                if let Err(e) = tasks::save_board(&self.engine, &self.persistence).await {
                    error!(error = %e, "restart aborted, snapshot failed");
                    return Err(e);
                }
                info!("restart requested, stopping server");
                self.restart_requested.store(true, Ordering::SeqCst);
                self.shutdown.cancel();
                Ok(())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use questboard_core::ids::UserId;
    use questboard_core::notification::Notification;
    use questboard_router::outcome::Reply;
    use questboard_test_support::{FailingSnapshotStore, InMemorySnapshotStore};

    use super::testing::{test_state, test_state_with_store};
    use super::*;

    #[tokio::test]
    async fn test_settle_queues_notifications() {
        // Arrange
        let (state, _dir) = test_state();
        let outcome = Outcome::reply(Reply::new("ok")).with_notifications(vec![
            Notification::text(UserId(1), "a"),
            Notification::text(UserId(2), "b"),
        ]);

        // Act
        let report = state.settle(&outcome).await.unwrap();

        // Assert
        assert_eq!(report.delivered, 2);
        assert_eq!(state.notifier.pending(UserId(1)), 1);
        assert_eq!(state.notifier.pending(UserId(2)), 1);
    }

    #[tokio::test]
    async fn test_restart_saves_then_cancels() {
        // Arrange
        let store = Arc::new(InMemorySnapshotStore::new());
        let (state, _dir) = test_state_with_store(store.clone());
        let outcome = Outcome::reply(Reply::new("bye")).with_effect(Effect::Restart);

        // Act
        state.settle(&outcome).await.unwrap();

        // Assert
        assert_eq!(store.saved_snapshots().len(), 1);
        assert!(state.shutdown.is_cancelled());
        assert!(state.restart_requested());
    }

    #[tokio::test]
    async fn test_restart_is_aborted_when_save_fails() {
        let (state, _dir) = test_state_with_store(Arc::new(FailingSnapshotStore));
        let outcome = Outcome::reply(Reply::new("bye")).with_effect(Effect::Restart);

        let result = state.settle(&outcome).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(!state.shutdown.is_cancelled());
        assert!(!state.restart_requested());
    }
}
