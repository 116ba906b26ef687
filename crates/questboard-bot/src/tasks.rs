//! Background work.

use std::time::Duration;

use questboard_core::error::DomainError;
use questboard_persistence::manager::PersistenceManager;
use questboard_router::router::ActionRouter;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Copies the board under the lock, then writes it with the lock released.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn save_board(
    engine: &Mutex<ActionRouter>,
    persistence: &PersistenceManager,
) -> Result<(), DomainError> {
    let snapshot = engine.lock().await.board().to_snapshot();
    persistence.save_snapshot(&snapshot).await
}

/// Saves the board every `every` until `shutdown` is cancelled.
///
/// The first save happens immediately. A failed save is logged and retried on
/// the next tick.
pub fn spawn_snapshot_task(
    engine: std::sync::Arc<Mutex<ActionRouter>>,
    persistence: PersistenceManager,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    info!("snapshot task stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = save_board(&engine, &persistence).await {
                        error!(error = %e, "periodic snapshot failed");
                    }
                }
            }
        }
    })
}
