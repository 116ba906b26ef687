//! Quest Board host entry point.

use std::error::Error;
use std::sync::Arc;

use questboard_core::clock::SystemClock;
use questboard_notify::dispatch::dispatch;
use questboard_notify::release::announce_release;
use questboard_persistence::fs_snapshot_store::FsSnapshotStore;
use questboard_persistence::manager::PersistenceManager;
use questboard_router::router::ActionRouter;
use questboard_session::application::session_store::SessionStore;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use questboard_bot::config::BotConfig;
use questboard_bot::error::AppError;
use questboard_bot::feedback::FeedbackLog;
use questboard_bot::outbox::OutboxNotifier;
use questboard_bot::state::AppState;
use questboard_bot::{release_notes, routes, tasks};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting quest board");

    let config = BotConfig::from_env()?;
    let restart = run(config).await?;

    if restart {
        reexec()?;
    }
    Ok(())
}

/// Serves until shutdown. Returns whether a restart was requested.
async fn run(config: BotConfig) -> Result<bool, AppError> {
    let persistence = PersistenceManager::new(Arc::new(FsSnapshotStore::new(
        &config.snapshot_path,
        &config.backup_path,
    )));
    let board = persistence.load().await?;

    let engine = ActionRouter::new(
        board,
        SessionStore::new(config.session_timeout),
        Arc::new(config.admins.clone()),
        Arc::new(SystemClock),
    );
    let shutdown = CancellationToken::new();
    let state = AppState::new(
        engine,
        Arc::new(OutboxNotifier::new(config.outbox_capacity)),
        persistence.clone(),
        FeedbackLog::new(&config.feedback_path),
        shutdown.clone(),
    );

    if let Some(release_id) = &config.release_id {
        let note = release_notes::load_note(&config.release_notes_dir, release_id).await?;
        let announcements = {
            let mut engine = state.engine.lock().await;
            announce_release(engine.board_mut(), release_id, note.as_deref())
        };
        let report = dispatch(state.notifier.as_ref(), &announcements).await;
        tracing::info!(
            delivered = report.delivered,
            failed = report.failed,
            "release announcement dispatched"
        );
    }

    let snapshots = tasks::spawn_snapshot_task(
        Arc::clone(&state.engine),
        persistence.clone(),
        config.snapshot_interval,
        shutdown.clone(),
    );

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let signal = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("interrupt received"),
                () = signal.cancelled() => {}
            }
            signal.cancel();
        })
        .await?;

    if let Err(e) = snapshots.await {
        tracing::error!(error = %e, "snapshot task ended abnormally");
    }
    tasks::save_board(&state.engine, &persistence).await?;
    tracing::info!("final snapshot saved");

    Ok(state.restart_requested())
}

/// Replaces the process with a fresh copy of itself.
#[cfg(unix)]
fn reexec() -> Result<(), AppError> {
    use std::os::unix::process::CommandExt;

    let exe = std::env::current_exe()?;
    tracing::info!(exe = %exe.display(), "restarting");
    let err = std::process::Command::new(exe)
        .args(std::env::args_os().skip(1))
        .exec();
    Err(AppError::Server(err))
}

/// Without `exec`, exit and leave the restart to the supervisor.
#[cfg(not(unix))]
fn reexec() -> Result<(), AppError> {
    tracing::info!("restart requested, exiting for the supervisor to restart");
    Ok(())
}
