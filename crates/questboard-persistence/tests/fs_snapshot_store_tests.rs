//! Integration tests for `FsSnapshotStore`.

use questboard_board::domain::aggregates::QuestBoard;
use questboard_board::domain::entities::QuestField;
use questboard_core::error::DomainError;
use questboard_core::ids::UserId;
use questboard_core::repository::{Snapshot, SnapshotStore};
use questboard_persistence::fs_snapshot_store::FsSnapshotStore;

fn sample_board() -> QuestBoard {
    let mut board = QuestBoard::new();
    board.register_user(UserId(1), "Ada").unwrap();
    board.register_user(UserId(2), "Bob").unwrap();
    let quest = board.create_quest(UserId(1)).unwrap();
    board
        .set_field(UserId(1), quest, QuestField::Title, "Fix fence")
        .unwrap();
    board.toggle_accept(UserId(1), quest, UserId(2)).unwrap();
    board
}

// --- load ---

#[tokio::test]
async fn test_load_missing_file_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsSnapshotStore::with_default_backup(dir.path().join("board.json"));

    let loaded = store.load().await.unwrap();

    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_load_garbage_without_backup_is_infrastructure_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = FsSnapshotStore::with_default_backup(&path);

    let result = store.load().await;

    assert!(matches!(result, Err(DomainError::Infrastructure(_))));
}

#[tokio::test]
async fn test_load_falls_back_to_backup_when_primary_is_corrupt() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");
    let store = FsSnapshotStore::with_default_backup(&path);
    let snapshot = sample_board().to_snapshot();
    store.save(&snapshot).await.unwrap();
    store.save(&snapshot).await.unwrap();
    std::fs::write(&path, "").unwrap();

    // Act
    let loaded = store.load().await.unwrap();

    // Assert
    assert_eq!(loaded, Some(snapshot));
}

// --- save ---

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsSnapshotStore::with_default_backup(dir.path().join("board.json"));
    let board = sample_board();

    store.save(&board.to_snapshot()).await.unwrap();
    let loaded = store.load().await.unwrap().unwrap();

    assert_eq!(QuestBoard::from_snapshot(loaded).unwrap(), board);
}

#[tokio::test]
async fn test_save_keeps_previous_snapshot_as_backup() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let store = FsSnapshotStore::with_default_backup(dir.path().join("board.json"));
    let first = Snapshot::default();
    let second = sample_board().to_snapshot();

    // Act
    store.save(&first).await.unwrap();
    let backup_after_first = store.backup_path().exists();
    store.save(&second).await.unwrap();

    // Assert
    assert!(!backup_after_first);
    let backup: Snapshot =
        serde_json::from_slice(&std::fs::read(store.backup_path()).unwrap()).unwrap();
    assert_eq!(backup, first);
    assert_eq!(store.load().await.unwrap(), Some(second));
}

#[tokio::test]
async fn test_save_creates_missing_directories_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state").join("board.json");
    let store = FsSnapshotStore::with_default_backup(&path);

    store.save(&Snapshot::default()).await.unwrap();

    assert!(path.exists());
    assert!(!dir.path().join("nested/state/board.json.tmp").exists());
}
