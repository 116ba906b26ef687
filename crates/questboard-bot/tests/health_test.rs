//! Integration test for the health endpoint.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_reports_ok_and_version() {
    // Arrange
    let app = common::build_test_app(false);

    // Act
    let (status, body) = common::get_json(app.router(), "/health").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
