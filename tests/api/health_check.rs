//! tests/api/health_check.rs

use crate::helpers::{spawn_app, TestApp};

#[tokio::test]
async fn health_check_success() {
    // Arrange
    let test_app: TestApp = spawn_app().await;

    // Act
    let response = test_app.get_health_check().await;

    // Assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}
