//! Integration tests for the users crate with a real SQLite store

use std::sync::Arc;

use tempfile::TempDir;
use zccore_config::DatabaseConfig;
use zccore_database::SqliteDocumentStore;
use zccore_users::{CreateUserRequest, UpdateUserRequest, UserError, UserService};

/// Helper function to create a service over a fresh database
async fn create_test_service() -> (UserService, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test_users.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", db_path.display()),
        max_connections: 4,
        ..DatabaseConfig::default()
    };

    let store = SqliteDocumentStore::from_config(&config)
        .await
        .expect("Failed to create test database");
    (UserService::new(Arc::new(store)), temp_dir)
}

fn create_test_user_request(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        display_name: None,
        phone: Some("+2348030000000".to_string()),
    }
}

#[tokio::test]
async fn test_user_lifecycle() {
    let (service, _temp_dir) = create_test_service().await;

    let created = service
        .create_user(create_test_user_request("test@example.com"))
        .await
        .unwrap();
    let fetched = service.get_user(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = service
        .update_user(
            &created.id,
            UpdateUserRequest {
                display_name: Some("Tester".to_string()),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("Tester"));
    assert_eq!(updated.email, "test@example.com");

    service.delete_user(&created.id).await.unwrap();
    assert!(matches!(
        service.get_user(&created.id).await,
        Err(UserError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_duplicate_email_rejected_by_store() {
    let (service, _temp_dir) = create_test_service().await;

    service
        .create_user(create_test_user_request("test@example.com"))
        .await
        .unwrap();
    let result = service
        .create_user(create_test_user_request("test@example.com"))
        .await;
    assert!(matches!(result, Err(UserError::EmailAlreadyExists)));
}

#[tokio::test]
async fn test_email_change_to_taken_address() {
    let (service, _temp_dir) = create_test_service().await;

    service
        .create_user(create_test_user_request("first@example.com"))
        .await
        .unwrap();
    let second = service
        .create_user(create_test_user_request("second@example.com"))
        .await
        .unwrap();

    let result = service
        .update_user(
            &second.id,
            UpdateUserRequest {
                email: Some("first@example.com".to_string()),
                ..UpdateUserRequest::default()
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::EmailAlreadyExists)));

    let unchanged = service.get_user(&second.id).await.unwrap();
    assert_eq!(unchanged.email, "second@example.com");
}

#[tokio::test]
async fn test_update_unknown_user() {
    let (service, _temp_dir) = create_test_service().await;

    let result = service
        .update_user(
            "507f1f77bcf86cd799439011",
            UpdateUserRequest {
                phone: Some("1".to_string()),
                ..UpdateUserRequest::default()
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::UserNotFound)));
}
