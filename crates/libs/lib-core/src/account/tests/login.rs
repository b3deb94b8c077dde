//! # Login Tests

use super::*;

async fn service_with_alice() -> AccountService<UserRepository> {
    let service = setup_service().await;
    service
        .register(RegisterRequest::new("Alice", "Secret123"))
        .await
        .expect("Registration should succeed in test");
    service
}

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let service = service_with_alice().await;

    // Act
    let user = service
        .login(LoginRequest::new("alice", "Secret123"))
        .await
        .expect("Login should succeed");

    // Assert
    assert_eq!(user.username, "alice");
    let claims = service.authenticate(&user.token).unwrap();
    assert_eq!(claims.unique_name, "alice");
    assert_eq!(claims.user_id().unwrap(), stored(&service, "alice").await.identity.id);
}

#[tokio::test]
async fn test_login_is_case_insensitive() {
    let service = service_with_alice().await;

    for name in ["ALICE", "Alice", "aLIce"] {
        let user = service
            .login(LoginRequest::new(name, "Secret123"))
            .await
            .unwrap_or_else(|e| panic!("{name} should log in: {e}"));
        assert_eq!(user.username, "alice");
    }
}

#[tokio::test]
async fn test_login_password_is_case_sensitive() {
    let service = service_with_alice().await;

    let result = service.login(LoginRequest::new("alice", "secret123")).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_the_same() {
    let service = service_with_alice().await;

    let wrong_password = service
        .login(LoginRequest::new("alice", "wrong"))
        .await
        .unwrap_err();
    let unknown_user = service
        .login(LoginRequest::new("nobody", "Secret123"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::Unauthorized));
    assert!(matches!(unknown_user, AppError::Unauthorized));
    assert_eq!(wrong_password.user_message(), unknown_user.user_message());
    assert_eq!(wrong_password.status_code(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_failed_login_has_no_side_effects() {
    let service = service_with_alice().await;
    let before = stored(&service, "alice").await;

    let _ = service.login(LoginRequest::new("alice", "wrong")).await;
    let _ = service.login(LoginRequest::new("nobody", "wrong")).await;

    let after = stored(&service, "alice").await;
    assert_eq!(before.credential, after.credential);
    assert_eq!(service.list_members().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_empty_password_fails() {
    let service = service_with_alice().await;

    let result = service.login(LoginRequest::new("alice", "")).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_login_malformed_username_is_validation_error() {
    let service = service_with_alice().await;

    let result = service.login(LoginRequest::new("alice smith", "Secret123")).await;

    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}
