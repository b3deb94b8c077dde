//! # Account Flow Tests
//!
//! Test suite for registration, login and token authentication.

mod login;

use super::*;
use crate::config::tests::test_config;
use crate::model::store::{UserRecord, UserRepository};
use sqlx::sqlite::SqlitePoolOptions;

/// Setup an account service over an in-memory database.
///
/// One connection: shared-cache in-memory databases report table locks to concurrent
/// writers instead of waiting on them.
pub async fn setup_service() -> AccountService<UserRepository> {
    setup_service_with(test_config()).await
}

pub async fn setup_service_with(config: Config) -> AccountService<UserRepository> {
    config.validate().expect("Test config should be valid");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    let repo = UserRepository::new(pool);
    repo.ensure_schema()
        .await
        .expect("Failed to create users table");

    AccountService::from_config(repo, &config).expect("Service should build from test config")
}

/// Fetch the stored record for `username`, which must exist.
pub async fn stored(service: &AccountService<UserRepository>, username: &str) -> UserRecord {
    service
        .store()
        .find_by_username(&Username::parse(username).unwrap())
        .await
        .unwrap()
        .expect("User should be persisted")
}
