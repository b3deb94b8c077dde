//! # User Repository
//!
//! SQLite implementation of [`IdentityStore`].
//!
//! The `users` table enforces `UNIQUE COLLATE NOCASE` on `username`, and insertion is a single
//! statement. Of two racing inserts for the same name exactly one succeeds, and the loser's
//! unique violation surfaces as `AppError::Conflict`. `AUTOINCREMENT` keeps ids from ever being
//! reused, even after deletions.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, IdentityStore, UserForCreate, UserRepository};
//! # use lib_auth::{CredentialHasher, Username};
//! # async fn example() -> lib_core::Result<()> {
//! let repo = UserRepository::new(create_pool("sqlite:data/identity.db").await?);
//! repo.ensure_schema().await?;
//!
//! let credential = CredentialHasher::default().derive("Secret123")?;
//! let alice = repo
//!     .create(UserForCreate::new(Username::parse("Alice")?, credential))
//!     .await?;
//! assert_eq!(alice.username.as_str(), "alice");
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate, UserRecord};
use super::{DbPool, IdentityStore};
use crate::error::Result;
use async_trait::async_trait;
use lib_auth::{Identity, Username};
use sqlx::query_as;
use tracing::debug;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    password_salt TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// SQLite-backed identity store.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Create the `users` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for UserRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<UserRecord>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await?;

        user.map(User::into_record).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        user.as_ref().map(User::identity).transpose()
    }

    async fn list(&self) -> Result<Vec<Identity>> {
        query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(User::identity)
            .collect()
    }

    async fn create(&self, user: UserForCreate) -> Result<Identity> {
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, password_salt) VALUES (?, ?, ?)",
        )
        .bind(user.username.as_str())
        .bind(user.credential.hash_b64u())
        .bind(user.credential.salt_b64u())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("[STORE] Created user {} (id: {})", user.username, id);

        Ok(Identity::new(id, user.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use lib_auth::CredentialHasher;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Create an in-memory SQLite database for testing.
    async fn setup_test_repo() -> UserRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        let repo = UserRepository::new(pool);
        repo.ensure_schema().await.expect("Failed to create users table");
        repo
    }

    fn new_user(username: &str, password: &str) -> UserForCreate {
        let credential = CredentialHasher::default().derive(password).unwrap();
        UserForCreate::new(Username::parse(username).unwrap(), credential)
    }

    // ========== Creation Tests ==========

    #[tokio::test]
    async fn test_create_user() {
        let repo = setup_test_repo().await;

        let identity = repo.create(new_user("Alice", "Secret123")).await.unwrap();

        assert!(identity.id > 0);
        assert_eq!(identity.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_create_duplicate_username_conflicts() {
        let repo = setup_test_repo().await;
        repo.create(new_user("alice", "Secret123")).await.unwrap();

        let result = repo.create(new_user("alice", "other")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unique_constraint_ignores_case() {
        let repo = setup_test_repo().await;
        repo.create(new_user("alice", "Secret123")).await.unwrap();

        // Bypass normalization to check the constraint itself.
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, password_salt) VALUES ('ALICE', 'x', 'y')",
        )
        .execute(repo.pool())
        .await;

        assert!(matches!(result.map_err(AppError::from), Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let repo = setup_test_repo().await;
        let first = repo.create(new_user("first", "pw")).await.unwrap();

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(first.id)
            .execute(repo.pool())
            .await
            .unwrap();
        let second = repo.create(new_user("second", "pw")).await.unwrap();

        assert!(second.id > first.id);
    }

    // ========== Retrieval Tests ==========

    #[tokio::test]
    async fn test_find_by_username_returns_credential() {
        let repo = setup_test_repo().await;
        let hasher = CredentialHasher::default();
        let created = repo.create(new_user("alice", "Secret123")).await.unwrap();

        let record = repo
            .find_by_username(&Username::parse("ALICE").unwrap())
            .await
            .unwrap()
            .expect("User should be found");

        assert_eq!(record.identity, created);
        assert!(hasher.verify("Secret123", &record.credential));
        assert!(!hasher.verify("wrong", &record.credential));
    }

    #[tokio::test]
    async fn test_find_by_username_not_found() {
        let repo = setup_test_repo().await;

        let record = repo
            .find_by_username(&Username::parse("nobody").unwrap())
            .await
            .unwrap();

        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_and_list() {
        let repo = setup_test_repo().await;
        let alice = repo.create(new_user("alice", "pw")).await.unwrap();
        let bob = repo.create(new_user("bob", "pw")).await.unwrap();

        assert_eq!(repo.find_by_id(bob.id).await.unwrap(), Some(bob.clone()));
        assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
        assert_eq!(repo.list().await.unwrap(), vec![alice, bob]);
    }

    #[tokio::test]
    async fn test_corrupt_credential_is_internal_error() {
        let repo = setup_test_repo().await;
        sqlx::query(
            "INSERT INTO users (username, password_hash, password_salt) VALUES ('mallory', 'AAAA', 'AAAA')",
        )
        .execute(repo.pool())
        .await
        .unwrap();

        let result = repo
            .find_by_username(&Username::parse("mallory").unwrap())
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
