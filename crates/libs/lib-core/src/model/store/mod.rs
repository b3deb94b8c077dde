//! # Identity Store
//!
//! The persistence seam consumed by the account flows, plus its SQLite implementation.
//!
//! Uniqueness of the normalized username is enforced by the store *at write time*. The
//! account flows pre-check for a friendlier error, but only the write decides which of two
//! concurrent registrations wins.

// region: --- Modules
pub mod models;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use models::{UserForCreate, UserRecord};
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::error::Result;
use async_trait::async_trait;
use lib_auth::{Identity, Username};
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::str::FromStr;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Storage operations the account flows depend on.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up an identity and its credential by normalized username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<UserRecord>>;

    /// Look up an identity by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>>;

    /// All identities, ordered by id.
    async fn list(&self) -> Result<Vec<Identity>>;

    /// Atomically persist a new identity with its credential.
    ///
    /// Fails with `AppError::Conflict` if the username is already taken.
    async fn create(&self, user: UserForCreate) -> Result<Identity>;
}

/// Create a new SQLite connection pool, creating the database file if missing.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
