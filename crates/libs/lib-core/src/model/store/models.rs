use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use lib_auth::{Credential, Identity, Username};
use sqlx::FromRow;

/// Row of the `users` table.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn into_record(self) -> Result<UserRecord> {
        Ok(UserRecord {
            identity: self.identity()?,
            credential: Credential::from_b64u(&self.password_hash, &self.password_salt)?,
            created_at: self.created_at,
        })
    }

    pub fn identity(&self) -> Result<Identity> {
        let username = Username::parse(&self.username)
            .map_err(|e| AppError::Internal(format!("Stored username is invalid: {}", e)))?;
        Ok(Identity::new(self.id, username))
    }
}

/// An identity together with its stored credential.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub identity: Identity,
    pub credential: Credential,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new identity.
///
/// The credential must already be derived; plaintext passwords never reach the store.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub username: Username,
    pub credential: Credential,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(username: Username, credential: Credential) -> Self {
        Self {
            username,
            credential,
        }
    }
}
