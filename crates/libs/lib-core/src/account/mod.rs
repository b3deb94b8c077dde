//! # Account Flows
//!
//! Registration, login, and bearer-token authentication, composed from the credential hasher,
//! the token issuer/validator and an [`IdentityStore`].
//!
//! ## Overview
//!
//! - **register**: normalize the username, reject duplicates, derive a credential, persist it,
//!   and issue a token
//! - **login**: look up by normalized username, verify the password, and issue a token
//! - **authenticate**: validate a presented bearer token and return its claims
//!
//! `AccountService` holds no mutable state and no locks. It can be shared behind an `Arc` and
//! called from any number of tasks at once.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::{AccountService, Config, UserRepository};
//! use lib_core::dto::{LoginRequest, RegisterRequest};
//!
//! # async fn example(repo: UserRepository, config: Config) -> lib_core::Result<()> {
//! let accounts = AccountService::from_config(repo, &config)?;
//!
//! let user = accounts.register(RegisterRequest::new("Alice", "Secret123")).await?;
//! assert_eq!(user.username, "alice");
//!
//! let user = accounts.login(LoginRequest::new("ALICE", "Secret123")).await?;
//! let claims = accounts.authenticate(&format!("Bearer {}", user.token))?;
//! assert_eq!(claims.unique_name, "alice");
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::dto::{LoginRequest, MemberDto, RegisterRequest, UserDto};
use crate::error::{AppError, Result};
use crate::model::store::{IdentityStore, UserForCreate};
use lib_auth::pwd::{HASH_LEN, SALT_LEN};
use lib_auth::{Claims, Credential, CredentialHasher, Identity, TokenIssuer, TokenValidator, Username};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Registration, login and token authentication over an [`IdentityStore`].
pub struct AccountService<S> {
    store: S,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
    validator: TokenValidator,
    /// Verified against when the username is unknown, so that path costs the same as a
    /// wrong password.
    dummy_credential: Credential,
}

impl<S: IdentityStore> AccountService<S> {
    pub fn new(
        store: S,
        hasher: CredentialHasher,
        issuer: TokenIssuer,
        validator: TokenValidator,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
            validator,
            dummy_credential: Credential::from_parts([0; HASH_LEN], [0; SALT_LEN]),
        }
    }

    /// Build the service from validated configuration.
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        let key = Arc::new(config.signing_key()?);

        Ok(Self::new(
            store,
            CredentialHasher::new(config.pwd_policy()),
            TokenIssuer::new(key.clone(), config.token_ttl()),
            TokenValidator::new(key),
        ))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new account and return a token for it.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: malformed username or password rejected by policy
    /// - `Conflict`: the normalized username is already taken, including when a concurrent
    ///   registration wins the write
    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn register(&self, req: RegisterRequest) -> Result<UserDto> {
        info!("[REGISTER] New registration request");

        let username = Username::parse(&req.username)?;
        self.hasher.policy().check(&req.password)?;

        if self.store.find_by_username(&username).await?.is_some() {
            warn!("[REGISTER] Username already taken: {}", username);
            return Err(AppError::Conflict("Username is taken".to_string()));
        }

        debug!("[REGISTER] Deriving credential...");
        let credential = self.hasher.derive(&req.password)?;

        // The store re-checks uniqueness on write; a lost race comes back as Conflict.
        let identity = self
            .store
            .create(UserForCreate::new(username, credential))
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::Conflict(_)) {
                    warn!("[REGISTER] Lost registration race for {}", req.username);
                }
            })?;

        let token = self.issuer.issue(&identity)?;

        info!("[REGISTER] User registered (id: {})", identity.id);

        Ok(UserDto {
            username: identity.username.to_string(),
            token,
        })
    }

    /// Authenticate with username and password and return a fresh token.
    ///
    /// Unknown usernames and wrong passwords fail identically with `Unauthorized`.
    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn login(&self, req: LoginRequest) -> Result<UserDto> {
        info!("[LOGIN] Login attempt");

        let username = Username::parse(&req.username)?;

        let record = match self.store.find_by_username(&username).await? {
            Some(record) => record,
            None => {
                std::hint::black_box(self.hasher.verify(&req.password, &self.dummy_credential));
                warn!("[LOGIN] Authentication failed");
                debug!("[LOGIN] Unknown username: {}", username);
                return Err(AppError::Unauthorized);
            }
        };

        if !self.hasher.verify(&req.password, &record.credential) {
            warn!("[LOGIN] Authentication failed");
            debug!("[LOGIN] Wrong password for: {}", username);
            return Err(AppError::Unauthorized);
        }

        let token = self.issuer.issue(&record.identity)?;

        info!("[LOGIN] User authenticated (id: {})", record.identity.id);

        Ok(UserDto {
            username: record.identity.username.to_string(),
            token,
        })
    }

    /// Validate a bearer token and return the claims it asserts.
    ///
    /// Accepts either the raw token or a full `Authorization` header value (`Bearer <token>`).
    /// No store lookup is made.
    pub fn authenticate(&self, bearer: &str) -> Result<Claims> {
        let token = bearer.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

        let claims = self.validator.validate(token).inspect_err(|e| {
            warn!("[AUTH] Token validation failed: {}", e);
        })?;
        claims.user_id()?;

        debug!("[AUTH] Authenticated user: {} (id: {})", claims.unique_name, claims.sub);
        Ok(claims)
    }

    /// All registered members. Does not require authentication.
    pub async fn list_members(&self) -> Result<Vec<MemberDto>> {
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .map(MemberDto::from)
            .collect())
    }

    /// Look up one member. Requires a valid bearer token.
    pub async fn get_member(&self, bearer: &str, id: i64) -> Result<MemberDto> {
        self.authenticate(bearer)?;

        self.store
            .find_by_id(id)
            .await?
            .map(MemberDto::from)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

impl From<Identity> for MemberDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
