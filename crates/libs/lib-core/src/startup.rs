//! # Startup
//!
//! One-shot process bootstrap: environment, logging, configuration, database and the
//! account service. Any failure here is fatal. The caller must not serve traffic when
//! [`init`] returns an error.

use crate::account::AccountService;
use crate::config::Config;
use crate::error::Result;
use crate::log::init_tracing;
use crate::model::store::{create_pool, UserRepository};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Everything a transport layer needs after startup.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub accounts: Arc<AccountService<UserRepository>>,
}

/// Load `.env`, install logging, validate configuration and open the store.
pub async fn init() -> Result<AppContext> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_tracing(&config.log_level)?;

    info!("Identity core starting");
    info!("Log level: {}", config.log_level);

    AppContext::from_config(config).await
}

impl AppContext {
    /// Build the context from an already loaded configuration.
    pub async fn from_config(config: Config) -> Result<Self> {
        config.validate()?;

        ensure_sqlite_dir(&config.database_url)?;

        info!("Connecting to database...");
        let pool = create_pool(&config.database_url).await?;
        let repo = UserRepository::new(pool);
        repo.ensure_schema().await?;

        let accounts = AccountService::from_config(repo, &config)?;
        info!("Token TTL: {}h", config.token_ttl_hours);

        Ok(Self {
            config,
            accounts: Arc::new(accounts),
        })
    }
}

/// Create the parent directory of a file-backed SQLite URL.
fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let db_path = db_path.trim_start_matches("//");
    if db_path.starts_with(":memory:") {
        return Ok(());
    }

    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                crate::error::AppError::Config(format!(
                    "Cannot create database directory {:?}: {}",
                    parent, e
                ))
            })?;
            info!("Created database directory: {:?}", parent);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;
    use crate::dto::RegisterRequest;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_context_from_config() {
        let ctx = AppContext::from_config(test_config())
            .await
            .expect("Context should build");

        let user = ctx
            .accounts
            .register(RegisterRequest::new("alice", "Secret123"))
            .await
            .unwrap();
        assert!(ctx.accounts.authenticate(&user.token).is_ok());
    }

    #[tokio::test]
    async fn test_weak_key_aborts_startup() {
        let config = Config {
            token_key: "short".to_string(),
            ..test_config()
        };

        let result = AppContext::from_config(config).await;

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_memory_url_needs_no_directory() {
        assert!(ensure_sqlite_dir("sqlite::memory:").is_ok());
        assert!(ensure_sqlite_dir("sqlite:identity.db").is_ok());
    }
}
