//! # Core Library
//!
//! Configuration, error taxonomy, DTOs, persistence seam and the account flows
//! (register, login, authenticate) built on top of `lib-auth`.

pub mod account;
pub mod config;
pub mod dto;
pub mod error;
pub mod log;
pub mod model;
pub mod startup;

// Re-export commonly used types
pub use account::AccountService;
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool, IdentityStore, UserRepository};
pub use startup::AppContext;
