//! # Authentication Library
//!
//! Salted password credentials, constant-time comparison, and signed bearer tokens.
//!
//! Everything here is a pure computation: no I/O, no global state. Keys and policies are
//! handed in at construction and never mutated afterwards, so every type is safe to share
//! across request handlers.

pub mod ct;
pub mod identity;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use ct::constant_time_eq;
pub use identity::{Identity, Username};
pub use pwd::{Credential, CredentialHasher, PwdPolicy};
pub use token::{Claims, SigningKey, TokenIssuer, TokenValidator};
