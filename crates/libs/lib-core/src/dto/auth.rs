//! # Authentication Data Transfer Objects
//!
//! Defines request and response structures for the account flows.
//!
//! ## Flows Using These DTOs
//!
//! - register: [`RegisterRequest`] -> [`UserDto`] (400 / 409 on failure)
//! - login: [`LoginRequest`] -> [`UserDto`] (400 / 401 on failure)
//! - member lookup: [`MemberDto`]
//!
//! Failures are rendered as [`ErrorResponse`].
//!
//! ## Wire Format
//!
//! All DTOs use **snake_case** field names in JSON (default serde behavior).
//!
//! ```text
//! { "username": "Alice", "password": "Secret123" }
//! ```
//!
//! Response:
//! ```text
//! { "username": "alice", "token": "eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9..." }
//! ```
//!
//! The `token` goes into later requests as `Authorization: Bearer <token>`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// New account registration.
///
/// The username is case-folded before storage, so `"Alice"` registers `"alice"`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login with username (any case) and password.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Passwords must never reach a log line through `{:?}`.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDto {
    /// Normalized username
    pub username: String,
    /// Bearer token
    pub token: String,
}

/// Public view of a registered account. Never includes credential material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberDto {
    pub id: i64,
    pub username: String,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
