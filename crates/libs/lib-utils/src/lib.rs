//! # Utilities Library
//!
//! Shared helpers for base64url encoding, environment variables, time, and input validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64u_decode, b64u_decode_array, b64u_encode};
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{from_unix, now_utc};
pub use validation::{validate_charset, validate_length, validate_not_empty};
