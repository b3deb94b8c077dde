//! # Identity Model
//!
//! The authenticated subject: a stable id assigned by persistence plus a normalized username.

use lib_utils::validation::{validate_charset, validate_length, validate_not_empty};
use std::fmt;
use thiserror::Error;

/// Maximum username length, in characters.
pub const USERNAME_MAX_LEN: usize = 64;

/// A normalized (lowercase) username.
///
/// Only letters, digits, `-` and `.` are accepted, so ASCII case folding is a complete
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Validate and normalize a raw username.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        validate_not_empty(raw, "Username").map_err(Error::InvalidUsername)?;
        validate_length(raw, 1, USERNAME_MAX_LEN, "Username").map_err(Error::InvalidUsername)?;
        validate_charset(
            raw,
            |c| c.is_ascii_alphanumeric() || c == '-' || c == '.',
            "Username",
            "alphanumeric characters, '-', and '.'",
        )
        .map_err(Error::InvalidUsername)?;

        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A registered account as seen by the token layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Assigned by the store, never reused.
    pub id: i64,
    pub username: Username,
}

impl Identity {
    pub fn new(id: i64, username: Username) -> Self {
        Self { id, username }
    }
}

// region:    --- Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    InvalidUsername(String),
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_case_folded() {
        let name = Username::parse("Alice.Smith-2").expect("valid username");
        assert_eq!(name.as_str(), "alice.smith-2");
        assert_eq!(Username::parse("ALICE").unwrap(), Username::parse("alice").unwrap());
    }

    #[test]
    fn test_username_rejects_bad_input() {
        for raw in ["", "   ", "has space", "semi;colon", "émile", "under_score"] {
            assert!(Username::parse(raw).is_err(), "{raw:?} should be rejected");
        }
        let too_long = "a".repeat(USERNAME_MAX_LEN + 1);
        assert!(Username::parse(&too_long).is_err());
        assert!(Username::parse(&"a".repeat(USERNAME_MAX_LEN)).is_ok());
    }

    #[test]
    fn test_username_error_message() {
        let err = Username::parse("bad name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Username can only have alphanumeric characters, '-', and '.'"
        );
    }
}
