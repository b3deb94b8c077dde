//! # Time Utilities
//!
//! UTC clock access and unix-timestamp conversion using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Convert a unix timestamp (seconds) to a UTC DateTime.
pub fn from_unix(secs: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(secs, 0).ok_or(Error::TimestampOutOfRange(secs))
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    TimestampOutOfRange(i64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
