//! # Bearer Tokens
//!
//! Issuance and validation of compact signed tokens (`header.claims.signature`, each segment
//! base64url) using HS512.
//!
//! Tokens are self-certifying: validation needs only the token, the signing key and the
//! current time. There is no revocation. A token stays valid until `exp`.

use crate::identity::Identity;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use lib_utils::time::{from_unix, now_utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Minimum signing key length in bytes (the HS512 block-size recommendation).
pub const MIN_KEY_LEN: usize = 64;

const ALGORITHM: Algorithm = Algorithm::HS512;

/// Claims carried by every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity id)
    pub sub: String,
    /// Normalized username
    pub unique_name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// The identity id asserted by `sub`.
    pub fn user_id(&self) -> Result<i64, Error> {
        self.sub
            .parse()
            .map_err(|_| Error::InvalidSubject(self.sub.clone()))
    }

    pub fn expires_at(&self) -> Result<DateTime<Utc>, Error> {
        from_unix(self.exp).map_err(|e| Error::Malformed(e.to_string()))
    }
}

/// The process-wide symmetric signing key.
///
/// Built once at startup and shared read-only. Its bytes never appear in `Debug` output.
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Accept `secret` as a signing key if it is at least [`MIN_KEY_LEN`] bytes long.
    pub fn new(secret: &[u8]) -> Result<Self, Error> {
        if secret.len() < MIN_KEY_LEN {
            return Err(Error::KeyTooShort {
                actual: secret.len(),
                min: MIN_KEY_LEN,
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([redacted])")
    }
}

/// Mints tokens for authenticated identities.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(key: Arc<SigningKey>, ttl: Duration) -> Self {
        Self { key, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity`, valid from now until now + TTL.
    pub fn issue(&self, identity: &Identity) -> Result<String, Error> {
        self.issue_at(identity, now_utc())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, Error> {
        let exp = now + self.ttl;

        let claims = Claims {
            sub: identity.id.to_string(),
            unique_name: identity.username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.key.encoding)
            .map_err(|e| Error::Encode(e.to_string()))
    }
}

/// Verifies token signatures and expiry.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    key: Arc<SigningKey>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(key: Arc<SigningKey>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked below against an explicit clock, with no leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self { key, validation }
    }

    /// Validate `token` against the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, Error> {
        self.validate_at(token, now_utc())
    }

    /// Validate `token` as if the current time were `now`.
    ///
    /// The signature is checked first. A forged token always reports `InvalidSignature`, even
    /// when it has also expired.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, Error> {
        let claims = decode::<Claims>(token, &self.key.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => Error::InvalidSignature,
                ErrorKind::ExpiredSignature => Error::Expired,
                _ => Error::Malformed(e.to_string()),
            })?
            .claims;

        if now.timestamp() > claims.exp {
            return Err(Error::Expired);
        }

        Ok(claims)
    }
}

// region:    --- Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Signing key must be at least {min} bytes long (got {actual})")]
    KeyTooShort { actual: usize, min: usize },

    #[error("Failed to encode token: {0}")]
    Encode(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token subject is not a valid identity id: {0}")]
    InvalidSubject(String),
}
// endregion: --- Error
