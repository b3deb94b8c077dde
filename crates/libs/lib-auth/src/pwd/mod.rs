//! # Password Credentials
//!
//! Salted password hashing and verification.
//!
//! A [`Credential`] is `HMAC-SHA512(key = salt, message = password)` together with the salt.
//! Every derivation draws a fresh 64-byte salt from the operating system RNG, so two accounts
//! with the same password never share a hash and precomputed tables are useless.
//!
//! Verification recomputes the hash with the stored salt and compares it with
//! [`constant_time_eq`], which never exits early on the first differing byte.

use crate::ct::constant_time_eq;
use hmac::{Hmac, Mac};
use lib_utils::b64::{b64u_decode_array, b64u_encode};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;
use std::fmt;
use thiserror::Error;

type HmacSha512 = Hmac<Sha512>;

/// Salt length in bytes.
pub const SALT_LEN: usize = 64;

/// Hash length in bytes (SHA-512 output).
pub const HASH_LEN: usize = 64;

/// A password hash and the salt that keyed it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    hash: [u8; HASH_LEN],
    salt: [u8; SALT_LEN],
}

impl Credential {
    pub fn from_parts(hash: [u8; HASH_LEN], salt: [u8; SALT_LEN]) -> Self {
        Self { hash, salt }
    }

    /// Rebuild a credential from its stored base64url form.
    pub fn from_b64u(hash: &str, salt: &str) -> Result<Self, Error> {
        let hash = b64u_decode_array::<HASH_LEN>(hash)
            .map_err(|e| Error::CorruptCredential(format!("hash: {e}")))?;
        let salt = b64u_decode_array::<SALT_LEN>(salt)
            .map_err(|e| Error::CorruptCredential(format!("salt: {e}")))?;
        Ok(Self { hash, salt })
    }

    pub fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn hash_b64u(&self) -> String {
        b64u_encode(self.hash)
    }

    pub fn salt_b64u(&self) -> String {
        b64u_encode(self.salt)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("hash", &"[redacted]")
            .field("salt", &"[redacted]")
            .finish()
    }
}

/// Password acceptance rules applied before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwdPolicy {
    /// Minimum length in characters. `0` accepts the empty password.
    pub min_length: usize,
}

impl Default for PwdPolicy {
    fn default() -> Self {
        Self { min_length: 1 }
    }
}

impl PwdPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn check(&self, password: &str) -> Result<(), Error> {
        if self.min_length == 0 {
            return Ok(());
        }
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }
        if password.chars().count() < self.min_length {
            return Err(Error::PasswordTooShort { min: self.min_length });
        }
        Ok(())
    }
}

/// Derives and verifies [`Credential`]s under a [`PwdPolicy`].
#[derive(Debug, Clone, Default)]
pub struct CredentialHasher {
    policy: PwdPolicy,
}

impl CredentialHasher {
    pub fn new(policy: PwdPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PwdPolicy {
        self.policy
    }

    /// Hash `password` under a freshly generated random salt.
    pub fn derive(&self, password: &str) -> Result<Credential, Error> {
        self.policy.check(password)?;

        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let hash = compute_hash(&salt, password)?;
        Ok(Credential { hash, salt })
    }

    /// Check `password` against a stored credential.
    ///
    /// The policy is not applied here, so credentials created under an older policy still verify.
    pub fn verify(&self, password: &str, stored: &Credential) -> bool {
        match compute_hash(&stored.salt, password) {
            Ok(computed) => constant_time_eq(&computed, &stored.hash),
            Err(_) => false,
        }
    }
}

fn compute_hash(salt: &[u8], password: &str) -> Result<[u8; HASH_LEN], Error> {
    let mut mac = HmacSha512::new_from_slice(salt).map_err(|e| Error::Hash(e.to_string()))?;
    mac.update(password.as_bytes());

    let mut hash = [0u8; HASH_LEN];
    hash.copy_from_slice(&mac.finalize().into_bytes());
    Ok(hash)
}

// region:    --- Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Password is required")]
    EmptyPassword,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Stored credential is corrupt: {0}")]
    CorruptCredential(String),
}
// endregion: --- Error
