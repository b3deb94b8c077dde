//! # Generate Key Utility
//!
//! Prints a fresh random `TOKEN_KEY` value for the `.env` file.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package gen-key --bin gen_key
//! ```
//!
//! The key is 64 random bytes, base64url encoded. The encoded text is what gets used as
//! the HMAC secret, so it is checked against the signing key minimum before printing.

use anyhow::Context;
use lib_auth::token::MIN_KEY_LEN;
use lib_auth::SigningKey;
use lib_utils::b64u_encode;
use rand::rngs::OsRng;
use rand::RngCore;

fn main() -> anyhow::Result<()> {
    let mut key = [0u8; MIN_KEY_LEN];
    OsRng.fill_bytes(&mut key);

    let encoded = b64u_encode(key);
    SigningKey::new(encoded.as_bytes()).context("Generated key was rejected")?;

    println!("============================================");
    println!("  Generate Token Key");
    println!("============================================");
    println!();
    println!("Generated {} random bytes ({} encoded).", key.len(), encoded.len());
    println!();
    println!("Add this line to your .env file:");
    println!();
    println!("TOKEN_KEY={}", encoded);

    Ok(())
}
