//! # Data Transfer Objects
//!
//! Request and response shapes exchanged with the transport layer.

pub mod auth;

pub use auth::*;
