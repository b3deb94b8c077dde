//! # Model
//!
//! Persistence seam for identities and credentials.

pub mod store;
