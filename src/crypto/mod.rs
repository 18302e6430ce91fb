//! Password derivation primitives.
//!
//! This module provides:
//! - HMAC-SHA1 + base64 password derivation (`derive`)
//! - The character-class policy and its repair pass (`policy`)
//! - The zeroizing master key wrapper (`keys`)

pub mod derive;
pub mod keys;
pub mod policy;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive, identifier, MasterKey, ...};
pub use derive::{
    checked_length, derive, identifier, validate_length, Password, PasswordGenerator, DEFAULT_LENGTH, MAX_LENGTH,
    MIN_LENGTH,
};
pub use keys::MasterKey;
pub use policy::{repair, Policy};
