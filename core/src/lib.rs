//! Core components for signing POST policies.
//!
//! This crate provides the foundational pieces shared by the postsign
//! service crates: the error type, hashing and encoding helpers, time
//! formatting, and debug redaction for secrets.
//!
//! ## Overview
//!
//! - [`Error`] / [`ErrorKind`]: the typed error surface; every failure is
//!   reported synchronously through it
//! - [`hash`]: HMAC-SHA256 and base64 helpers used by the signing chain
//! - [`time`]: UTC wall-clock capture and the date formats the scope string
//!   and policy documents are built from
//! - [`utils::Redact`]: debug formatting that never leaks secret material
//!
//! ## Example
//!
//! ```
//! use postsign_core::hash::{hex_hmac_sha256, hmac_sha256};
//!
//! // The SigV4 key derivation chain is a sequence of keyed hashes where
//! // each stage keys the next.
//! let k_date = hmac_sha256(b"AWS4secret", b"20220313");
//! let k_region = hmac_sha256(&k_date, b"us-east-1");
//! let signature = hex_hmac_sha256(&k_region, b"payload");
//! assert_eq!(signature.len(), 64);
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
