//! Core components shared by the ecsctl crates.
//!
//! This crate carries the cross-cutting pieces the service and CLI crates
//! build on:
//!
//! - [`Error`] / [`ErrorKind`] / [`Result`]: the common error type. Signing
//!   failures, bad configuration and transport problems all flow through it.
//! - [`hash`]: base64 and HMAC-SHA1 helpers used by the request signature.
//! - [`time`]: UTC timestamps in the ISO 8601 form the compute API expects.
//! - [`utils`]: small helpers, notably [`utils::Redact`] for keeping access
//!   key secrets out of debug output and logs.
//!
//! Nothing in here talks to the network or the filesystem; the crate is pure
//! computation so that the signing scheme stays deterministic and testable.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
