//! Aliyun ECS RPC signing and a thin typed client.
//!
//! The ECS API authenticates every call with an RPC-style signature: the
//! query parameters are canonicalized, double percent-encoded and HMAC-SHA1
//! signed with the account secret. This crate implements that scheme
//! ([`sign`]) together with a small blocking client ([`EcsClient`]) for the
//! handful of operations ecsctl needs: listing images and instances,
//! rebuilding an instance from an image, resetting its password and
//! rebooting it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ecsctl_aliyun_ecs::{Credential, EcsClient, Region};
//!
//! fn main() -> ecsctl_core::Result<()> {
//!     let cred = Credential::new("your-access-key-id", "your-access-key-secret");
//!     let client = EcsClient::new(cred, Region::ApSoutheast5)?;
//!
//!     for image in client.describe_images()? {
//!         println!("{}: {}", image.image_id, image.image_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The signature itself is exposed as pure functions in [`sign`] so it can
//! be verified byte-for-byte against an independent implementation.

#![warn(missing_docs)]

mod constants;
pub mod sign;

mod client;
pub use client::{EcsClient, Image, Instance};
mod credential;
pub use credential::Credential;
mod region;
pub use region::Region;
