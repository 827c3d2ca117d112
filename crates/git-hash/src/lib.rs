//! Object identity for the git-depgraph object layer.
//!
//! Provides the SHA-1 `ObjectId` type that names every loose object, hex
//! encoding/decoding, the object hasher, and the `OidSet` used to guard
//! history walks against revisiting commits.

mod error;
pub mod hex;
mod oid;
pub mod hasher;
pub mod collections;

pub use error::HashError;
pub use oid::ObjectId;
