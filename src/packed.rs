//! Canonical packed encoding of off-chain payloads, as understood by
//! Solidity's `keccak256(abi.encodePacked(...))`.

mod error;
mod hashing;
mod ser;

pub mod types;

pub use error::{Error, Result};
pub use hashing::{to_hash, Keccak256Writer};
pub use ser::{to_vec, to_writer, Serializer, Writer};

#[cfg(test)]
mod tests;
