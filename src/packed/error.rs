//! Error type and Return values used by the packed Serializer.

use alloc::string::{String, ToString};
use serde::ser;
use thiserror::Error;

/// Represents all possible errors that can happen during Serialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value has no packed Solidity representation.
    ///
    /// For example floating point numbers, options, enums and maps. Instead
    /// of silently picking a representation (which the Solidity side would
    /// have to guess) the payload type has to be changed.
    #[error("type is not representable in packed encoding: {0}")]
    TypeNotRepresentable(&'static str),
    /// Representable in Solidity, but not implemented by this Serializer
    /// (currently `char` and sequences, which need per-element padding).
    #[error("type is not yet implemented: {0}")]
    TypeNotYetSupported(&'static str),
    /// Raised by a custom `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: core::fmt::Display,
    {
        Error::Custom(msg.to_string())
    }
}

/// Alias for `Result` using the [Error] returned by the Serializer.
pub type Result<T> = core::result::Result<T, Error>;
