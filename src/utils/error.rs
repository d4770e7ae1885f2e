//! The `error` module defines the error type shared across the crate.
//!
//! Registry operations themselves are infallible: unknown topics or tokens
//! are reported through `bool` returns, and a failing subscriber unwinds
//! straight through `publish`. `RegistryError` only covers eager argument
//! validation and configuration loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// An argument was rejected before touching the registry.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration sources could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
