//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid RPC URL format: '{url}'")]
    InvalidRpcUrl { url: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to load configuration from {path}: {msg}")]
    LoadFailed { path: String, msg: String },
}

/// Signing key errors
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    #[error("Please provide {var} in the environment or .env file")]
    MissingKey { var: String },

    #[error("Invalid private key format: expected hex string")]
    InvalidKeyFormat,

    #[error("Private key has wrong length: expected 64 hex chars, got {length}")]
    InvalidKeyLength { length: usize },
}

/// Network and RPC-related errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    #[error("Request '{method}' failed: {reason}")]
    RequestFailed { method: String, reason: String },

    #[error("Failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },
}

/// Operator input errors
#[derive(Error, Debug, Clone)]
pub enum InputError {
    #[error("Input closed before an answer was given")]
    Closed,

    #[error("Failed to read input: {msg}")]
    Io { msg: String },
}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Io { msg: e.to_string() }
    }
}
