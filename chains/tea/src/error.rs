//! Error tiers of the distribution flows.
//!
//! [`FatalError`] stops a flow before or instead of dispatching and maps to
//! exit code 1. [`TransferError`] is recorded per recipient and never
//! interrupts the dispatch loop.

use core_logic::{ConfigError, InputError, NetworkError, WalletError};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FatalError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Token not found or not a valid ERC-20 contract.")]
    InvalidTokenContract,

    #[error("Invalid number: '{input}'")]
    InvalidCount { input: String },

    #[error("Invalid amount: '{input}'")]
    InvalidAmount { input: String },

    #[error("Invalid choice: '{input}'")]
    InvalidChoice { input: String },

    #[error("No valid recipient addresses.")]
    NoRecipients,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("invalid recipient address '{input}'")]
    InvalidRecipient { input: String },

    #[error("{message}")]
    Submission { message: String },
}

impl TransferError {
    /// Flattens an error chain (`{:#}`) into a submission failure.
    pub fn submission(err: &anyhow::Error) -> Self {
        TransferError::Submission {
            message: format!("{:#}", err),
        }
    }
}
