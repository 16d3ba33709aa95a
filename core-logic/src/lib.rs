//! # Core Logic - Shared Utilities for Distribution Tools
//!
//! This crate provides the pieces shared by every chain implementation:
//! typed errors, logging, configuration structures, signing key loading,
//! gas defaults and the operator input abstraction.
//!
//! ## Modules
//!
//! - [`config`] - Chain, proxy and confirmation policy structures
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Core trait definitions (operator input) and dispatch stats
//! - [`utils`] - Utility modules (logger, wallet, gas, prompts)

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::{ChainConfig, ConfirmationPolicy, ProxyConfig};
pub use error::{ConfigError, InputError, NetworkError, WalletError};
pub use traits::{DispatchStats, Prompter};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{
    gwei_to_wei, mask_address, setup_logger, GasConfig, GasConfigToml, SigningKey, TermPrompter,
    WalletManager, PRIVATE_KEY_VAR, TRANSFER_RESULT_TARGET,
};
