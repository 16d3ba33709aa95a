//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod gas;
pub(crate) mod logger;
pub(crate) mod prompt;
pub(crate) mod wallet_manager;

// Selective exports - only public utilities
pub use gas::{gwei_to_wei, GasConfig, GasConfigToml};
pub use logger::{setup_logger, TRANSFER_RESULT_TARGET};
pub use prompt::TermPrompter;
pub use wallet_manager::{mask_address, SigningKey, WalletManager, PRIVATE_KEY_VAR};
