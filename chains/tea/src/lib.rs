//! # Tea Project - Native Coin and ERC-20 Distributor
//!
//! Interactive flows that send native TEA or an ERC-20 token from one wallet
//! to a list of recipients on Tea Sepolia.

pub mod client;
pub mod collector;
pub mod config;
pub mod contracts;
pub mod dispatcher;
pub mod error;
pub mod flows;
pub mod inspector;

pub use client::{ChainClient, EvmClient, ReceiptSummary, TxOverrides};
pub use config::TeaConfig;
pub use dispatcher::{DispatchReport, TransferOutcome, TransferRecord};
pub use error::{FatalError, TransferError};
pub use flows::{run_native_flow, run_token_flow};
pub use inspector::TokenDescriptor;
