//! # Core Logic - Gas Configuration
//!
//! Gas defaults for explicit-fee transfers. This module provides
//! configuration only; chain crates query the node and apply the fallback.

use serde::Deserialize;

/// Configuration for gas management
#[derive(Debug, Clone, PartialEq)]
pub struct GasConfig {
    /// Used when the node reports no gas price (error or zero).
    pub fallback_gas_price_gwei: f64,
    pub token_transfer_limit: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            fallback_gas_price_gwei: 10.0,
            token_transfer_limit: 50_000,
        }
    }
}

impl GasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_gas_price(mut self, gwei: f64) -> Self {
        self.fallback_gas_price_gwei = gwei;
        self
    }

    pub fn with_token_transfer_limit(mut self, limit: u64) -> Self {
        self.token_transfer_limit = limit;
        self
    }

    pub fn fallback_gas_price_wei(&self) -> u64 {
        gwei_to_wei(self.fallback_gas_price_gwei)
    }

    pub fn limit_token_transfer(&self) -> u64 {
        self.token_transfer_limit
    }
}

/// Convert gwei to wei as u64
pub fn gwei_to_wei(gwei: f64) -> u64 {
    (gwei * 1e9) as u64
}

/// Deserialize helper for GasConfig from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GasConfigToml {
    pub fallback_gas_price_gwei: Option<f64>,
    pub token_transfer_limit: Option<u64>,
}

impl From<GasConfigToml> for GasConfig {
    fn from(toml: GasConfigToml) -> Self {
        let mut config = GasConfig::new();
        if let Some(gwei) = toml.fallback_gas_price_gwei {
            config = config.with_fallback_gas_price(gwei);
        }
        if let Some(limit) = toml.token_transfer_limit {
            config = config.with_token_transfer_limit(limit);
        }
        config
    }
}
