use config::{Config, Environment, File};
use core_logic::{
    ChainConfig, ConfigError, ConfirmationPolicy, GasConfig, GasConfigToml, ProxyConfig,
};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "https://tea-sepolia.g.alchemy.com/public";
pub const TEA_SEPOLIA_CHAIN_ID: u64 = 10218;

/// Prefix for environment overrides, e.g. `TEA_RPC_URL`.
const ENV_PREFIX: &str = "TEA";

#[derive(Debug, Deserialize, Clone)]
pub struct TeaConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_native_symbol")]
    pub native_symbol: String,
    /// Fixed amount of native coin sent to every recipient.
    #[serde(default = "default_native_amount")]
    pub native_amount: String,
    /// Pause between token transfers.
    #[serde(default = "default_transfer_delay_ms")]
    pub transfer_delay_ms: u64,
    #[serde(default = "default_confirmations")]
    pub confirmations: usize,
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub gas: GasConfigToml,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_chain_id() -> u64 {
    TEA_SEPOLIA_CHAIN_ID
}

fn default_native_symbol() -> String {
    "TEA".to_string()
}

fn default_native_amount() -> String {
    "0.01".to_string()
}

fn default_transfer_delay_ms() -> u64 {
    3000
}

fn default_confirmations() -> usize {
    ConfirmationPolicy::default().confirmations
}

fn default_confirmation_timeout_secs() -> u64 {
    ConfirmationPolicy::default().timeout_secs
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for TeaConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            native_symbol: default_native_symbol(),
            native_amount: default_native_amount(),
            transfer_delay_ms: default_transfer_delay_ms(),
            confirmations: default_confirmations(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            gas: GasConfigToml::default(),
            proxy: None,
        }
    }
}

impl TeaConfig {
    /// Loads `path` if it exists, then applies `TEA_*` environment overrides.
    /// Nested keys use a double underscore: `TEA_GAS__TOKEN_TRANSFER_LIMIT`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let load_failed = |e: config::ConfigError| ConfigError::LoadFailed {
            path: path.to_string(),
            msg: e.to_string(),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(load_failed)?;

        let config: Self = settings.try_deserialize().map_err(load_failed)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(ConfigError::InvalidRpcUrl {
                url: self.rpc_url.clone(),
            });
        }
        if self.chain_id == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chain_id".to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn chain(&self) -> ChainConfig {
        ChainConfig {
            name: "Tea Sepolia".to_string(),
            rpc_endpoint: self.rpc_url.clone(),
            chain_id: self.chain_id,
            native_symbol: self.native_symbol.clone(),
        }
    }

    pub fn confirmation_policy(&self) -> ConfirmationPolicy {
        ConfirmationPolicy {
            confirmations: self.confirmations,
            timeout_secs: self.confirmation_timeout_secs,
        }
    }

    pub fn gas_config(&self) -> GasConfig {
        GasConfig::from(self.gas.clone())
    }

    pub fn transfer_delay(&self) -> Duration {
        Duration::from_millis(self.transfer_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
