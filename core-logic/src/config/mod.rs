use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    pub rpc_endpoint: String,
    pub chain_id: u64,
    /// Symbol of the chain's native coin, used in console output.
    pub native_symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// How long a dispatcher waits on each submitted transaction before moving on.
///
/// Both flows share the same policy. `confirmations == 0` means submit only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationPolicy {
    pub confirmations: usize,
    pub timeout_secs: u64,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            confirmations: 1,
            timeout_secs: 120,
        }
    }
}

impl ConfirmationPolicy {
    pub fn submit_only() -> Self {
        Self {
            confirmations: 0,
            ..Default::default()
        }
    }

    pub fn is_submit_only(&self) -> bool {
        self.confirmations == 0
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
