use crate::client::ChainClient;
use crate::collector::parse_address;
use crate::error::FatalError;
use anyhow::Result;
use ethers::types::{Address, U256};
use ethers::utils::format_units;
use tracing::debug;

/// Token details captured once before dispatch. The balance is not refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub balance: U256,
}

impl TokenDescriptor {
    pub fn formatted_balance(&self) -> String {
        format_units(self.balance, self.decimals as u32)
            .unwrap_or_else(|_| self.balance.to_string())
    }
}

/// Reads symbol, decimals and the sender's balance from `input`.
///
/// Every failure collapses into [`FatalError::InvalidTokenContract`].
pub async fn inspect_token<C: ChainClient + ?Sized>(
    client: &C,
    input: &str,
) -> Result<TokenDescriptor, FatalError> {
    let Some(address) = parse_address(input.trim()) else {
        debug!("Rejected token address '{}': malformed", input.trim());
        return Err(FatalError::InvalidTokenContract);
    };

    query_token(client, address).await.map_err(|e| {
        debug!("Token inspection of {:?} failed: {:#}", address, e);
        FatalError::InvalidTokenContract
    })
}

async fn query_token<C: ChainClient + ?Sized>(
    client: &C,
    address: Address,
) -> Result<TokenDescriptor> {
    let symbol = client.token_symbol(address).await?;
    let decimals = client.token_decimals(address).await?;
    let balance = client.token_balance(address, client.sender()).await?;

    Ok(TokenDescriptor {
        address,
        symbol,
        decimals,
        balance,
    })
}
