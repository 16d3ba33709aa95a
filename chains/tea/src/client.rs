//! Chain access behind a trait so the flows can run against a mock.

use crate::contracts::erc20_abi;
use crate::error::FatalError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use core_logic::{ChainConfig, ConfigError, NetworkError, ProxyConfig, SigningKey, WalletError};
use ethers::prelude::*;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Explicit fee and ordering fields for a token transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOverrides {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
}

/// What the dispatcher needs to know about a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub block_number: Option<u64>,
    pub success: bool,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the signing account.
    fn sender(&self) -> Address;

    /// Transaction count of the sender including pending transactions.
    async fn pending_nonce(&self) -> Result<U256>;

    async fn gas_price(&self) -> Result<U256>;

    async fn token_symbol(&self, token: Address) -> Result<String>;

    async fn token_decimals(&self, token: Address) -> Result<u8>;

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256>;

    /// Sends `value` wei of native coin. Nonce and fees are filled by the signer.
    async fn send_native(&self, to: Address, value: U256) -> Result<TxHash>;

    /// Calls `transfer(to, amount)` on `token` with explicit nonce and fees.
    async fn send_token(
        &self,
        token: Address,
        to: Address,
        amount: U256,
        overrides: TxOverrides,
    ) -> Result<TxHash>;

    /// Waits until `tx_hash` has `confirmations` blocks on top of it.
    /// `Ok(None)` means the transaction was dropped.
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: usize,
    ) -> Result<Option<ReceiptSummary>>;
}

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

pub struct EvmClient {
    client: Arc<SignerClient>,
    erc20: BaseContract,
}

impl EvmClient {
    /// Builds the HTTP provider and signer. Performs no network calls.
    pub fn new(
        chain: &ChainConfig,
        key: &SigningKey,
        proxy_config: Option<&ProxyConfig>,
        request_timeout: Duration,
    ) -> Result<Self, FatalError> {
        let mut client_builder = Client::builder().timeout(request_timeout);

        if let Some(proxy_conf) = proxy_config {
            let mut proxy =
                reqwest::Proxy::all(&proxy_conf.url).map_err(|e| NetworkError::ClientBuild {
                    reason: format!("invalid proxy '{}': {}", proxy_conf.url, e),
                })?;
            if let (Some(u), Some(p)) = (&proxy_conf.username, &proxy_conf.password) {
                proxy = proxy.basic_auth(u, p);
            }
            client_builder = client_builder.proxy(proxy);
        }

        let http_client = client_builder
            .build()
            .map_err(|e| NetworkError::ClientBuild {
                reason: e.to_string(),
            })?;

        let url =
            reqwest::Url::parse(&chain.rpc_endpoint).map_err(|_| ConfigError::InvalidRpcUrl {
                url: chain.rpc_endpoint.clone(),
            })?;
        let provider = Provider::new(Http::new_with_client(url, http_client));

        let wallet = key
            .expose()
            .parse::<LocalWallet>()
            .map_err(|_| WalletError::InvalidKeyFormat)?
            .with_chain_id(chain.chain_id);

        let erc20 = erc20_abi().map_err(|e| ConfigError::InvalidValue {
            field: "erc20_abi".to_string(),
            reason: e.to_string(),
        })?;

        debug!(
            "EVM client ready for {} (chain {}) as {:?}",
            chain.name,
            chain.chain_id,
            wallet.address()
        );

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            erc20: BaseContract::from(erc20),
        })
    }

    fn token(&self, address: Address) -> Contract<SignerClient> {
        Contract::new(address, self.erc20.clone(), self.client.clone())
    }
}

#[async_trait]
impl ChainClient for EvmClient {
    fn sender(&self) -> Address {
        self.client.address()
    }

    async fn pending_nonce(&self) -> Result<U256> {
        self.client
            .get_transaction_count(self.sender(), Some(BlockNumber::Pending.into()))
            .await
            .context("Failed to fetch account nonce")
    }

    async fn gas_price(&self) -> Result<U256> {
        self.client
            .get_gas_price()
            .await
            .context("Failed to fetch gas price")
    }

    async fn token_symbol(&self, token: Address) -> Result<String> {
        self.token(token)
            .method::<_, String>("symbol", ())?
            .call()
            .await
            .context("Contract call 'symbol' failed")
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        self.token(token)
            .method::<_, u8>("decimals", ())?
            .call()
            .await
            .context("Contract call 'decimals' failed")
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        self.token(token)
            .method::<_, U256>("balanceOf", owner)?
            .call()
            .await
            .context("Contract call 'balanceOf' failed")
    }

    async fn send_native(&self, to: Address, value: U256) -> Result<TxHash> {
        let tx = TransactionRequest::new()
            .to(to)
            .value(value)
            .from(self.sender());

        let pending_tx = self
            .client
            .send_transaction(tx, None)
            .await
            .context("Failed to submit native transfer")?;
        Ok(pending_tx.tx_hash())
    }

    async fn send_token(
        &self,
        token: Address,
        to: Address,
        amount: U256,
        overrides: TxOverrides,
    ) -> Result<TxHash> {
        let data = self.erc20.encode("transfer", (to, amount))?;

        let tx = TransactionRequest::new()
            .to(token)
            .data(data)
            .gas(overrides.gas_limit)
            .gas_price(overrides.gas_price)
            .nonce(overrides.nonce)
            .from(self.sender());

        let pending_tx = self
            .client
            .send_transaction(tx, None)
            .await
            .context("Failed to submit token transfer")?;
        Ok(pending_tx.tx_hash())
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: usize,
    ) -> Result<Option<ReceiptSummary>> {
        let receipt = PendingTransaction::new(tx_hash, self.client.provider())
            .confirmations(confirmations)
            .await
            .context("Failed to wait for transaction receipt")?;

        Ok(receipt.map(|r| ReceiptSummary {
            block_number: r.block_number.map(|b| b.as_u64()),
            success: r.status == Some(U64::from(1)),
        }))
    }
}
