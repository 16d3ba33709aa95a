//! Sequential per-recipient transfers.
//!
//! Both dispatchers submit one transaction per recipient, in order, and
//! never stop on a per-transfer error. The outcome of every attempt is kept
//! in a [`DispatchReport`].

use crate::client::{ChainClient, TxOverrides};
use crate::collector::parse_address;
use crate::error::{FatalError, TransferError};
use crate::inspector::TokenDescriptor;
use core_logic::{
    ConfirmationPolicy, DispatchStats, GasConfig, NetworkError, TRANSFER_RESULT_TARGET,
};
use ethers::types::{Address, TxHash, U256};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Broadcast; the policy asked for no confirmation.
    Submitted { tx_hash: TxHash },
    Confirmed {
        tx_hash: TxHash,
        block_number: Option<u64>,
    },
    /// Mined with a failed status.
    Reverted {
        tx_hash: TxHash,
        block_number: Option<u64>,
    },
    /// Broadcast, but the wait for a receipt failed.
    Unconfirmed { tx_hash: TxHash, reason: String },
    Failed(TransferError),
}

impl TransferOutcome {
    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            TransferOutcome::Submitted { tx_hash }
            | TransferOutcome::Confirmed { tx_hash, .. }
            | TransferOutcome::Reverted { tx_hash, .. }
            | TransferOutcome::Unconfirmed { tx_hash, .. } => Some(*tx_hash),
            TransferOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TransferOutcome::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct TransferRecord {
    /// Recipient as the operator gave it, or the checksummed address.
    pub recipient: String,
    /// Explicit nonce used, token flow only.
    pub nonce: Option<U256>,
    pub outcome: TransferOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub records: Vec<TransferRecord>,
    pub elapsed: Duration,
}

impl DispatchReport {
    pub fn stats(&self) -> DispatchStats {
        let mut stats = DispatchStats::default();
        for record in &self.records {
            match record.outcome {
                TransferOutcome::Submitted { .. } => stats.submitted += 1,
                TransferOutcome::Confirmed { .. } => stats.confirmed += 1,
                TransferOutcome::Reverted { .. } => stats.reverted += 1,
                TransferOutcome::Unconfirmed { .. } => stats.unconfirmed += 1,
                TransferOutcome::Failed(_) => stats.failed += 1,
            }
        }
        stats
    }

    /// Nonces of failed token submissions. Later transactions may be queued
    /// behind these slots until something else fills them.
    pub fn nonce_gaps(&self) -> Vec<U256> {
        self.records
            .iter()
            .filter(|r| r.outcome.is_failed())
            .filter_map(|r| r.nonce)
            .collect()
    }

    pub fn log_summary(&self) {
        info!(target: TRANSFER_RESULT_TARGET, "{}", self);
        let gaps = self.nonce_gaps();
        if !gaps.is_empty() {
            warn!(
                "Local nonce advanced past {} failed submission(s): {:?}. Later transactions may stay pending.",
                gaps.len(),
                gaps
            );
        }
    }
}

impl fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "Done in {:.1}s | Submitted: {} | Confirmed: {} | Reverted: {} | Unconfirmed: {} | Failed: {} | Success Rate: {:.2}%",
            self.elapsed.as_secs_f64(),
            stats.submitted,
            stats.confirmed,
            stats.reverted,
            stats.unconfirmed,
            stats.failed,
            stats.success_rate()
        )
    }
}

/// Applies the confirmation policy to a freshly broadcast transaction.
async fn settle<C: ChainClient + ?Sized>(
    client: &C,
    tx_hash: TxHash,
    policy: ConfirmationPolicy,
) -> TransferOutcome {
    if policy.is_submit_only() {
        return TransferOutcome::Submitted { tx_hash };
    }

    let wait = client.wait_for_receipt(tx_hash, policy.confirmations);
    match tokio::time::timeout(policy.timeout(), wait).await {
        Ok(Ok(Some(receipt))) if receipt.success => TransferOutcome::Confirmed {
            tx_hash,
            block_number: receipt.block_number,
        },
        Ok(Ok(Some(receipt))) => TransferOutcome::Reverted {
            tx_hash,
            block_number: receipt.block_number,
        },
        Ok(Ok(None)) => TransferOutcome::Unconfirmed {
            tx_hash,
            reason: "transaction dropped from the mempool".to_string(),
        },
        Ok(Err(e)) => TransferOutcome::Unconfirmed {
            tx_hash,
            reason: format!("{:#}", e),
        },
        Err(_) => TransferOutcome::Unconfirmed {
            tx_hash,
            reason: NetworkError::Timeout {
                what: format!("receipt of {:?}", tx_hash),
                timeout_ms: policy.timeout().as_millis() as u64,
            }
            .to_string(),
        },
    }
}

fn log_settled(outcome: &TransferOutcome, recipient: &str) {
    match outcome {
        TransferOutcome::Reverted { tx_hash, .. } => error!(
            target: TRANSFER_RESULT_TARGET,
            "FAILED transfer to {} reverted. Tx Hash: {:?}", recipient, tx_hash
        ),
        TransferOutcome::Unconfirmed { tx_hash, reason } => warn!(
            target: TRANSFER_RESULT_TARGET,
            "Transfer to {} not confirmed ({}). Tx Hash: {:?}", recipient, reason, tx_hash
        ),
        _ => {}
    }
}

/// Native coin dispatcher: fixed amount, signer-managed nonce, no delay.
pub struct NativeDispatcher<'a, C: ChainClient + ?Sized> {
    client: &'a C,
    amount: U256,
    amount_display: String,
    symbol: String,
    policy: ConfirmationPolicy,
}

impl<'a, C: ChainClient + ?Sized> NativeDispatcher<'a, C> {
    pub fn new(
        client: &'a C,
        amount: U256,
        amount_display: impl Into<String>,
        symbol: impl Into<String>,
        policy: ConfirmationPolicy,
    ) -> Self {
        Self {
            client,
            amount,
            amount_display: amount_display.into(),
            symbol: symbol.into(),
            policy,
        }
    }

    pub async fn dispatch(&self, recipients: &[String]) -> DispatchReport {
        let start = Instant::now();
        let mut records = Vec::with_capacity(recipients.len());

        for raw in recipients {
            let outcome = self.send_one(raw).await;
            records.push(TransferRecord {
                recipient: raw.clone(),
                nonce: None,
                outcome,
            });
        }

        DispatchReport {
            records,
            elapsed: start.elapsed(),
        }
    }

    async fn send_one(&self, raw: &str) -> TransferOutcome {
        let Some(to) = parse_address(raw) else {
            let err = TransferError::InvalidRecipient {
                input: raw.to_string(),
            };
            error!(target: TRANSFER_RESULT_TARGET, "FAILED to send to {}: {}", raw, err);
            return TransferOutcome::Failed(err);
        };

        match self.client.send_native(to, self.amount).await {
            Ok(tx_hash) => {
                info!(
                    target: TRANSFER_RESULT_TARGET,
                    "SUCCESS Sent {} {} to {}. Tx Hash: {:?}",
                    self.amount_display,
                    self.symbol,
                    raw,
                    tx_hash
                );
                let outcome = settle(self.client, tx_hash, self.policy).await;
                log_settled(&outcome, raw);
                outcome
            }
            Err(e) => {
                let err = TransferError::submission(&e);
                error!(target: TRANSFER_RESULT_TARGET, "FAILED to send to {}: {}", raw, err);
                TransferOutcome::Failed(err)
            }
        }
    }
}

/// Token dispatcher: explicit local nonce, legacy gas price, fixed delay.
pub struct TokenDispatcher<'a, C: ChainClient + ?Sized> {
    client: &'a C,
    token: &'a TokenDescriptor,
    amount: U256,
    amount_display: String,
    gas: GasConfig,
    delay: Duration,
    policy: ConfirmationPolicy,
}

impl<'a, C: ChainClient + ?Sized> TokenDispatcher<'a, C> {
    pub fn new(
        client: &'a C,
        token: &'a TokenDescriptor,
        amount: U256,
        amount_display: impl Into<String>,
        gas: GasConfig,
        delay: Duration,
        policy: ConfirmationPolicy,
    ) -> Self {
        Self {
            client,
            token,
            amount,
            amount_display: amount_display.into(),
            gas,
            delay,
            policy,
        }
    }

    /// Transfer `i` uses `initial_nonce + i` whether or not earlier
    /// submissions succeeded. Fails only if the initial nonce can't be read.
    pub async fn dispatch(&self, recipients: &[Address]) -> Result<DispatchReport, FatalError> {
        let start = Instant::now();
        let mut nonce = self.client.pending_nonce().await.map_err(|e| {
            NetworkError::RequestFailed {
                method: "eth_getTransactionCount".to_string(),
                reason: format!("{:#}", e),
            }
        })?;

        let mut records = Vec::with_capacity(recipients.len());

        for (i, recipient) in recipients.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let outcome = self.send_one(*recipient, nonce).await;
            if outcome.is_failed() {
                warn!(
                    "Nonce {} was not used by a broadcast transaction; the local counter keeps advancing.",
                    nonce
                );
            }
            records.push(TransferRecord {
                recipient: ethers::utils::to_checksum(recipient, None),
                nonce: Some(nonce),
                outcome,
            });

            nonce += U256::one();
        }

        Ok(DispatchReport {
            records,
            elapsed: start.elapsed(),
        })
    }

    async fn gas_price(&self) -> U256 {
        match self.client.gas_price().await {
            Ok(price) if !price.is_zero() => price,
            Ok(_) => U256::from(self.gas.fallback_gas_price_wei()),
            Err(e) => {
                warn!("Gas price unavailable, using fallback: {:#}", e);
                U256::from(self.gas.fallback_gas_price_wei())
            }
        }
    }

    async fn send_one(&self, recipient: Address, nonce: U256) -> TransferOutcome {
        let overrides = TxOverrides {
            nonce,
            gas_price: self.gas_price().await,
            gas_limit: U256::from(self.gas.limit_token_transfer()),
        };
        let recipient_display = ethers::utils::to_checksum(&recipient, None);

        match self
            .client
            .send_token(self.token.address, recipient, self.amount, overrides)
            .await
        {
            Ok(tx_hash) => {
                info!(
                    target: TRANSFER_RESULT_TARGET,
                    "SUCCESS Sent {} {} to {}. Tx Hash: {:?}",
                    self.amount_display,
                    self.token.symbol,
                    recipient_display,
                    tx_hash
                );
                let outcome = settle(self.client, tx_hash, self.policy).await;
                log_settled(&outcome, &recipient_display);
                outcome
            }
            Err(e) => {
                let err = TransferError::submission(&e);
                error!(
                    target: TRANSFER_RESULT_TARGET,
                    "FAILED to send {} to {}: {}", self.token.symbol, recipient_display, err
                );
                TransferOutcome::Failed(err)
            }
        }
    }
}
