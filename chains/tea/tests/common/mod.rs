#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use core_logic::{InputError, Prompter};
use ethers::types::{Address, TxHash, U256};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tea_project::{ChainClient, ReceiptSummary, TxOverrides};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PendingNonce,
    GasPrice,
    Symbol(Address),
    Decimals(Address),
    Balance(Address, Address),
    SendNative {
        to: Address,
        value: U256,
    },
    SendToken {
        token: Address,
        to: Address,
        amount: U256,
        overrides: TxOverrides,
    },
    WaitReceipt {
        tx_hash: TxHash,
        confirmations: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum ReceiptMode {
    Success,
    Reverted,
    Dropped,
    Error,
    /// The receipt never arrives.
    Hang,
}

/// In-memory chain that records every call.
pub struct MockClient {
    pub sender: Address,
    pub initial_nonce: U256,
    /// `None` makes `eth_gasPrice` fail.
    pub gas_price: Option<U256>,
    pub symbol: String,
    /// `None` makes `decimals()` revert.
    pub decimals: Option<u8>,
    pub balance: U256,
    pub failing_recipients: HashSet<Address>,
    pub receipt_mode: ReceiptMode,
    calls: Mutex<Vec<Call>>,
    next_hash: Mutex<u64>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            sender: "0x8ba1f109551bd432803012645ac136ddd64dba72".parse().unwrap(),
            initial_nonce: U256::from(7u64),
            gas_price: Some(U256::from(2_000_000_000u64)),
            symbol: "TKN".to_string(),
            decimals: Some(18),
            balance: U256::exp10(24),
            failing_recipients: HashSet::new(),
            receipt_mode: ReceiptMode::Success,
            calls: Mutex::new(Vec::new()),
            next_hash: Mutex::new(1),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn native_sends(&self) -> Vec<(Address, U256)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SendNative { to, value } => Some((to, value)),
                _ => None,
            })
            .collect()
    }

    pub fn token_sends(&self) -> Vec<(Address, U256, TxOverrides)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::SendToken {
                    to,
                    amount,
                    overrides,
                    ..
                } => Some((to, amount, overrides)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn hash(&self) -> TxHash {
        let mut next = self.next_hash.lock().unwrap();
        let hash = TxHash::from_low_u64_be(*next);
        *next += 1;
        hash
    }
}

#[async_trait]
impl ChainClient for MockClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn pending_nonce(&self) -> Result<U256> {
        self.record(Call::PendingNonce);
        Ok(self.initial_nonce)
    }

    async fn gas_price(&self) -> Result<U256> {
        self.record(Call::GasPrice);
        self.gas_price.ok_or_else(|| anyhow!("eth_gasPrice unavailable"))
    }

    async fn token_symbol(&self, token: Address) -> Result<String> {
        self.record(Call::Symbol(token));
        Ok(self.symbol.clone())
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        self.record(Call::Decimals(token));
        self.decimals.ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256> {
        self.record(Call::Balance(token, owner));
        Ok(self.balance)
    }

    async fn send_native(&self, to: Address, value: U256) -> Result<TxHash> {
        self.record(Call::SendNative { to, value });
        if self.failing_recipients.contains(&to) {
            return Err(anyhow!("insufficient funds for gas * price + value"));
        }
        Ok(self.hash())
    }

    async fn send_token(
        &self,
        token: Address,
        to: Address,
        amount: U256,
        overrides: TxOverrides,
    ) -> Result<TxHash> {
        self.record(Call::SendToken {
            token,
            to,
            amount,
            overrides,
        });
        if self.failing_recipients.contains(&to) {
            return Err(anyhow!("execution reverted: ERC20: transfer amount exceeds balance"));
        }
        Ok(self.hash())
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: usize,
    ) -> Result<Option<ReceiptSummary>> {
        self.record(Call::WaitReceipt {
            tx_hash,
            confirmations,
        });
        match self.receipt_mode {
            ReceiptMode::Success => Ok(Some(ReceiptSummary {
                block_number: Some(100),
                success: true,
            })),
            ReceiptMode::Reverted => Ok(Some(ReceiptSummary {
                block_number: Some(100),
                success: false,
            })),
            ReceiptMode::Dropped => Ok(None),
            ReceiptMode::Error => Err(anyhow!("connection reset")),
            ReceiptMode::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Replays a fixed list of operator lines.
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
    pub prompts: Vec<String>,
    pub notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().ok_or(InputError::Closed)
    }

    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        Ok(self.lines.pop_front())
    }

    fn notice(&mut self, message: &str) -> Result<(), InputError> {
        self.notices.push(message.to_string());
        Ok(())
    }
}
