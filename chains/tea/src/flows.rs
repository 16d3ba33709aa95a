//! The two operator flows: collector → (inspector) → dispatcher.

use crate::client::ChainClient;
use crate::collector::{
    collect_native_recipients, collect_token_recipients, parse_token_amount,
};
use crate::config::TeaConfig;
use crate::dispatcher::{DispatchReport, NativeDispatcher, TokenDispatcher};
use crate::error::FatalError;
use crate::inspector::inspect_token;
use core_logic::{mask_address, ConfigError, Prompter};
use ethers::types::U256;
use ethers::utils::{parse_ether, to_checksum};
use tracing::{info, warn};

/// Distributes the configured native amount to every collected recipient.
pub async fn run_native_flow<C, P>(
    config: &TeaConfig,
    client: &C,
    prompter: &mut P,
) -> Result<DispatchReport, FatalError>
where
    C: ChainClient + ?Sized,
    P: Prompter,
{
    let amount = parse_ether(&config.native_amount).map_err(|e| ConfigError::InvalidValue {
        field: "native_amount".to_string(),
        reason: e.to_string(),
    })?;

    let recipients = collect_native_recipients(prompter)?;
    if recipients.is_empty() {
        return Err(FatalError::NoRecipients);
    }

    info!(
        "Sending {} {} to {} addresses...",
        config.native_amount,
        config.native_symbol,
        recipients.len()
    );

    let dispatcher = NativeDispatcher::new(
        client,
        amount,
        config.native_amount.as_str(),
        config.native_symbol.as_str(),
        config.confirmation_policy(),
    );
    Ok(dispatcher.dispatch(&recipients).await)
}

/// Inspects an operator-chosen ERC-20 and sends the same amount to every recipient.
pub async fn run_token_flow<C, P>(
    config: &TeaConfig,
    client: &C,
    prompter: &mut P,
) -> Result<DispatchReport, FatalError>
where
    C: ChainClient + ?Sized,
    P: Prompter,
{
    let sender = to_checksum(&client.sender(), None);
    prompter.notice(&format!(
        "Wallet Address (partially visible): {}",
        mask_address(&sender)
    ))?;

    let contract_input =
        prompter.ask("\nEnter the ERC-20 token contract address in your wallet: ")?;
    let token = inspect_token(client, &contract_input).await?;
    info!(
        "Token Found: {} - Balance: {}",
        token.symbol,
        token.formatted_balance()
    );

    let recipients = collect_token_recipients(prompter)?;

    let amount_input = prompter.ask(&format!(
        "\nEnter the amount of {} to send: ",
        token.symbol
    ))?;
    let amount = parse_token_amount(&amount_input, token.decimals)?;
    let amount_display = amount_input.trim().to_string();

    let required = amount.saturating_mul(U256::from(recipients.len()));
    if required > token.balance {
        warn!(
            "Balance {} {} covers fewer than {} transfers; later transfers will fail.",
            token.formatted_balance(),
            token.symbol,
            recipients.len()
        );
    }

    info!(
        "Sending {} {} to {} addresses...",
        amount_display,
        token.symbol,
        recipients.len()
    );

    let dispatcher = TokenDispatcher::new(
        client,
        &token,
        amount,
        amount_display,
        config.gas_config(),
        config.transfer_delay(),
        config.confirmation_policy(),
    );
    dispatcher.dispatch(&recipients).await
}
