//! Operator input: recipient lists, counts and amounts.

use crate::error::FatalError;
use core_logic::Prompter;
use ethers::prelude::*;
use ethers::utils::{parse_units, to_checksum};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::info;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,]+").expect("static regex"));
static PLAIN_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]*)(?:\.([0-9]*))?$").expect("static regex"));

const DONE_SENTINEL: &str = "done";
const CUSTOM_KEYWORD: &str = "custom";

/// `0x` + 40 hex digits. Mixed-case bodies must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Option<Address> {
    let body = input.strip_prefix("0x")?;
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let address: Address = input.parse().ok()?;

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address, None) != input {
        return None;
    }

    Some(address)
}

pub fn is_valid_address(input: &str) -> bool {
    parse_address(input).is_some()
}

/// Splits free text on commas and whitespace, keeping valid addresses in order.
pub fn parse_recipient_list(text: &str) -> Vec<Address> {
    SEPARATORS
        .split(text)
        .filter(|s| !s.is_empty())
        .filter_map(parse_address)
        .collect()
}

/// Accepts a positive integer only.
pub fn parse_count(input: &str) -> Result<usize, FatalError> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(FatalError::InvalidCount {
            input: trimmed.to_string(),
        }),
    }
}

/// Draws `count` fresh keys from the OS RNG and returns their addresses.
pub fn generate_random_addresses(count: usize) -> Vec<Address> {
    (0..count)
        .map(|_| LocalWallet::new(&mut OsRng).address())
        .collect()
}

/// Scales a positive decimal string by `10^decimals`. More fractional
/// digits than `decimals` is rejected rather than truncated.
pub fn parse_token_amount(input: &str, decimals: u8) -> Result<U256, FatalError> {
    let trimmed = input.trim();
    let invalid = || FatalError::InvalidAmount {
        input: trimmed.to_string(),
    };

    let caps = PLAIN_DECIMAL.captures(trimmed).ok_or_else(invalid)?;
    let whole = caps.get(1).map_or("", |m| m.as_str());
    let fraction = caps.get(2).map_or("", |m| m.as_str());
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(invalid());
    }

    let amount: U256 = parse_units(trimmed, decimals as u32)
        .map_err(|_| invalid())?
        .into();
    if amount.is_zero() {
        return Err(invalid());
    }
    Ok(amount)
}

/// Native flow: either a count of random addresses or a custom list.
///
/// Custom entries are kept as raw strings; they are parsed right before
/// each transfer so a bad entry only fails its own transfer.
pub fn collect_native_recipients<P: Prompter>(prompter: &mut P) -> Result<Vec<String>, FatalError> {
    let choice = prompter
        .ask("How many addresses do you want? (or type 'custom' to use your own list) ")?;
    let choice = choice.trim();

    if choice.eq_ignore_ascii_case(CUSTOM_KEYWORD) {
        prompter.notice("Enter the list of addresses, one per line. Type 'done' when finished:")?;
        let mut addresses = Vec::new();
        while let Some(line) = prompter.next_line()? {
            let entry = line.trim();
            if entry.eq_ignore_ascii_case(DONE_SENTINEL) {
                break;
            }
            if !entry.is_empty() {
                addresses.push(entry.to_string());
            }
        }
        info!("Entered address list: {:?}", addresses);
        return Ok(addresses);
    }

    let count = parse_count(choice)?;
    let addresses: Vec<String> = generate_random_addresses(count)
        .iter()
        .map(|a| to_checksum(a, None))
        .collect();
    info!(
        "Generated addresses ({} addresses): {:?}",
        addresses.len(),
        addresses
    );
    Ok(addresses)
}

/// Token flow: manual free-text list (`1`) or random generation (`2`).
pub fn collect_token_recipients<P: Prompter>(
    prompter: &mut P,
) -> Result<Vec<Address>, FatalError> {
    let method = prompter.ask(
        "Choose recipient address input method:\n1. Enter recipient addresses manually\n2. Generate random recipient addresses\nChoice (1/2): ",
    )?;

    let recipients = match method.trim() {
        "1" => {
            let text = prompter
                .ask("\nEnter recipient addresses (separate with commas, spaces, or new lines): ")?;
            parse_recipient_list(&text)
        }
        "2" => {
            let answer =
                prompter.ask("\nHow many recipient addresses do you want to generate? ")?;
            generate_random_addresses(parse_count(&answer)?)
        }
        other => {
            return Err(FatalError::InvalidChoice {
                input: other.to_string(),
            })
        }
    };

    if recipients.is_empty() {
        return Err(FatalError::NoRecipients);
    }
    Ok(recipients)
}
