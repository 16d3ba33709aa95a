use std::io::Write;
use std::time::Duration;
use tea_project::config::{DEFAULT_RPC_URL, TEA_SEPOLIA_CHAIN_ID};
use tea_project::TeaConfig;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults() {
    let config = TeaConfig::load("/nonexistent/dir/tea-config.toml").unwrap();

    assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    assert_eq!(config.chain_id, TEA_SEPOLIA_CHAIN_ID);
    assert_eq!(config.native_amount, "0.01");
    assert_eq!(config.transfer_delay(), Duration::from_millis(3000));
    assert!(config.proxy.is_none());
}

#[test]
fn test_file_values_override_defaults() {
    let file = write_config(
        r#"
rpc_url = "http://127.0.0.1:8545"
chain_id = 31337
native_amount = "0.5"
transfer_delay_ms = 250
confirmations = 0

[gas]
token_transfer_limit = 65000

[proxy]
url = "http://10.0.0.1:3128"
username = "user"
password = "pass"
"#,
    );

    let config = TeaConfig::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
    assert_eq!(config.chain_id, 31337);
    assert_eq!(config.native_amount, "0.5");
    assert_eq!(config.transfer_delay(), Duration::from_millis(250));
    assert!(config.confirmation_policy().is_submit_only());

    let gas = config.gas_config();
    assert_eq!(gas.limit_token_transfer(), 65_000);
    assert_eq!(gas.fallback_gas_price_wei(), 10_000_000_000);

    let proxy = config.proxy.unwrap();
    assert_eq!(proxy.url, "http://10.0.0.1:3128");
    assert_eq!(proxy.username.as_deref(), Some("user"));
}

#[test]
fn test_invalid_rpc_url_is_rejected() {
    let file = write_config(r#"rpc_url = "tea-sepolia.local""#);

    let err = TeaConfig::load(file.path().to_str().unwrap()).unwrap_err();

    assert!(err.to_string().contains("Invalid RPC URL"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("chain_id = [not valid toml");

    assert!(TeaConfig::load(file.path().to_str().unwrap()).is_err());
}
