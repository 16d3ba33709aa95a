use ethers::abi::Abi;

/// Minimal ERC-20 surface used by the token flow.
pub const ERC20_ABI: &str = r#"[
    {"constant":true,"inputs":[{"name":"owner","type":"address"}],"name":"balanceOf","outputs":[{"name":"","type":"uint256"}],"stateMutability":"view","type":"function"},
    {"constant":false,"inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"name":"transfer","outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable","type":"function"},
    {"constant":true,"inputs":[],"name":"decimals","outputs":[{"name":"","type":"uint8"}],"stateMutability":"view","type":"function"},
    {"constant":true,"inputs":[],"name":"symbol","outputs":[{"name":"","type":"string"}],"stateMutability":"view","type":"function"}
]"#;

pub fn erc20_abi() -> Result<Abi, serde_json::Error> {
    serde_json::from_str(ERC20_ABI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_has_required_functions() {
        let abi = erc20_abi().unwrap();
        for name in ["balanceOf", "transfer", "decimals", "symbol"] {
            assert!(abi.function(name).is_ok(), "missing {}", name);
        }
    }
}
