use clap::Parser;
use core_logic::{setup_logger, TermPrompter, WalletManager, PRIVATE_KEY_VAR};
use dotenv::dotenv;
use std::process::ExitCode;
use tea_project::{run_token_flow, DispatchReport, EvmClient, FatalError, TeaConfig};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Send an ERC-20 token to many addresses", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

async fn run(args: &Args) -> Result<DispatchReport, FatalError> {
    info!("Loading config from: {}", args.config);
    let config = TeaConfig::load(&args.config)?;
    let key = WalletManager::from_env(PRIVATE_KEY_VAR)?;

    let client = EvmClient::new(
        &config.chain(),
        &key,
        config.proxy.as_ref(),
        config.request_timeout(),
    )?;

    let mut prompter = TermPrompter::new();
    run_token_flow(&config, &client, &mut prompter).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Keep guard alive for file logging
    let _log_guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();
    match run(&args).await {
        Ok(report) => {
            report.log_summary();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
