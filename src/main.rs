//! `nano-send` command line.
//!
//! ```text
//! nano-send [--config FILE] [--rpc-url URL] [--work-url URL] <command>
//!
//!   account-info <ACCOUNT>          print account_info
//!   send --to <ADDR> --amount <RAW> build a signed send block
//!        [--process] [--local-work]
//!   process <BLOCK_JSON_FILE>       submit a previously built block
//!   config                          print the effective configuration
//! ```
//!
//! The private key is read from `NANO_PRIVATE_KEY` and only for `send`.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use nano_send::config::{load_config, HelperConfig};
use nano_send::observability::logging;
use nano_send::work::CpuWorkGenerator;
use nano_send::{NanoHelper, SendBlock};

/// Environment variable holding the hex private key.
const PRIVATE_KEY_ENV_VAR: &str = "NANO_PRIVATE_KEY";

#[derive(Parser)]
#[command(name = "nano-send")]
#[command(about = "Build, sign and submit Nano send blocks", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Node RPC URL (overrides the config file).
    #[arg(long)]
    rpc_url: Option<String>,

    /// Work generation URL (overrides the config file).
    #[arg(long)]
    work_url: Option<String>,

    /// Log level (overrides the config file; RUST_LOG wins over both).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print account_info for an account
    AccountInfo { account: String },
    /// Build a signed send block
    Send {
        /// Recipient address
        #[arg(long)]
        to: String,
        /// Amount in raw
        #[arg(long)]
        amount: String,
        /// Submit the block after signing
        #[arg(long)]
        process: bool,
        /// Compute work on this machine instead of the work endpoint
        #[arg(long)]
        local_work: bool,
    },
    /// Submit a block read from a JSON file
    Process { block: PathBuf },
    /// Print the effective configuration
    Config,
}

#[derive(Serialize)]
struct SendOutput {
    block: SendBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => HelperConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    logging::init(&config.log_level)?;

    let mut helper = NanoHelper::new(config)?;
    if let Some(url) = &cli.rpc_url {
        helper.set_rpc_url(url)?;
    }
    if let Some(url) = &cli.work_url {
        helper.set_work_generation_url(url)?;
    }

    match cli.command {
        Commands::AccountInfo { account } => {
            let info = helper.account_info(&account).await?;
            print_json(&info)?;
        }
        Commands::Send {
            to,
            amount,
            process,
            local_work,
        } => {
            let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
                .map_err(|_| format!("environment variable {PRIVATE_KEY_ENV_VAR} not set"))?;
            helper.set_private_key(private_key.trim())?;
            if local_work {
                let threshold = helper.config().work_threshold.0;
                helper.set_work_generator(Some(Arc::new(CpuWorkGenerator::new(threshold))));
            }

            let block = helper.generate_send_block(&to, &amount).await?;
            let hash = if process {
                Some(helper.process_block(&block).await?)
            } else {
                None
            };
            print_json(&SendOutput { block, hash })?;
        }
        Commands::Process { block } => {
            let content = std::fs::read_to_string(&block)?;
            let block: SendBlock = serde_json::from_str(&content)?;
            let hash = helper.process_block(&block).await?;
            print_json(&serde_json::json!({ "hash": hash }))?;
        }
        Commands::Config => {
            print_json(helper.config())?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
