//! bridge-cli: inspect transaction payloads and exercise a bridge backend.

use std::path::PathBuf;

use anyhow::Context;
use bridge_types::{codec, EncodedTransaction, PrepareRequest, RawTransaction};
use bridge_utils::{init_logging, LogFormat};
use bridge_wallet_core::{Backend, BridgeConfig, HttpBackend};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bridge-cli", about = "Wallet bridge payload and backend tool")]
struct Cli {
    /// Base URL of the backend. Overrides the config file.
    #[arg(long, env = "BRIDGE_BACKEND_URL")]
    backend_url: Option<String>,

    /// Path receiving signed transactions. Overrides the config file.
    #[arg(long, env = "BRIDGE_SUBMIT_PATH")]
    submit_path: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "BRIDGE_REQUEST_TIMEOUT")]
    request_timeout: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BRIDGE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BRIDGE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Encode hex bytes as a transport string.
    Encode {
        /// Serialized transaction as hex.
        payload: String,
    },
    /// Decode a transport string and print its bytes as hex.
    Decode {
        /// Base64 transaction payload.
        encoded: String,
    },
    /// Ask a preparation endpoint for an unsigned transaction.
    Prepare {
        /// Endpoint path or URL, as found in a modal's `data-endpoint`.
        #[arg(long)]
        endpoint: String,

        /// Public key to prepare the transaction for.
        #[arg(long)]
        pubkey: String,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (file_config, file_error) = match cli.config {
        Some(ref path) => match BridgeConfig::from_toml_file(path) {
            Ok(cfg) => (Some(cfg), None),
            Err(e) => (None, Some(format!("{}: {e}", path.display()))),
        },
        None => (None, None),
    };
    let loaded_from_file = file_config.is_some();
    let base = file_config.unwrap_or_default();

    let config = BridgeConfig {
        backend_url: cli.backend_url.unwrap_or(base.backend_url),
        submit_path: cli.submit_path.unwrap_or(base.submit_path),
        request_timeout_secs: cli.request_timeout.unwrap_or(base.request_timeout_secs),
        log_level: cli.log_level.unwrap_or(base.log_level),
        log_format: cli.log_format.unwrap_or(base.log_format),
        ..base
    };

    let format: LogFormat = config.log_format.parse().unwrap_or_default();
    init_logging(format, &config.log_level);

    if let Some(err) = file_error {
        tracing::warn!("Failed to load config file {err}, using defaults");
    } else if loaded_from_file {
        tracing::debug!("Loaded config from file");
    }

    match cli.command {
        Command::Encode { payload } => {
            let bytes = hex::decode(payload.trim()).context("input is not valid hex")?;
            println!("{}", codec::encode(&bytes));
        }
        Command::Decode { encoded } => {
            let encoded = EncodedTransaction::parse(encoded.trim())
                .context("input is not a valid transaction payload")?;
            println!("{}", hex::encode(encoded.decode().as_bytes()));
        }
        Command::Prepare { endpoint, pubkey } => {
            let backend = HttpBackend::from_config(&config)?;
            tracing::info!(
                "Requesting transaction from {}",
                backend.resolve(&endpoint)?
            );
            let prepared = backend
                .prepare_transaction(&endpoint, &PrepareRequest { public_key: pubkey })
                .await?;
            let raw: RawTransaction = prepared.encoded_tx.decode();
            println!("bytes: {}", raw.len());
            println!("hex:   {}", hex::encode(raw.as_bytes()));
            println!("b64:   {}", prepared.encoded_tx);
        }
        Command::Config => {
            print!("{}", config.to_toml_string());
        }
    }

    Ok(())
}
