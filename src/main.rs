//! bdo-search-rs gateway binary

use bdo_search_rs::utils::logging::{LogFormat, init_logging};
use bdo_search_rs::{Config, Gateway, build_info};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Batch adventurer search gateway
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "BDO_CONFIG", default_value = "config/gateway.yaml")]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit logs as JSON lines
    #[arg(long, env = "BDO_JSON_LOGS")]
    json_logs: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = if args.config.exists() {
        Config::from_file(&args.config).await?
    } else {
        warn!(
            "Configuration file {} not found, using defaults",
            args.config.display()
        );
        Config::default()
    };

    let mut config = config.with_env_overrides()?;
    if let Some(host) = &args.host {
        config.gateway.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.gateway.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args).await?;
    let build = build_info();
    info!(
        version = build.version,
        git_hash = build.git_hash,
        address = %config.server().address(),
        "starting gateway"
    );

    Gateway::new(config)?.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(e) = init_logging(&args.log_level, format) {
        eprintln!("Error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
