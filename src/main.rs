//! InvestaTrack main entry point

use anyhow::Context;
use clap::Parser;
use investatrack_client::{ClientConfig, HttpApiClient, InvestaApi};
use investatrack_config::{Config, ConfigError, ConfigResult, ListErrorPolicy};
use investatrack_web::start_server;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "investatrack")]
#[command(version = "0.1.0")]
#[command(about = "Web front end for the InvestaTrack portfolio service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Backend base URL, overrides backend.base_url
    #[arg(short, long)]
    backend: Option<String>,

    /// Listen port, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,

    /// List page failure display (silent or banner), overrides display.list_errors
    #[arg(long)]
    list_errors: Option<ListErrorPolicy>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.parse_filters(level),
    };
    builder.init();
}

/// Load the config file and apply command line overrides
fn resolve_config(args: &Args) -> ConfigResult<Config> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(backend) = &args.backend {
        config.backend.base_url = backend.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(policy) = args.list_errors {
        config.display.list_errors = policy;
    }
    config.validate()?;
    Ok(config)
}

/// Print the error's details and suggestions before giving up.
///
/// Runs before logging is set up, so it writes to stderr directly.
fn config_failure(e: ConfigError) -> anyhow::Error {
    eprintln!("{}", e.to_details());
    anyhow::Error::new(e).context("Failed to load configuration")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config_missing = !args.config.exists();
    let config = resolve_config(&args).map_err(config_failure)?;

    init_logging(&config.logging.level);
    if config_missing {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Config loaded: backend={}, listen={}, list_errors={}",
        config.backend.base_url,
        config.listen_addr(),
        config.display.list_errors
    );

    let mut client_config = ClientConfig::new(config.backend.base_url.clone());
    if let Some(secs) = config.backend.timeout_secs {
        client_config = client_config.with_timeout(Duration::from_secs(secs));
    }
    let api: Arc<dyn InvestaApi> = Arc::new(HttpApiClient::new(client_config).context("Failed to build HTTP client")?);

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, api))?;

    Ok(())
}
