//! CLI for the GitHub Rate Monitor.
//!
//! Starts a local web dashboard that visualizes the GitHub API rate limits of
//! a personal access token entered on the page.

use clap::Parser;
use github_rate_monitor::{MonitorConfig, Server, ServerError};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// GitHub Rate Monitor - Visualize your GitHub API usage quotas.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a config.toml file.
    #[arg(long, env = "GITHUB_RATE_MONITOR_CONFIG")]
    config: Option<PathBuf>,

    /// Address to serve the dashboard on.
    #[arg(long, env = "GITHUB_RATE_MONITOR_BIND")]
    bind: Option<SocketAddr>,

    /// Rate limit endpoint to query.
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Skip TLS certificate verification for GitHub requests.
    #[arg(long)]
    insecure_skip_tls_verify: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the server
    match run(args).await {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Use compact formatting without module target paths for cleaner output
        .with(fmt::layer().compact().with_target(false))
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<(), ServerError> {
    let config = resolve_config(args)?;
    Server::new(config)?.run().await
}

/// Loads the config file, if any, and applies command-line overrides.
fn resolve_config(args: Args) -> Result<MonitorConfig, ServerError> {
    let mut config = match &args.config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };

    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(api_url) = args.api_url {
        config.github.api_url = api_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.github.timeout_secs = timeout_secs;
    }
    if args.insecure_skip_tls_verify {
        config.github.accept_invalid_certs = true;
    }

    config.validate("command line")?;
    Ok(config)
}
