//! # GrowEase Health Check
//!
//! Command-line consumer of the health endpoints. Fetches the status once
//! over the chosen transport and prints the rendered view, or the raw JSON
//! with `--format json`. Exits non-zero when the API cannot be reached or
//! reports `error`.

use std::process;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use growease_core::client::{
    HealthApiClient, HealthApiConfig, HealthCheckView, Transport, ViewState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportArg {
    Graphql,
    Rest,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Graphql => Transport::Graphql,
            TransportArg::Rest => Transport::Rest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "health-check")]
#[command(about = "Check the health of a running GrowEase API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Base URL of the API server
    #[arg(short, long, env = "GROWEASE_API_URL", default_value = "http://localhost:3001")]
    url: String,

    /// Transport used to fetch the status
    #[arg(short, long, value_enum, default_value = "graphql")]
    transport: TransportArg,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Log to stderr at a level picked by the `-v` count
fn init_logging(verbose: u8) -> Result<(), SetGlobalDefaultError> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config = HealthApiConfig {
        base_url: cli.url.clone(),
        timeout_ms: cli.timeout_ms,
        transport: cli.transport.into(),
    };

    let client = match HealthApiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        url = client.base_url(),
        transport = %client.transport(),
        "Checking API health"
    );

    let mut view = HealthCheckView::new(Arc::new(client));
    view.load().await;

    match cli.format {
        OutputFormat::Text => print!("{}", view.render()),
        OutputFormat::Json => match view.state() {
            ViewState::Success(health) => match serde_json::to_string_pretty(health) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("❌ Failed to encode status: {e}");
                    process::exit(2);
                }
            },
            ViewState::Error { message } => {
                println!("{}", serde_json::json!({ "error": message }));
            }
            ViewState::Loading => {}
        },
    }

    let healthy = matches!(view.state(), ViewState::Success(health) if health.is_ok());
    process::exit(if healthy { 0 } else { 1 });
}
