//! Endpoint Monitor Binary

use clap::Parser;
use endpoint_monitor::{
    write_report, MonitorConfig, ProbeConfig, Runner, ServiceChecker,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "endpoint_monitor", about = "Probe configured services and record check results")]
struct Args {
    /// Path to the service configuration file (YAML or JSON)
    #[arg(short, long, env = "MONITOR_CONFIG", default_value = "services.yaml")]
    config: PathBuf,

    /// Where to write the run result document
    #[arg(short, long, env = "MONITOR_OUTPUT", default_value = "results/latest.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    initialize_tracing();

    let args = Args::parse();

    info!("Starting Endpoint Monitor v{}", env!("CARGO_PKG_VERSION"));

    // Configuration problems are the only fatal errors; nothing is probed
    // before the config parses and validates.
    let config = match MonitorConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Loaded configuration '{}' with {} services from {}",
        config.name,
        config.services.len(),
        args.config.display()
    );

    let checker = match ServiceChecker::new(ProbeConfig::default()) {
        Ok(checker) => checker,
        Err(e) => {
            error!("Failed to build HTTP probe: {}", e);
            std::process::exit(1);
        }
    };

    let run = Runner::new(checker).run(&config).await;

    if let Err(e) = write_report(&run, &args.output) {
        error!("Failed to write run report: {}", e);
        std::process::exit(1);
    }

    if !run.all_passed() {
        std::process::exit(1);
    }
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
