use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{Level, error, info};

use reputation_gate::{
    GateConfig, GateOutcome,
    cli::Cli,
    gate::{self, EXIT_FATAL},
    output,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first so logging honors the configured level
    let config = match GateConfig::from_env() {
        Ok(mut config) => {
            cli.apply(&mut config);
            config
        }
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            output::error(&format!("Configuration error: {:#}", e));
            return ExitCode::from(EXIT_FATAL);
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("{:#}", e);
    }

    let result = gate::execute(&config).await;
    report(&result);
    ExitCode::from(gate::exit_status(&result))
}

/// Log the result and raise the failure annotation when it did not pass.
fn report(result: &Result<GateOutcome>) {
    match result {
        Ok(outcome) if outcome.passed() => info!("{}", outcome.summary()),
        Ok(outcome) => {
            error!("{}", outcome.summary());
            output::error(&outcome.summary());
        }
        Err(e) => {
            error!("{:#}", e);
            output::error(&format!("{:#}", e));
        }
    }
}

/// Install the fmt subscriber on stderr; stdout carries workflow commands.
fn init_logging(config: &GateConfig) -> Result<()> {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
