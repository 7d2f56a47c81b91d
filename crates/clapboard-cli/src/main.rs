//! Clapboard CLI: line up a narrated screen recording with its audio
//!
//! ## Usage
//!
//! ```bash
//! clapboard detect raw.webm                              # Find the sync marker
//! clapboard plan -m session.json                          # Show the mixdown command
//! clapboard compose -m session.json -o mix.wav            # Mix audio only
//! clapboard finish -m session.json -o out/final.mp4       # Trim, mix and mux
//! ```

use clap::Parser;
use clapboard_cli::{
    handlers, Cli, CliConfig, CliError, CliResult, Commands, LogFormat, Verbosity,
};
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    init_logging(&config)?;
    tracing::debug!(command = ?cli.command, engine = ?config.engine, "Starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(&config, &cli.command))
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_log_format(cli.log_format)
        .load_engine(cli.config.as_deref())
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_logging(config: &CliConfig) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter_directive()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let result = match config.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| CliError::config(format!("Failed to initialize logging: {e}")))
}

async fn dispatch(config: &CliConfig, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Detect(args) => handlers::execute_detect(config, args).await,
        Commands::Compose(args) => handlers::execute_compose(config, args).await,
        Commands::Finish(args) => handlers::execute_finish(config, args).await,
        Commands::Plan(args) => handlers::execute_plan(config, args).await,
    }
}
