//! HackMD CLI
//!
//! Command-line interface for listing, creating, reading, updating and
//! deleting notes through the HackMD REST API.

use clap::Parser;
use hackmd_cli::cli::{handle_help, is_broken_pipe, run_command, Cli, Invocation};
use hackmd_cli::client::HackmdClient;
use hackmd_cli::config::CliConfig;
use hackmd_cli::format::{format_error, TOKEN_GUIDANCE};
use hackmd_core::HackmdError;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_tracing(cli.verbose);

    let invocation = match Invocation::from_tokens(&cli.args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run \"hackmd-cli help\" for usage information");
            std::process::exit(1);
        }
    };

    if !invocation.command.needs_api() {
        if let Err(e) = handle_help(&mut std::io::stdout()) {
            exit_on_error(&e, cli.verbose);
        }
        return;
    }

    // Build configuration using priority chain: defaults → file → env → CLI args
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(HackmdError::MissingToken) => {
            eprintln!("Error: {}", HackmdError::MissingToken);
            eprintln!("{}", TOKEN_GUIDANCE);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    debug!(?config, command = ?invocation.command, "resolved configuration");

    let client = match HackmdClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let result = run_command(
        &client,
        &invocation,
        &config.web_url,
        &mut std::io::stdout(),
    )
    .await;

    if let Err(e) = result {
        exit_on_error(&e, cli.verbose);
    }
}

/// Report a command failure and exit. A closed stdout is not a failure.
fn exit_on_error(e: &anyhow::Error, verbose: bool) -> ! {
    if is_broken_pipe(e) {
        debug!("stdout closed, exiting quietly");
        std::process::exit(0);
    }

    eprintln!("{}", format_error(e));
    if verbose {
        eprintln!("Error details: {:?}", e);
    }
    std::process::exit(1);
}

fn build_config(cli: &Cli) -> hackmd_core::Result<CliConfig> {
    let mut builder = CliConfig::builder();

    if !cli.no_config {
        builder = builder.with_config_file(cli.config.as_deref())?;
    }

    builder = builder.with_env_overrides()?;

    if let Some(ref url) = cli.api_url {
        builder = builder.with_api_url(url)?;
    }

    builder.build()
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
