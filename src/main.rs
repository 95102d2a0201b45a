//! removebg - remove image backgrounds via the remove.bg API.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod output;
mod ports;
mod removal;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::RemoveBgError;
use crate::output::{resolve_output_path, summary_lines};
use crate::removal::remove_background;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        eprintln!("Background removal failed");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "removebg=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

async fn run(cli: Cli) -> Result<(), RemoveBgError> {
    cli.validate().map_err(RemoveBgError::InvalidArgument)?;

    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(RemoveBgError::Config)?;
    let timeout = config.timeout(cli.timeout);
    let output_path = resolve_output_path(cli.output.as_deref(), &cli.input);

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("REMOVEBG_REPLAY").ok();
    let is_recording = std::env::var("REMOVEBG_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::debug!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::debug!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config, timeout)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config, timeout)?, None)
    };

    eprintln!("Processing {}...", cli.input.display());
    let result = remove_background(ctx.remover.as_ref(), &cli.input, &output_path).await;
    drop(ctx);

    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    let outcome = result?;
    eprintln!("Saved: {}", outcome.output.display());
    for line in summary_lines(&cli.input, &outcome) {
        eprintln!("{line}");
    }

    Ok(())
}
