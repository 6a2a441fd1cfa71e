use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lastwake_cli::commands::{boots, follow, report};
use lastwake_cli::{Cli, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; stdout is reserved for the report
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.list_boots {
        boots::run(&mut out, &config)?;
        return Ok(());
    }

    let session = lastwake_cli::boots::resolve(cli.boot_arg(), || {
        lastwake_cli::boots::list_boots(&config.journalctl)
    })?;
    tracing::debug!(?session, "selected session");

    if cli.follow {
        follow::run(&mut out, &config, &session)?;
    } else {
        let output = if cli.seconds_since_last_wake_up {
            report::Output::SecondsSinceLastWakeUp
        } else if cli.json {
            report::Output::Json
        } else {
            report::Output::Table
        };
        let progress = config.progress && !cli.no_progress;
        report::run(&mut out, &config, &session, output, progress)?;
    }

    out.flush()?;
    Ok(())
}
