use std::env;
use std::fs;

use anyhow::{Context, Result};
use seolens_cli::{CliCommand, help_text, parse_arguments, run, version_text};
use seolens_core::{FetchConfig, Fetcher};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout stays clean for piping
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let raw_args = env::args().skip(1).collect::<Vec<_>>();
    let options = match parse_arguments(&raw_args)? {
        CliCommand::Help => {
            print!("{}", help_text());
            return Ok(());
        }
        CliCommand::Version => {
            println!("{}", version_text());
            return Ok(());
        }
        CliCommand::Run(options) => options,
    };

    debug!(
        domain = %options.domain,
        mode = ?options.mode,
        json = options.json,
        "starting analysis"
    );
    let fetcher = Fetcher::new(FetchConfig::default()).context("failed to create HTTP client")?;
    let output = run(&fetcher, &options)
        .await
        .with_context(|| format!("analysis of {} failed", options.domain))?;

    println!("{output}");

    if let Some(path) = &options.save_target {
        fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Saved to {}", path.display());
    }

    Ok(())
}
