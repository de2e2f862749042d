// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use platform::config::Config;
use platform::synth::synth;

#[derive(Debug, Parser)]
#[command(
    name = "platform",
    version,
    about = "Synthesize the OLM bootstrap manifests for the cluster add-ons."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the platform manifest set to the output directory.
    Synth(SynthArgs),
}

#[derive(Debug, Parser)]
struct SynthArgs {
    /// Output directory (default: $PLATFORM_OUTPUT_DIR or ./dist).
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Synth(args) => cmd_synth(args),
    }
}

fn cmd_synth(args: SynthArgs) -> Result<()> {
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    info!(
        "Configuration loaded: output_dir={}, chart_name={}",
        config.output_dir.display(),
        config.chart_name
    );

    let path = synth(&config).context("failed to synthesize platform manifests")?;
    info!("Done: {}", path.display());
    Ok(())
}
