//! zeek-otx CLI - AlienVault OTXv2 client for the Zeek Intel Framework.

use anyhow::{Context, Result};
use chrono::{Local, TimeDelta};
use clap::Parser;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

mod config;

use zeek_otx_lib::prelude::*;

#[derive(Parser)]
#[command(name = "zeek-otx")]
#[command(about = "AlienVault OTXv2 Zeek client", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "zeek-otx.conf")]
    config: PathBuf,

    /// Quiet mode (suppress progress output)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli.config)?;

    // The API filters on a naive local ISO-8601 timestamp, no offset
    let cutoff = Local::now() - TimeDelta::days(config.days_of_history);
    let modified_since = cutoff
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();

    let client = OtxClient::with_defaults().context("Failed to create HTTP client")?;

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} pulses {msg}")
                .expect("Invalid progress template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("(modified since {modified_since})"));
        pb
    };

    let counter = progress.clone();
    let pulses = pulse_stream(&client, &config.api_key, &modified_since).inspect(move |result| {
        if result.is_ok() {
            counter.inc(1);
        }
    });

    let summary = write_feed(&config.outfile, &config.do_notice, pulses)
        .await
        .with_context(|| format!("Failed to write intel file: {}", config.outfile.display()))?;

    progress.finish_and_clear();
    if !cli.quiet {
        println!(
            "Wrote {} intel records from {} pulses to: {}",
            summary.records,
            summary.pulses,
            config.outfile.display()
        );
    }

    Ok(())
}
