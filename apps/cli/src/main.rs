#![warn(clippy::all)]

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use logger::LevelFilter;
use peercheck::{
    CoordinatorConfig, PeerFilter, Prober, ProberConfig, Report, extract_peers, probe_all,
};
use tracing::debug;

mod args;
mod config;

use args::Args;
use config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init_with_level(LevelFilter::WARN);

    let [data_dir] = args.paths.as_slice() else {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    };

    let config = Config::from_config(args.config.as_deref())?.merge(&args);
    config.validate()?;
    debug!("{config}");

    run(data_dir, &config).await
}

async fn run(data_dir: &Path, config: &Config) -> Result<ExitCode> {
    let filter = PeerFilter::new(config.filter.regions.clone(), config.filter.countries.clone());
    let peers = match extract_peers(data_dir, &filter) {
        Ok(peers) => peers,
        Err(error) => {
            debug!(%error, "Peer extraction failed");
            eprintln!("Can't find peers in a directory: {}", data_dir.display());
            return Ok(ExitCode::FAILURE);
        }
    };

    let prober = Prober::new(ProberConfig { timeout: config.probe.timeout() })
        .context("failed to set up prober")?;
    let probed = probe_all(
        peers,
        Arc::new(prober),
        CoordinatorConfig { max_concurrency: config.probe.max_concurrency },
    )
    .await;

    let report = Report::new(&probed);
    let mut stdout = io::stdout().lock();
    if config.output.json {
        report.write_json(&mut stdout)?;
    } else {
        report.write_text(&mut stdout)?;
    }
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn print_usage() {
    let bin = std::env::args().next().unwrap_or_else(|| "peercheck".to_string());
    println!("Usage: {bin} [--json] [path to public_peers repository on a disk]");
    println!("I.e.:  {bin} ~/Projects/yggdrasil/public_peers");
}
