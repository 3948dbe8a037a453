use std::path::PathBuf;

use clap::Parser;

/// Check which public peers are reachable and how fast they answer
#[derive(Parser, Debug)]
#[command(name = "peercheck")]
#[command(version)]
#[command(about = "Probe public peers listed in a peer list checkout", long_about = None)]
pub struct Args {
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Seconds allowed for resolving and for connecting to each peer
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of peers probed at once (unbounded by default)
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Only read peers from this region directory (repeatable)
    #[arg(long = "region", value_name = "NAME")]
    pub regions: Vec<String>,

    /// Only read peers from this country file (repeatable)
    #[arg(long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the public peers repository on disk
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}
