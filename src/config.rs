use std::path::PathBuf;

use clap::Parser;

/// Where the tile art ships with the crate.
pub const DEFAULT_ASSETS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

/// Process-level settings, taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "memory-tiles", about = "Memory: find the matching tile pairs")]
pub struct Config {
    /// Seed for a reproducible deal (random board when omitted)
    pub seed: Option<u64>,

    /// Directory holding image0.txt (back face) and image1..8.txt
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ASSETS)]
    pub assets: PathBuf,

    /// Write logs to this file (logging is off when omitted)
    #[arg(long = "log", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            assets: PathBuf::from(DEFAULT_ASSETS),
            log_file: None,
        }
    }
}
