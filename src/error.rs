use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that stops the game before the first frame is drawn.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to load tile art '{path}': {source}")]
    MissingAsset { path: PathBuf, source: io::Error },

    #[error("Tile art '{path}' is empty")]
    EmptyAsset { path: PathBuf },

    #[error("Terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    SurfaceTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("Failed to set up terminal: {0}")]
    Terminal(#[from] io::Error),
}
