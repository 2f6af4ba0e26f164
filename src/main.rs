use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use memory_tiles::board::{Board, PAIRS};
use memory_tiles::catalog::Catalog;
use memory_tiles::clock::SystemClock;
use memory_tiles::config::Config;
use memory_tiles::game::Game;
use memory_tiles::input::TerminalEvents;
use memory_tiles::renderer::{self, TuiRenderer};

fn main() -> Result<()> {
    let config = Config::parse();
    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }

    // Everything that can fail happens before the terminal is taken over.
    let catalog = Catalog::load(&config.assets, PAIRS)
        .inspect_err(|e| tracing::error!("{}", e))
        .context("Could not load tile art")?;
    let surface = renderer::terminal_surface()
        .inspect_err(|e| tracing::error!("{}", e))
        .context("Could not size the board")?;

    let board = match config.seed {
        Some(seed) => Board::deal_seeded(surface, seed),
        None => Board::deal_random(surface),
    };
    let mut game = Game::new(board, SystemClock::new());

    let mut renderer = TuiRenderer::init(catalog).context("Could not open the game screen")?;
    game.play(&mut renderer, &mut TerminalEvents)?;
    drop(renderer);

    if !game.round_active() {
        println!("All pairs found in {} seconds.", game.score());
    }
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
