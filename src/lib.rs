//! Memory: find every pair of matching tiles on a 4x4 board, in the terminal.
//!
//! The engine ([`game::Game`]) is independent of the terminal: it talks to
//! the outside world through [`renderer::Renderer`], [`input::EventSource`]
//! and [`clock::Clock`].

pub mod board;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod tile;

pub use board::{Board, Cell};
pub use catalog::{Catalog, Symbol};
pub use game::{Flow, Game, Phase};
pub use input::Input;
