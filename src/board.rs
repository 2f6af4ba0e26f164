use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};

use crate::catalog::{Catalog, Symbol};
use crate::tile::Tile;

/// Tiles per side of the (square) board.
pub const BOARD_SIZE: usize = 4;
/// Distinct symbols on a board; each is dealt twice.
pub const PAIRS: usize = BOARD_SIZE * BOARD_SIZE / 2;

/// Grid coordinate of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

/// Width and height of one grid cell on a given surface.
///
/// One extra column's worth of width is left unused on the right so the
/// score has somewhere to go.
pub fn cell_size(surface: Rect, size: usize) -> (u16, u16) {
    let size = size as u16;
    (surface.width / (size + 1), surface.height / size)
}

/// The square grid of tiles, stored row-major.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
}

impl Board {
    // -------------------------------------------------------------------------
    // Construction / Dealing
    // -------------------------------------------------------------------------

    /// Deal a fresh shuffled board of the default size using OS entropy.
    pub fn deal_random(surface: Rect) -> Self {
        let mut rng = rand::rngs::SmallRng::from_os_rng();
        Self::deal_with(surface, BOARD_SIZE, &mut rng)
    }

    /// Deal a board from a specific seed (useful for reproducible games).
    pub fn deal_seeded(surface: Rect, seed: u64) -> Self {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        Self::deal_with(surface, BOARD_SIZE, &mut rng)
    }

    /// Double the symbol catalog, shuffle it and lay it out row by row.
    pub fn deal_with<R: Rng + ?Sized>(surface: Rect, size: usize, rng: &mut R) -> Self {
        let mut deck: Vec<Symbol> = Symbol::catalog(size * size / 2)
            .flat_map(|symbol| [symbol, symbol])
            .collect();
        deck.shuffle(rng);
        Self::from_symbols(surface, size, deck)
    }

    /// Lay out an already-ordered list of symbols (for testing).
    pub fn from_symbols(surface: Rect, size: usize, symbols: Vec<Symbol>) -> Self {
        assert!(
            size > 0 && (size * size) % 2 == 0,
            "Board needs an even, non-zero number of cells"
        );
        assert_eq!(symbols.len(), size * size, "Need one symbol per cell");

        let (width, height) = cell_size(surface, size);
        let tiles = symbols
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| {
                let (row, col) = ((i / size) as u16, (i % size) as u16);
                let area = Rect::new(
                    surface.x + col * width,
                    surface.y + row * height,
                    width,
                    height,
                );
                Tile::new(area, symbol)
            })
            .collect();

        Board { size, tiles }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Tiles per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, cell: Cell) -> Option<&Tile> {
        self.index(cell).map(|i| &self.tiles[i])
    }

    pub(crate) fn get_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        self.index(cell).map(|i| &mut self.tiles[i])
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size * size).map(move |i| Cell::new(i / size, i % size))
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Cell, &Tile)> {
        self.cells().zip(self.tiles.iter())
    }

    /// The cell whose tile contains `point`, if any.
    pub fn hit(&self, point: Position) -> Option<Cell> {
        self.tiles()
            .find(|(_, tile)| tile.hit_test(point))
            .map(|(cell, _)| cell)
    }

    /// Draw every tile.
    pub fn render(&self, buf: &mut Buffer, catalog: &Catalog) {
        for tile in &self.tiles {
            tile.render(buf, catalog);
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.size && cell.col < self.size).then(|| cell.row * self.size + cell.col)
    }
}
