use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::{Catalog, Symbol};

/// Which side of a tile is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// The shared back face.
    Hidden,
    /// The tile's own symbol.
    Revealed,
}

/// One cell of the board.  Its screen area is fixed when the board is dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    area: Rect,
    symbol: Symbol,
    face: Face,
}

impl Tile {
    /// A face-down tile covering `area`.
    pub fn new(area: Rect, symbol: Symbol) -> Self {
        Tile {
            area,
            symbol,
            face: Face::Hidden,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_revealed(&self) -> bool {
        self.face == Face::Revealed
    }

    /// Does `point` fall on this tile?  The left and top edges belong to the
    /// tile, the right and bottom edges belong to its neighbours, as with a
    /// rectangle collision test.
    pub fn hit_test(&self, point: Position) -> bool {
        self.area.contains(point)
    }

    pub fn reveal(&mut self) {
        self.face = Face::Revealed;
    }

    pub fn hide(&mut self) {
        self.face = Face::Hidden;
    }

    pub fn matches(&self, other: &Tile) -> bool {
        self.symbol == other.symbol
    }

    /// Draw the border, then the current face centred inside it.
    pub fn render(&self, buf: &mut Buffer, catalog: &Catalog) {
        let art = match self.face {
            Face::Hidden => catalog.back(),
            Face::Revealed => catalog.face(self.symbol),
        };

        let block = Block::bordered().border_style(Style::new().fg(Color::Gray));
        let inner = block.inner(self.area);
        block.render(self.area, buf);

        // Vertically centre the art; excess lines are clipped at the bottom.
        let lines = art.text.lines().count() as u16;
        let pad = inner.height.saturating_sub(lines) / 2;
        let body = Rect {
            y: inner.y + pad,
            height: inner.height - pad,
            ..inner
        };
        Paragraph::new(art.text.as_str())
            .style(Style::new().fg(art.color))
            .alignment(Alignment::Center)
            .render(body, buf);
    }
}
