use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph, Widget};

use crate::board::Board;
use crate::catalog::Catalog;
use crate::error::StartupError;

/// Smallest terminal the board is laid out on.
pub const MIN_SURFACE_WIDTH: u16 = 40;
pub const MIN_SURFACE_HEIGHT: u16 = 16;

const BACKGROUND: Color = Color::Black;
const SCORE_COLOR: Color = Color::White;

/// What goes in the margin next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    /// Whole seconds since the round started.
    pub seconds: u64,
    pub round_over: bool,
}

/// Trait that abstracts the rendering layer, so the game loop can run
/// against a real terminal or against a recording in tests.
pub trait Renderer {
    /// Draw one complete frame.
    fn render(&mut self, board: &Board, scoreboard: Scoreboard) -> io::Result<()>;
}

/// Paint a full frame into `buf`: background, tiles, then the score in the
/// right-hand margin.
pub fn paint(buf: &mut Buffer, board: &Board, catalog: &Catalog, scoreboard: Scoreboard) {
    let area = buf.area;
    Clear.render(area, buf);
    buf.set_style(area, Style::new().bg(BACKGROUND));

    board.render(buf, catalog);

    let left = board
        .tiles()
        .map(|(_, tile)| tile.area().right())
        .max()
        .unwrap_or(area.x)
        .min(area.right());
    let margin = Rect::new(left, area.y, area.right() - left, area.height);

    let mut lines = vec![Line::from(scoreboard.seconds.to_string()).bold()];
    if scoreboard.round_over {
        lines.push(Line::from(""));
        lines.push(Line::from("done!"));
    }
    Paragraph::new(lines)
        .style(Style::new().fg(SCORE_COLOR).bg(BACKGROUND))
        .alignment(Alignment::Right)
        .render(margin, buf);
}

/// Validate the terminal size and turn it into the drawing surface.
pub fn check_surface(width: u16, height: u16) -> Result<Rect, StartupError> {
    if width < MIN_SURFACE_WIDTH || height < MIN_SURFACE_HEIGHT {
        return Err(StartupError::SurfaceTooSmall {
            width,
            height,
            min_width: MIN_SURFACE_WIDTH,
            min_height: MIN_SURFACE_HEIGHT,
        });
    }
    Ok(Rect::new(0, 0, width, height))
}

/// Size of the attached terminal, sampled once.  Call before `TuiRenderer::init`
/// so a failure is reported on the normal screen.
pub fn terminal_surface() -> Result<Rect, StartupError> {
    let (width, height) = crossterm::terminal::size()?;
    check_surface(width, height)
}

// ---------------------------------------------------------------------------
// Terminal Renderer
// ---------------------------------------------------------------------------

/// Full-screen ratatui renderer.  Owns the terminal for the process lifetime
/// and restores it on drop.
pub struct TuiRenderer {
    terminal: DefaultTerminal,
    catalog: Catalog,
}

impl TuiRenderer {
    /// Switch to the alternate screen, enable raw mode and mouse capture.
    pub fn init(catalog: Catalog) -> Result<Self, StartupError> {
        let terminal = ratatui::try_init().inspect_err(|_| ratatui::restore())?;
        let renderer = TuiRenderer { terminal, catalog };
        execute!(io::stdout(), EnableMouseCapture)?;
        tracing::debug!("Terminal initialized");
        Ok(renderer)
    }
}

impl Renderer for TuiRenderer {
    fn render(&mut self, board: &Board, scoreboard: Scoreboard) -> io::Result<()> {
        let catalog = &self.catalog;
        self.terminal.draw(|frame| {
            paint(frame.buffer_mut(), board, catalog, scoreboard);
        })?;
        Ok(())
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        tracing::debug!("Terminal restored");
    }
}
