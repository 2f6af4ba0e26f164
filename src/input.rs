use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::layout::Position;

/// Everything the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// The player asked to quit.
    Close,
    /// The left mouse button was released over a terminal cell.
    Release(Position),
}

/// Map a raw terminal event to an `Input`, dropping the ones the game ignores.
///
/// ```text
/// q | Esc | Ctrl+C      -- Close
/// left button release   -- Release(column, row)
/// ```
pub fn translate(event: Event) -> Option<Input> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Close),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Input::Close)
            }
            _ => None,
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                Some(Input::Release(Position::new(mouse.column, mouse.row)))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Source of per-frame input batches.
pub trait EventSource {
    /// Everything that arrived since the last call.  Must not block.
    fn poll(&mut self) -> io::Result<Vec<Input>>;
}

/// Reads pending crossterm events from the terminal.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self) -> io::Result<Vec<Input>> {
        let mut inputs = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(input) = translate(event::read()?) {
                inputs.push(input);
            }
        }
        Ok(inputs)
    }
}
