use std::io;
use std::time::Duration;

use ratatui::layout::Position;

use crate::board::{Board, Cell};
use crate::clock::Clock;
use crate::input::{EventSource, Input};
use crate::renderer::{Renderer, Scoreboard};

/// Frames per second the loop is capped at.
pub const FPS: u32 = 60;
/// How long a mismatched pair stays face up before flipping back.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(500);

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingForFirstPick,
    WaitingForSecondPick,
    /// Two tiles are face up; they are compared on the next update.
    Evaluating,
    RoundOver,
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

/// One round of the game.  Owns the board and the clock; the renderer and
/// event source are lent to `frame`/`play` so the engine stays agnostic of
/// the terminal.
pub struct Game<C: Clock> {
    board: Board,
    clock: C,
    started: Duration,
    score: u64,
    /// Face-up tiles that are not part of a found pair yet, in pick order.
    revealed: Vec<Cell>,
    /// Tiles belonging to found pairs, in the order they were found.
    matched: Vec<Cell>,
    accepting_input: bool,
    round_active: bool,
    attempts: u32,
}

impl<C: Clock> Game<C> {
    pub fn new(board: Board, clock: C) -> Self {
        let started = clock.elapsed();
        let tiles = board.len();
        tracing::info!(tiles, "Round started");
        Game {
            board,
            clock,
            started,
            score: 0,
            revealed: Vec::with_capacity(2),
            matched: Vec::with_capacity(tiles),
            accepting_input: true,
            round_active: true,
            attempts: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn phase(&self) -> Phase {
        if !self.round_active {
            return Phase::RoundOver;
        }
        match self.revealed.len() {
            0 => Phase::WaitingForFirstPick,
            1 => Phase::WaitingForSecondPick,
            _ => Phase::Evaluating,
        }
    }

    /// Seconds elapsed since the round started, frozen once it ends.
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            seconds: self.score,
            round_over: !self.round_active,
        }
    }

    pub fn revealed(&self) -> &[Cell] {
        &self.revealed
    }

    pub fn matched(&self) -> &[Cell] {
        &self.matched
    }

    pub fn is_matched(&self, cell: Cell) -> bool {
        self.matched.contains(&cell)
    }

    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    pub fn round_active(&self) -> bool {
        self.round_active
    }

    /// Number of pairs compared so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Apply one input event.  `Close` is honored even after the round ends.
    pub fn handle_input(&mut self, input: Input) -> Flow {
        match input {
            Input::Close => Flow::Close,
            Input::Release(point) => {
                self.click(point);
                Flow::Continue
            }
        }
    }

    /// Reveal the tile under `point` if it is a legal pick.  Returns whether
    /// anything changed; illegal picks are silently ignored.
    pub fn click(&mut self, point: Position) -> bool {
        if !self.round_active || !self.accepting_input {
            return false;
        }
        let Some(cell) = self.board.hit(point) else {
            return false;
        };
        if self.revealed.contains(&cell) || self.is_matched(cell) {
            return false;
        }
        let Some(tile) = self.board.get_mut(cell) else {
            return false;
        };

        tile.reveal();
        self.revealed.push(cell);
        if self.revealed.len() == 2 {
            self.accepting_input = false;
        }
        tracing::debug!(?cell, phase = ?self.phase(), "Tile revealed");
        true
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Per-frame state update: refresh the score, settle a pending pair and
    /// end the round once every tile is matched.  No-op after the round ends.
    ///
    /// After a mismatch the gate stays shut until the following update, so
    /// the input step of the next frame drops whatever piled up during the
    /// pause.
    pub fn update(&mut self) {
        if !self.round_active {
            return;
        }

        self.score = self.clock.elapsed().saturating_sub(self.started).as_secs();

        if self.revealed.len() == 2 {
            self.evaluate();
        } else {
            self.accepting_input = true;
        }

        if self.matched.len() == self.board.len() {
            self.round_active = false;
            tracing::info!(
                score = self.score,
                attempts = self.attempts,
                "All pairs found"
            );
        }
    }

    /// Compare the two face-up tiles.  A mismatch holds both on screen for
    /// `MISMATCH_DELAY` (blocking the loop) before turning them back over,
    /// and leaves input closed for one more frame.
    fn evaluate(&mut self) {
        let (first, second) = (self.revealed[0], self.revealed[1]);
        self.attempts += 1;

        let matched = match (self.board.get(first), self.board.get(second)) {
            (Some(a), Some(b)) => a.matches(b),
            _ => false,
        };

        if matched {
            self.matched.extend([first, second]);
            tracing::debug!(?first, ?second, found = self.matched.len() / 2, "Pair found");
        } else {
            self.clock.pause(MISMATCH_DELAY);
            for cell in [first, second] {
                if let Some(tile) = self.board.get_mut(cell) {
                    tile.hide();
                }
            }
            tracing::debug!(?first, ?second, "Mismatch");
        }

        self.revealed.clear();
        self.accepting_input = matched;
    }

    // -------------------------------------------------------------------------
    // Frame loop
    // -------------------------------------------------------------------------

    /// Run one frame: poll input, apply it, draw, then update.
    pub fn frame<R: Renderer, E: EventSource>(
        &mut self,
        renderer: &mut R,
        events: &mut E,
    ) -> io::Result<Flow> {
        let mut flow = Flow::Continue;
        for input in events.poll()? {
            if self.handle_input(input) == Flow::Close {
                flow = Flow::Close;
            }
        }

        renderer.render(&self.board, self.scoreboard())?;
        self.update();
        Ok(flow)
    }

    /// Run frames at `FPS` until the player closes the game.
    pub fn play<R: Renderer, E: EventSource>(
        &mut self,
        renderer: &mut R,
        events: &mut E,
    ) -> io::Result<()> {
        loop {
            if self.frame(renderer, events)? == Flow::Close {
                tracing::info!(score = self.score, "Close requested");
                return Ok(());
            }
            self.clock.tick(FPS);
        }
    }
}
