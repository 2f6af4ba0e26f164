use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::time::Duration;

use memory_tiles::board::{Board, Cell};
use memory_tiles::catalog::{Catalog, Symbol};
use memory_tiles::clock::ManualClock;
use memory_tiles::game::{Flow, Game, MISMATCH_DELAY, Phase};
use memory_tiles::input::{EventSource, Input};
use memory_tiles::renderer::{Renderer, Scoreboard, paint};
use memory_tiles::tile::Face;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};

const SURFACE: Rect = Rect::new(0, 0, 80, 24);

/// Hands out one batch per frame, then nothing.
struct Script(VecDeque<Vec<Input>>);

impl Script {
    fn new(batches: Vec<Vec<Input>>) -> Self {
        Script(batches.into())
    }
}

impl EventSource for Script {
    fn poll(&mut self) -> io::Result<Vec<Input>> {
        Ok(self.0.pop_front().unwrap_or_default())
    }
}

/// Remembers what every frame looked like.
#[derive(Default)]
struct Recorder {
    frames: Vec<(Vec<Face>, Scoreboard)>,
}

impl Renderer for Recorder {
    fn render(&mut self, board: &Board, scoreboard: Scoreboard) -> io::Result<()> {
        let faces = board.tiles().map(|(_, tile)| tile.face()).collect();
        self.frames.push((faces, scoreboard));
        Ok(())
    }
}

fn click(board: &Board, cell: Cell) -> Input {
    let area = board.get(cell).unwrap().area();
    Input::Release(Position::new(area.x + area.width / 2, area.y + area.height / 2))
}

/// Cells grouped by symbol.
fn pairs(board: &Board) -> Vec<(Cell, Cell)> {
    let mut by_symbol: BTreeMap<Symbol, Vec<Cell>> = BTreeMap::new();
    for (cell, tile) in board.tiles() {
        by_symbol.entry(tile.symbol()).or_default().push(cell);
    }
    by_symbol.into_values().map(|cells| (cells[0], cells[1])).collect()
}

fn seeded_game(seed: u64) -> Game<ManualClock> {
    Game::new(Board::deal_seeded(SURFACE, seed), ManualClock::new())
}

/// Row-major pairs: (r, 0)-(r, 1) and (r, 2)-(r, 3) match.
fn paired_game() -> Game<ManualClock> {
    let symbols = Symbol::catalog(8).flat_map(|s| [s, s]).collect();
    Game::new(Board::from_symbols(SURFACE, 4, symbols), ManualClock::new())
}

#[test]
fn full_round_ends_and_freezes_score() {
    let mut game = seeded_game(42);
    let mut recorder = Recorder::default();

    for (a, b) in pairs(game.board()) {
        let batch = vec![click(game.board(), a), click(game.board(), b)];
        let mut script = Script::new(vec![batch]);
        game.clock_mut().advance(Duration::from_secs(2));
        assert_eq!(game.frame(&mut recorder, &mut script).unwrap(), Flow::Continue);
    }

    assert_eq!(game.phase(), Phase::RoundOver);
    assert!(!game.round_active());
    assert_eq!(game.matched().len(), 16);
    assert_eq!(game.attempts(), 8);
    assert_eq!(game.clock().paused(), Duration::ZERO);
    let final_score = game.score();
    assert_eq!(final_score, 16);

    // Later frames keep drawing the final board with the frozen score.
    let mut idle = Script::new(vec![vec![click(game.board(), Cell::new(0, 0))]]);
    game.clock_mut().advance(Duration::from_secs(60));
    game.frame(&mut recorder, &mut idle).unwrap();
    game.frame(&mut recorder, &mut idle).unwrap();

    assert_eq!(game.score(), final_score);
    assert_eq!(game.matched().len(), 16);
    let (faces, scoreboard) = recorder.frames.last().unwrap();
    assert!(faces.iter().all(|&f| f == Face::Revealed));
    assert_eq!(
        *scoreboard,
        Scoreboard {
            seconds: final_score,
            round_over: true
        }
    );
}

#[test]
fn mismatch_is_shown_then_hidden_after_pause() {
    let mut game = paired_game();
    let mut recorder = Recorder::default();

    let a = click(game.board(), Cell::new(0, 0));
    let b = click(game.board(), Cell::new(1, 1));
    let mut script = Script::new(vec![vec![a, b]]);
    game.frame(&mut recorder, &mut script).unwrap();

    // The frame drawn before evaluation showed both tiles face up.
    let (faces, _) = &recorder.frames[0];
    assert_eq!(faces[0], Face::Revealed);
    assert_eq!(faces[5], Face::Revealed);

    assert_eq!(game.phase(), Phase::WaitingForFirstPick);
    assert_eq!(game.clock().paused(), MISMATCH_DELAY);
    assert!(game.board().tiles().all(|(_, t)| t.face() == Face::Hidden));
    assert!(game.matched().is_empty());
    assert!(!game.accepting_input());

    // The next frame draws the hidden pair and reopens input.
    game.frame(&mut recorder, &mut Script::new(vec![])).unwrap();
    assert!(recorder.frames[1].0.iter().all(|&f| f == Face::Hidden));
    assert!(game.accepting_input());
}

#[test]
fn click_queued_during_mismatch_pause_is_discarded() {
    let mut game = paired_game();
    let board = game.board().clone();
    let mut recorder = Recorder::default();

    let mut script = Script::new(vec![
        vec![click(&board, Cell::new(0, 0)), click(&board, Cell::new(1, 1))],
        // Released while the mismatched pair was still on screen.
        vec![click(&board, Cell::new(2, 2)), click(&board, Cell::new(2, 3))],
        vec![click(&board, Cell::new(2, 2))],
    ]);

    game.frame(&mut recorder, &mut script).unwrap();
    assert_eq!(game.clock().paused(), MISMATCH_DELAY);

    game.frame(&mut recorder, &mut script).unwrap();
    assert!(game.revealed().is_empty());
    assert!(game.matched().is_empty());
    assert_eq!(game.phase(), Phase::WaitingForFirstPick);
    assert_eq!(game.attempts(), 1);
    assert!(recorder.frames[1].0.iter().all(|&f| f == Face::Hidden));

    // Clicks made after the pause count again.
    game.frame(&mut recorder, &mut script).unwrap();
    assert_eq!(game.revealed(), &[Cell::new(2, 2)]);
    assert_eq!(game.phase(), Phase::WaitingForSecondPick);
}

#[test]
fn third_click_in_same_frame_is_dropped() {
    let mut game = seeded_game(3);
    let board = game.board().clone();
    let mut recorder = Recorder::default();

    let inputs = vec![
        click(&board, Cell::new(0, 0)),
        click(&board, Cell::new(0, 1)),
        click(&board, Cell::new(0, 2)),
    ];
    let mut script = Script::new(vec![inputs]);
    game.frame(&mut recorder, &mut script).unwrap();

    let (faces, _) = &recorder.frames[0];
    assert_eq!(&faces[..3], &[Face::Revealed, Face::Revealed, Face::Hidden]);
    assert_eq!(game.attempts(), 1);
}

#[test]
fn clicks_before_evaluation_are_ignored() {
    let mut game = paired_game();
    let board = game.board().clone();

    assert!(game.click(click_point(&board, Cell::new(2, 0))));
    assert!(game.click(click_point(&board, Cell::new(2, 1))));
    assert!(!game.accepting_input());

    for cell in board.cells() {
        assert!(!game.click(click_point(&board, cell)));
    }
    assert_eq!(game.revealed(), &[Cell::new(2, 0), Cell::new(2, 1)]);

    game.update();
    assert!(game.accepting_input());
    assert!(game.revealed().is_empty());
    assert!(game.is_matched(Cell::new(2, 0)));
}

fn click_point(board: &Board, cell: Cell) -> Position {
    match click(board, cell) {
        Input::Release(point) => point,
        Input::Close => unreachable!(),
    }
}

#[test]
fn play_runs_until_close() {
    let mut game = seeded_game(5);
    let first = click(game.board(), Cell::new(0, 0));
    let mut recorder = Recorder::default();
    let mut script = Script::new(vec![vec![first], vec![], vec![Input::Close]]);

    game.play(&mut recorder, &mut script).unwrap();

    // The closing frame is still drawn; no tick after it.
    assert_eq!(recorder.frames.len(), 3);
    assert_eq!(game.clock().ticks(), 2);
    assert_eq!(game.score(), 0);
    assert_eq!(game.phase(), Phase::WaitingForSecondPick);
}

#[test]
fn close_is_honored_after_round_over() {
    let mut game = seeded_game(11);
    let mut recorder = Recorder::default();

    let mut batches: Vec<Vec<Input>> = pairs(game.board())
        .into_iter()
        .map(|(a, b)| vec![click(game.board(), a), click(game.board(), b)])
        .collect();
    batches.push(vec![click(game.board(), Cell::new(0, 0))]);
    batches.push(vec![Input::Close]);

    game.play(&mut recorder, &mut Script::new(batches)).unwrap();

    assert!(!game.round_active());
    assert_eq!(recorder.frames.len(), 10);
    assert!(recorder.frames.last().unwrap().1.round_over);
}

#[test]
fn painted_frame_shows_score_in_margin() {
    struct BufferRenderer {
        buf: Buffer,
        catalog: Catalog,
    }

    impl Renderer for BufferRenderer {
        fn render(&mut self, board: &Board, scoreboard: Scoreboard) -> io::Result<()> {
            paint(&mut self.buf, board, &self.catalog, scoreboard);
            Ok(())
        }
    }

    let catalog = Catalog::from_art("?", (0..8).map(|i| i.to_string()));
    let mut renderer = BufferRenderer {
        buf: Buffer::empty(SURFACE),
        catalog,
    };
    let mut game = seeded_game(1);
    game.clock_mut().advance(Duration::from_secs(12));
    game.frame(&mut renderer, &mut Script::new(vec![])).unwrap();
    game.frame(&mut renderer, &mut Script::new(vec![])).unwrap();

    let top: String = (0..80).map(|x| renderer.buf[(x, 0)].symbol()).collect();
    assert!(top.ends_with("12"));
}
