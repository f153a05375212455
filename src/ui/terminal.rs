use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::error::GameError;
use crate::play::{Frontend, Game, InputSnapshot};
use crate::scene::Vec2;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Centre of a terminal cell in logical coordinates
pub fn cell_center(column: u16, row: u16) -> Vec2 {
    Vec2::new(column as f32 + 0.5, row as f32 + 0.5)
}

/// Pointer state carried across frames plus the edges of the current one.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pointer: Vec2,
    secondary_held: bool,
}

impl PointerTracker {
    /// Fold one mouse event into `input`.
    pub fn apply(&mut self, mouse: MouseEvent, input: &mut InputSnapshot) {
        self.pointer = cell_center(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => input.primary_pressed = true,
            MouseEventKind::Up(MouseButton::Left) => input.primary_released = true,
            MouseEventKind::Down(MouseButton::Right) => self.secondary_held = true,
            MouseEventKind::Up(MouseButton::Right) => self.secondary_held = false,
            _ => {}
        }
        input.pointer = self.pointer;
        input.secondary_held = self.secondary_held;
    }

    /// Empty snapshot for a new frame: no edges, last known pointer
    pub fn frame_start(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer,
            secondary_held: self.secondary_held,
            ..Default::default()
        }
    }
}

/// Plays a match in the terminal. Each frame waits out the frame interval
/// while collecting crossterm events.
pub struct TerminalFrontend<'a> {
    terminal: &'a mut CrosstermTerminal,
    frame_interval: Duration,
    tracker: PointerTracker,
    open: bool,
}

impl<'a> TerminalFrontend<'a> {
    pub fn new(terminal: &'a mut CrosstermTerminal, frame_interval: Duration) -> Self {
        TerminalFrontend {
            terminal,
            frame_interval,
            tracker: PointerTracker::default(),
            open: true,
        }
    }
}

impl Frontend for TerminalFrontend<'_> {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_input(&mut self) -> Result<InputSnapshot, GameError> {
        let mut input = self.tracker.frame_start();
        let deadline = Instant::now() + self.frame_interval;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() || !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        self.open = false;
                    }
                }
                Event::Mouse(mouse) => self.tracker.apply(mouse, &mut input),
                _ => {}
            }
        }
        Ok(input)
    }

    fn draw(&mut self, game: &Game) -> Result<(), GameError> {
        self.terminal.draw(|frame| super::game_view::render(frame, game))?;
        Ok(())
    }
}
