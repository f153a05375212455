use std::time::Instant;

use super::{Game, GameMenuDecision, InputSnapshot};
use crate::error::GameError;

/// Where frames come from and go to. The terminal UI is one implementation;
/// tests drive [`Game::tick`] directly.
pub trait Frontend {
    /// False once the user has closed the front end.
    fn is_open(&self) -> bool;

    /// Sample the pointer state for the next frame.
    fn poll_input(&mut self) -> Result<InputSnapshot, GameError>;

    fn draw(&mut self, game: &Game) -> Result<(), GameError>;
}

impl Game {
    /// Drive the current match frame by frame until the end screen yields a
    /// decision or the front end closes.
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<GameMenuDecision, GameError> {
        let mut last_frame = Instant::now();
        while frontend.is_open() {
            let input = frontend.poll_input()?;
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;

            let decision = self.tick(&input, elapsed)?;
            frontend.draw(self)?;
            if decision != GameMenuDecision::KeepPlaying {
                return Ok(decision);
            }
        }
        Ok(GameMenuDecision::ExitGame)
    }
}
