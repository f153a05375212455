use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use super::menu::{self, MenuChoice, MenuState};
use super::terminal::{CrosstermTerminal, TerminalFrontend};
use crate::config::AppConfig;
use crate::error::GameError;
use crate::play::{Game, GameMenuDecision};

pub struct App {
    config: AppConfig,
    menu: MenuState,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            config,
            menu: MenuState::new(),
        }
    }

    /// Main application loop: menu, then matches until the user leaves.
    pub fn run(&mut self, terminal: &mut CrosstermTerminal) -> Result<(), GameError> {
        loop {
            if self.run_menu(terminal)? == MenuChoice::Quit {
                return Ok(());
            }

            info!(
                player_one = ?self.config.player_one.kind,
                player_two = ?self.config.player_two.kind,
                "session started"
            );
            let mut game = self.config.new_game()?;
            if !self.play_session(&mut game, terminal)? {
                return Ok(());
            }
        }
    }

    fn run_menu(&mut self, terminal: &mut CrosstermTerminal) -> Result<MenuChoice, GameError> {
        loop {
            terminal.draw(|f| menu::render(f, &self.menu, &self.config))?;
            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(choice) = self.menu.handle_key(key.code, &mut self.config) {
                    return Ok(choice);
                }
            }
        }
    }

    /// Play matches back to back. Returns true when the user asked for the
    /// menu, false when the application should exit.
    fn play_session(&self, game: &mut Game, terminal: &mut CrosstermTerminal) -> Result<bool, GameError> {
        let frame_interval = Duration::from_millis(self.config.ui.frame_millis);
        loop {
            let mut frontend = TerminalFrontend::new(terminal, frame_interval);
            match game.run(&mut frontend)? {
                GameMenuDecision::Replay => game.reset(),
                GameMenuDecision::BackToMenu => return Ok(true),
                GameMenuDecision::ExitGame | GameMenuDecision::KeepPlaying => return Ok(false),
            }
        }
    }
}
