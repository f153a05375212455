//! Win and tie detection, and the end screen shown afterwards.

use tracing::info;

use super::{Game, GameMenuDecision, InputSnapshot, LoopState, MatchOutcome, Step};
use crate::error::GameError;
use crate::game::Meeple;
use crate::scene::{BoardLayout, MeepleHandle, RainbowAnimation, Vec2};

/// Hue offset between neighbouring winning meeples, in degrees
const RAINBOW_OFFSET_DEGREES: f32 = 20.0;

/// Buttons offered once a match is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuButton {
    Replay,
    BackToMenu,
    Exit,
}

impl MenuButton {
    /// In the order of [`BoardLayout::end_screen_buttons`]
    pub const ALL: [MenuButton; 3] = [MenuButton::Replay, MenuButton::BackToMenu, MenuButton::Exit];

    pub fn label(self) -> &'static str {
        match self {
            MenuButton::Replay => "Restart",
            MenuButton::BackToMenu => "Menu",
            MenuButton::Exit => "Exit",
        }
    }

    pub fn decision(self) -> GameMenuDecision {
        match self {
            MenuButton::Replay => GameMenuDecision::Replay,
            MenuButton::BackToMenu => GameMenuDecision::BackToMenu,
            MenuButton::Exit => GameMenuDecision::ExitGame,
        }
    }

    /// Button under `p`, if any
    pub fn at(layout: &BoardLayout, p: Vec2) -> Option<MenuButton> {
        MenuButton::ALL
            .into_iter()
            .zip(layout.end_screen_buttons())
            .find(|(_, rect)| rect.contains(p))
            .map(|(button, _)| button)
    }
}

impl Game {
    pub(super) fn check_end_condition(&mut self) -> Result<Step, GameError> {
        self.selected_meeple = None;
        self.selected_board_pos = None;

        if let Some(combination) = self.board.check_win_situation() {
            let [a, b, c, d] = combination.meeples;
            let handles = [
                self.placed_handle(a)?,
                self.placed_handle(b)?,
                self.placed_handle(c)?,
                self.placed_handle(d)?,
            ];
            self.winning_meeples = Some(handles);
            self.outcome = Some(MatchOutcome::Winner(self.active_player));
            info!(
                winner = %self.players[self.active_player].name(),
                placements = self.placements,
                line = ?combination.positions,
                "match won"
            );
            return Ok(Step::Goto(LoopState::DisplayEndScreen));
        }

        if self.active_player == self.second_mover && self.board.is_full() {
            self.outcome = Some(MatchOutcome::Tie);
            info!(placements = self.placements, "match tied");
            return Ok(Step::Goto(LoopState::DisplayEndScreen));
        }

        Ok(Step::Goto(LoopState::Init))
    }

    /// Render handle of a placed meeple, looked up in the mover's used set
    /// first and the opponent's second.
    fn placed_handle(&self, meeple: Meeple) -> Result<MeepleHandle, GameError> {
        self.players[self.active_player]
            .render_bag()
            .from_used(&self.scene, meeple)
            .or_else(|| {
                self.players[self.opponent()]
                    .render_bag()
                    .from_used(&self.scene, meeple)
            })
            .ok_or(GameError::WinningMeepleNotFound(meeple))
    }

    /// Cycles rainbow glow over the winning line and waits for a button
    /// click. A tie highlights nothing.
    pub(super) fn display_end_screen(&mut self, input: &InputSnapshot, elapsed: f32) -> Step {
        if self.first_frame {
            let speed = self.settings.rainbow_speed;
            self.rainbow = std::array::from_fn(|i| {
                RainbowAnimation::new(speed, i as f32 * RAINBOW_OFFSET_DEGREES)
            });
        }
        if let Some(handles) = self.winning_meeples {
            for (handle, animation) in handles.into_iter().zip(self.rainbow.iter_mut()) {
                animation.animate(elapsed);
                self.scene.get_mut(handle).set_glow(Some(animation.color()));
            }
        }

        self.hovered_button = MenuButton::at(&self.settings.layout, input.pointer);
        match self.hovered_button {
            Some(button) if input.primary_released => Step::Finish(button.decision()),
            _ => Step::Stay,
        }
    }
}
