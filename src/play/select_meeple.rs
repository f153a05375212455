//! Picking the meeple the opponent will have to place.

use tracing::debug;

use super::{
    select_position_state, Game, InputSnapshot, LoopState, PlayerKind, Step, HOVERED_MEEPLE_GLOW,
    SELECTED_MEEPLE_GLOW,
};
use crate::error::GameError;
use crate::game::Meeple;

impl Game {
    pub(super) fn human_select_meeple(&mut self, input: &InputSnapshot) -> Result<Step, GameError> {
        self.expect_kind(LoopState::SelectMeepleHuman, PlayerKind::Human)?;

        let under_pointer = self.players[self.opponent()]
            .render_bag()
            .meeple_at_position(&self.scene, input.pointer);

        if input.primary_released {
            if let Some(handle) = under_pointer {
                self.clear_hovered_meeple();
                self.scene.get_mut(handle).set_glow(Some(SELECTED_MEEPLE_GLOW));
                self.selected_meeple = Some(handle);
                debug!(
                    player = %self.players[self.active_player].name(),
                    meeple = %self.scene.get(handle).meeple(),
                    "meeple selected"
                );
                return Ok(self.hand_over_selected_meeple());
            }
        }

        if under_pointer != self.hovered_meeple {
            self.clear_hovered_meeple();
            if let Some(handle) = under_pointer {
                self.scene.get_mut(handle).set_glow(Some(HOVERED_MEEPLE_GLOW));
                self.hovered_meeple = Some(handle);
            }
        }
        Ok(Step::Stay)
    }

    pub(super) fn i_player_select_meeple(&mut self) -> Result<Step, GameError> {
        let state = LoopState::SelectMeepleAiSync;
        let snapshot = self.game_state_for(self.active_player);
        let meeple = self.agent_mut(state)?.select_opponents_meeple(&snapshot);
        self.ai_selected(meeple)
    }

    pub(super) fn tc_start_select_meeple(&mut self) -> Result<Step, GameError> {
        let snapshot = self.game_state_for(self.active_player);
        self.thread_controller_mut(LoopState::SelectMeepleAiAsyncStart)?
            .run_select_opponents_meeple(snapshot)?;
        Ok(Step::Goto(LoopState::SelectMeepleAiAsyncWait))
    }

    pub(super) fn tc_wait_for_selected_meeple(&mut self) -> Result<Step, GameError> {
        let tc = self.thread_controller_mut(LoopState::SelectMeepleAiAsyncWait)?;
        if !tc.is_result_available()? {
            return Ok(Step::Stay);
        }
        let meeple = tc.opponents_meeple()?;
        self.ai_selected(meeple)
    }

    /// Shows the AI's choice for a moment before handing it over.
    pub(super) fn highlight_selected_meeple(&mut self, elapsed: f32) -> Result<Step, GameError> {
        self.expect_ai(LoopState::HighlightSelectedMeeple)?;
        let handle = self.expect_selected(LoopState::HighlightSelectedMeeple)?;

        if self.first_frame {
            self.remaining_think_time = self.players[self.active_player]
                .think_times()
                .meeple_choosing
                .sample(&mut self.rng);
        }
        if self.remaining_think_time > 0.0 {
            self.remaining_think_time -= elapsed;
            return Ok(Step::Stay);
        }

        self.scene.get_mut(handle).set_glow(Some(SELECTED_MEEPLE_GLOW));
        Ok(self.hand_over_selected_meeple())
    }

    fn ai_selected(&mut self, meeple: Meeple) -> Result<Step, GameError> {
        let handle = self.selectable_handle(meeple)?;
        self.selected_meeple = Some(handle);
        debug!(
            player = %self.players[self.active_player].name(),
            %meeple,
            "meeple selected"
        );
        Ok(Step::Goto(LoopState::HighlightSelectedMeeple))
    }

    /// The chooser's part of the turn is over: the opponent places next.
    fn hand_over_selected_meeple(&mut self) -> Step {
        self.switch_active_player();
        Step::Goto(select_position_state(self.active_kind()))
    }

    fn clear_hovered_meeple(&mut self) {
        if let Some(handle) = self.hovered_meeple.take() {
            if Some(handle) != self.selected_meeple {
                self.scene.get_mut(handle).set_glow(None);
            }
        }
    }
}
