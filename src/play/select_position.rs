//! Putting the handed-over meeple on the board: drag-and-drop for humans,
//! an animated carry for AI players.

use tracing::debug;

use super::{Game, InputSnapshot, LoopState, PlayerKind, Step};
use crate::error::GameError;
use crate::game::BoardPos;
use crate::scene::{MeepleHandle, MoveAnimation, Vec2};

/// A meeple held by the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Drag {
    /// Meeple position relative to the pointer
    mouse_offset: Vec2,
    /// Where the meeple snaps back to on an invalid drop
    original_position: Vec2,
}

impl Game {
    pub(super) fn human_select_meeple_position(&mut self, input: &InputSnapshot) -> Result<Step, GameError> {
        let state = LoopState::SelectPositionHuman;
        self.expect_kind(state, PlayerKind::Human)?;
        let handle = self.expect_selected(state)?;

        if self.drag.is_none()
            && input.primary_pressed
            && self.scene.get(handle).contains_position(input.pointer)
        {
            let position = self.scene.get(handle).position();
            self.drag = Some(Drag {
                mouse_offset: position - input.pointer,
                original_position: position,
            });
        }
        let Some(drag) = self.drag else {
            return Ok(Step::Stay);
        };

        let meeple = self.scene.get_mut(handle);
        meeple.set_position(input.pointer + drag.mouse_offset);
        let field = self.settings.layout.board_pos_for_position(meeple.coords());
        self.hovered_field = field;
        if !input.primary_released {
            return Ok(Step::Stay);
        }

        self.drag = None;
        self.hovered_field = None;
        match field {
            Some(pos) if self.board.is_field_empty(pos) => {
                self.selected_board_pos = Some(pos);
                self.commit_placement(handle, pos)?;
                Ok(Step::Goto(LoopState::CheckEndCondition))
            }
            _ => {
                debug!(?field, "drop rejected");
                self.scene
                    .get_mut(handle)
                    .set_position(drag.original_position);
                Ok(Step::Stay)
            }
        }
    }

    pub(super) fn i_player_select_meeple_position(&mut self) -> Result<Step, GameError> {
        let state = LoopState::SelectPositionAiSync;
        self.expect_kind(state, PlayerKind::IPlayer)?;
        let handle = self.expect_selected(state)?;

        let meeple = self.scene.get(handle).meeple();
        let snapshot = self.game_state_for(self.active_player);
        let pos = self
            .agent_mut(state)?
            .select_meeple_position(&snapshot, meeple);
        self.ai_positioned(pos)
    }

    pub(super) fn tc_start_select_meeple_position(&mut self) -> Result<Step, GameError> {
        let state = LoopState::SelectPositionAiAsyncStart;
        self.expect_kind(state, PlayerKind::Tc)?;
        let handle = self.expect_selected(state)?;

        let meeple = self.scene.get(handle).meeple();
        let snapshot = self.game_state_for(self.active_player);
        self.thread_controller_mut(state)?
            .run_select_meeple_position(snapshot, meeple)?;
        Ok(Step::Goto(LoopState::SelectPositionAiAsyncWait))
    }

    pub(super) fn tc_wait_for_selected_meeple_position(&mut self) -> Result<Step, GameError> {
        let tc = self.thread_controller_mut(LoopState::SelectPositionAiAsyncWait)?;
        if !tc.is_result_available()? {
            return Ok(Step::Stay);
        }
        let pos = tc.meeple_position()?;
        self.ai_positioned(pos)
    }

    fn ai_positioned(&mut self, pos: BoardPos) -> Result<Step, GameError> {
        if !self.board.is_field_empty(pos) {
            return Err(GameError::InvalidPosition(pos));
        }
        self.selected_board_pos = Some(pos);
        debug!(player = %self.players[self.active_player].name(), %pos, "position chosen");
        Ok(Step::Goto(LoopState::MoveMeepleToPosition))
    }

    /// Carry the selected meeple to its field, then commit the placement
    /// on the frame the animation completes.
    pub(super) fn move_meeple_to_selected_position(&mut self, elapsed: f32) -> Result<Step, GameError> {
        let state = LoopState::MoveMeepleToPosition;
        self.expect_ai(state)?;
        let handle = self.expect_selected(state)?;
        let pos = self
            .selected_board_pos
            .ok_or(GameError::NoSelectedPosition { state })?;

        let mut animation = match self.move_animation.take() {
            Some(animation) if !self.first_frame => animation,
            _ => self.start_move(handle, pos),
        };

        if self.remaining_think_time > 0.0 {
            self.remaining_think_time -= elapsed;
            self.move_animation = Some(animation);
            return Ok(Step::Stay);
        }

        let position = animation.advance(self.settings.move_speed, elapsed);
        if !animation.is_finished() {
            self.scene.get_mut(handle).set_position(position);
            self.move_animation = Some(animation);
            return Ok(Step::Stay);
        }

        self.commit_placement(handle, pos)?;
        Ok(Step::Goto(LoopState::CheckEndCondition))
    }

    fn start_move(&mut self, handle: MeepleHandle, pos: BoardPos) -> MoveAnimation {
        let start = self.scene.get(handle).position();
        let target = self.settings.layout.field_coords(pos);
        let lift_divisor = self.settings.max_lift.sample(&mut self.rng);
        self.remaining_think_time = self.players[self.active_player]
            .think_times()
            .meeple_position
            .sample(&mut self.rng);
        MoveAnimation::new(start, target, lift_divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{Controller, Player, ThinkTimes, FloatRange};
    use super::*;
    use crate::ai::Agent;
    use crate::game::{GameState, Meeple, MeepleColor};

    /// Human vs human, player one has handed over a meeple; player two is
    /// about to place it.
    fn placing_game() -> (Game, MeepleHandle) {
        let mut game = game(PlayerKind::Human, PlayerKind::Human);
        game.tick(&InputSnapshot::default(), 0.0).unwrap();
        let handle = game.players()[1].render_bag().unused()[0];
        let at = game.scene().get(handle).coords();
        game.tick(&InputSnapshot::release(at), 0.0).unwrap();
        assert_eq!(game.loop_state(), LoopState::SelectPositionHuman);
        (game, handle)
    }

    /// Press on the meeple, move to `target`, release there.
    fn drag_and_drop(game: &mut Game, handle: MeepleHandle, target: Vec2) {
        let grab = game.scene().get(handle).coords();
        game.tick(&InputSnapshot::press(grab), 0.0).unwrap();
        assert!(game.is_dragging());
        game.tick(&InputSnapshot::hover(target), 0.0).unwrap();
        game.tick(&InputSnapshot::release(target), 0.0).unwrap();
    }

    #[test]
    fn test_drag_shows_hovered_field() {
        let (mut game, handle) = placing_game();
        let grab = game.scene().get(handle).coords();
        let target = game.layout().field_rect(BoardPos::new(2, 3)).center();

        game.tick(&InputSnapshot::press(grab), 0.0).unwrap();
        game.tick(&InputSnapshot::hover(target), 0.0).unwrap();
        assert_eq!(game.hovered_field(), Some(BoardPos::new(2, 3)));
        assert_eq!(game.scene().get(handle).coords(), target);
        assert_eq!(game.loop_state(), LoopState::SelectPositionHuman);
    }

    #[test]
    fn test_press_outside_meeple_does_not_drag() {
        let (mut game, handle) = placing_game();
        let before = game.scene().get(handle).position();
        let elsewhere = game.layout().field_rect(BoardPos::new(0, 0)).center();
        game.tick(&InputSnapshot::press(elsewhere), 0.0).unwrap();
        game.tick(&InputSnapshot::release(elsewhere), 0.0).unwrap();
        assert!(!game.is_dragging());
        assert_eq!(game.scene().get(handle).position(), before);
        assert_eq!(game.board().meeple_count(), 0);
    }

    #[test]
    fn test_drop_on_occupied_field_snaps_back() {
        let (mut game, handle) = placing_game();
        let occupied = BoardPos::new(1, 1);
        game.board.set_meeple(occupied, Meeple::from_bits(0)).unwrap();
        let board_before = game.board;
        let home = game.scene().get(handle).position();

        let target = game.layout().field_rect(occupied).center();
        drag_and_drop(&mut game, handle, target);

        assert_eq!(game.board, board_before);
        assert_eq!(game.scene().get(handle).position(), home);
        assert_eq!(game.loop_state(), LoopState::SelectPositionHuman);
        assert_eq!(game.selected_meeple(), Some(handle));
        assert!(!game.is_dragging());
        assert!(game.hovered_field().is_none());
        assert_eq!(game.players()[1].bag().unused().len(), 8);
    }

    #[test]
    fn test_drop_off_board_snaps_back() {
        let (mut game, handle) = placing_game();
        let home = game.scene().get(handle).position();
        drag_and_drop(&mut game, handle, Vec2::new(1.0, 20.0));
        assert_eq!(game.scene().get(handle).position(), home);
        assert_eq!(game.loop_state(), LoopState::SelectPositionHuman);
    }

    #[test]
    fn test_drop_on_empty_field_commits_placement() {
        let (mut game, handle) = placing_game();
        let meeple = game.scene().get(handle).meeple();
        let pos = BoardPos::new(3, 0);
        let target = game.layout().field_rect(pos).center();
        drag_and_drop(&mut game, handle, target);

        assert_eq!(game.loop_state(), LoopState::CheckEndCondition);
        assert_eq!(game.board().get(pos), Some(meeple));
        let placer = &game.players()[1];
        assert!(!placer.bag().contains_unused(meeple));
        assert!(placer.bag().used().contains(&meeple));
        assert!(placer.render_bag().used().contains(&handle));
        assert!(!placer.render_bag().unused().contains(&handle));
        assert_eq!(game.scene().get(handle).position(), game.field_coords(pos));
        assert_eq!(game.scene().get(handle).glow(), None);
        assert_eq!(game.placements(), 1);
    }

    #[test]
    fn test_rejected_commit_changes_nothing() {
        let (mut game, handle) = placing_game();
        let occupied = BoardPos::new(0, 2);
        game.board.set_meeple(occupied, Meeple::from_bits(0)).unwrap();
        let board_before = game.board;
        let bag_before = game.players()[1].bag().clone();
        let render_before = game.players()[1].render_bag().clone();

        let err = game.commit_placement(handle, occupied).unwrap_err();
        assert!(matches!(err, GameError::InvalidPosition(p) if p == occupied));
        assert_eq!(game.board, board_before);
        assert_eq!(game.players()[1].bag(), &bag_before);
        assert_eq!(game.players()[1].render_bag(), &render_before);
        assert_eq!(game.placements(), 0);
        assert_eq!(game.selected_meeple(), Some(handle));
    }

    #[test]
    fn test_commit_rejects_meeple_of_other_player() {
        let (mut game, _) = placing_game();
        let foreign = game.players()[0].render_bag().unused()[0];
        let err = game.commit_placement(foreign, BoardPos::new(0, 0)).unwrap_err();
        assert!(matches!(err, GameError::MeepleNotInBag { .. }));
        assert_eq!(game.board().meeple_count(), 0);
    }

    #[test]
    fn test_move_animation_commits_exactly_once() {
        let mut game = game(PlayerKind::IPlayer, PlayerKind::IPlayer);
        run_until(&mut game, 1000, |g| g.loop_state() == LoopState::MoveMeepleToPosition);
        let handle = game.selected_meeple().unwrap();
        let pos = game.selected_board_pos().unwrap();
        let start = game.scene().get(handle).position();

        let input = InputSnapshot::default();
        let mut frames = 0;
        let mut moved = false;
        while game.loop_state() == LoopState::MoveMeepleToPosition {
            assert_eq!(game.placements(), 0);
            assert!(game.board().is_field_empty(pos));
            game.tick(&input, 1.0 / 60.0).unwrap();
            moved |= game.scene().get(handle).position() != start;
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        assert!(frames > 1);
        assert!(moved);
        assert_eq!(game.loop_state(), LoopState::CheckEndCondition);
        assert_eq!(game.placements(), 1);
        assert_eq!(game.board().meeple_count(), 1);
        assert_eq!(game.scene().get(handle).position(), game.field_coords(pos));

        game.tick(&input, 1.0 / 60.0).unwrap();
        assert_eq!(game.placements(), 1);
        assert_eq!(game.board().meeple_count(), 1);
    }

    #[test]
    fn test_move_waits_for_position_think_time() {
        let think = ThinkTimes {
            meeple_choosing: FloatRange::ZERO,
            meeple_position: FloatRange::fixed(0.25),
        };
        let mut game = Game::new(
            [
                Player::new("one", controller(PlayerKind::IPlayer, 1), MeepleColor::White),
                Player::new("two", controller(PlayerKind::IPlayer, 2), MeepleColor::Black)
                    .with_think_times(think),
            ],
            settings(),
        )
        .unwrap();
        run_until(&mut game, 1000, |g| g.loop_state() == LoopState::MoveMeepleToPosition);
        let handle = game.selected_meeple().unwrap();
        let start = game.scene().get(handle).position();

        for _ in 0..3 {
            game.tick(&InputSnapshot::default(), 0.1).unwrap();
            assert_eq!(game.scene().get(handle).position(), start);
        }
        run_until(&mut game, 10_000, |g| g.loop_state() == LoopState::CheckEndCondition);
        assert_eq!(game.placements(), 1);
    }

    struct FixedPositionAgent;

    impl Agent for FixedPositionAgent {
        fn select_opponents_meeple(&mut self, state: &GameState) -> Meeple {
            state.selectable_meeples()[0]
        }

        fn select_meeple_position(&mut self, _state: &GameState, _meeple: Meeple) -> BoardPos {
            BoardPos::new(0, 0)
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    #[test]
    fn test_ai_position_on_occupied_field_is_fatal() {
        let mut game = Game::new(
            [
                Player::new("one", Controller::IPlayer(Box::new(FixedPositionAgent)), MeepleColor::White),
                Player::new("two", Controller::IPlayer(Box::new(FixedPositionAgent)), MeepleColor::Black),
            ],
            settings(),
        )
        .unwrap();
        let input = InputSnapshot::default();
        let mut result = Ok(super::super::GameMenuDecision::KeepPlaying);
        for _ in 0..10_000 {
            result = game.tick(&input, 0.05);
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(result, Err(GameError::InvalidPosition(p)) if p == BoardPos::new(0, 0)));
        assert_eq!(game.placements(), 1);
    }

    #[test]
    fn test_move_requires_position() {
        let mut game = game(PlayerKind::IPlayer, PlayerKind::IPlayer);
        run_until(&mut game, 1000, |g| g.loop_state() == LoopState::MoveMeepleToPosition);
        game.selected_board_pos = None;
        assert!(matches!(
            game.tick(&InputSnapshot::default(), 0.1),
            Err(GameError::NoSelectedPosition { .. })
        ));
    }
}
