//! The per-frame turn state machine of a 4Wins match.
//!
//! [`Game::tick`] is called once per frame with the frame's input and the
//! elapsed time. It runs the handler of the current [`LoopState`], applies
//! at most one transition, and reports whether the match loop should go on.
//! Handlers live in the submodules, grouped by turn phase.

mod end_screen;
mod frontend;
mod input;
mod loop_state;
mod player;
mod select_meeple;
mod select_position;
mod think_time;

pub use end_screen::MenuButton;
pub use frontend::Frontend;
pub use input::InputSnapshot;
pub use loop_state::{GameMenuDecision, LoopState, MatchOutcome, Step};
pub use player::{Controller, Player, PlayerKind, ThinkTimes};
pub use think_time::FloatRange;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, trace};

use crate::ai::{Agent, ThreadController};
use crate::error::GameError;
use crate::game::{Board, BoardPos, GameState, Meeple, MeepleColor};
use crate::scene::{BoardLayout, MeepleHandle, MoveAnimation, RainbowAnimation, Rgb, Scene, Vec2};
use select_position::Drag;

pub const HOVERED_MEEPLE_GLOW: Rgb = Rgb::YELLOW;
pub const SELECTED_MEEPLE_GLOW: Rgb = Rgb::RED;

/// Tunables of a match that are not tied to a player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    pub layout: BoardLayout,
    /// Meeple carry speed in logical units per second
    pub move_speed: f32,
    /// Divisor range for the carry arc height
    pub max_lift: FloatRange,
    /// End-screen hue rotation in degrees per second
    pub rainbow_speed: f32,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            layout: BoardLayout::default(),
            move_speed: 60.0,
            max_lift: FloatRange::new(5.0, 12.0),
            rainbow_speed: 240.0,
            seed: None,
        }
    }
}

pub struct Game {
    players: [Player; 2],
    board: Board,
    scene: Scene,
    settings: GameSettings,
    rng: StdRng,

    /// Player who selects first in this match
    opener: usize,
    active_player: usize,
    /// Player who makes the even-numbered placements of this match
    second_mover: usize,
    loop_state: LoopState,
    first_frame: bool,

    selected_meeple: Option<MeepleHandle>,
    selected_board_pos: Option<BoardPos>,
    hovered_meeple: Option<MeepleHandle>,
    hovered_field: Option<BoardPos>,
    drag: Option<Drag>,
    move_animation: Option<MoveAnimation>,
    remaining_think_time: f32,

    winning_meeples: Option<[MeepleHandle; 4]>,
    rainbow: [RainbowAnimation; 4],
    hovered_button: Option<MenuButton>,
    outcome: Option<MatchOutcome>,
    placements: usize,
}

impl Game {
    /// Set up a match. Player one holds the white meeples, player two the
    /// black ones; player one opens.
    pub fn new(players: [Player; 2], settings: GameSettings) -> Result<Self, GameError> {
        for (seat, expected) in [MeepleColor::White, MeepleColor::Black].into_iter().enumerate() {
            let actual = players[seat].bag().color();
            if actual != expected {
                return Err(GameError::SeatColor { seat, expected, actual });
            }
        }

        let [mut first, mut second] = players;
        let (scene, [first_bag, second_bag]) =
            Scene::new(&settings.layout, [first.bag(), second.bag()]);
        first.set_render_bag(first_bag);
        second.set_render_bag(second_bag);

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Game {
            players: [first, second],
            board: Board::new(),
            scene,
            settings,
            rng,
            opener: 0,
            active_player: 0,
            second_mover: 0,
            loop_state: LoopState::Init,
            first_frame: true,
            selected_meeple: None,
            selected_board_pos: None,
            hovered_meeple: None,
            hovered_field: None,
            drag: None,
            move_animation: None,
            remaining_think_time: 0.0,
            winning_meeples: None,
            rainbow: std::array::from_fn(|_| RainbowAnimation::new(0.0, 0.0)),
            hovered_button: None,
            outcome: None,
            placements: 0,
        })
    }

    /// Prepare a rematch: the other player opens, board and bags are
    /// refilled, every transient selection is dropped.
    pub fn reset(&mut self) {
        self.opener = 1 - self.opener;
        self.active_player = self.opener;
        self.second_mover = self.opener;

        self.board.reset();
        for player in &mut self.players {
            player.reset();
        }
        self.scene.reset();

        self.loop_state = LoopState::Init;
        self.first_frame = true;
        self.selected_meeple = None;
        self.selected_board_pos = None;
        self.hovered_meeple = None;
        self.hovered_field = None;
        self.drag = None;
        self.move_animation = None;
        self.remaining_think_time = 0.0;
        self.winning_meeples = None;
        self.hovered_button = None;
        self.outcome = None;
        self.placements = 0;
        debug!(opener = %self.players[self.active_player].name(), "match reset");
    }

    /// Run one frame of the match.
    pub fn tick(&mut self, input: &InputSnapshot, elapsed: f32) -> Result<GameMenuDecision, GameError> {
        let step = match self.dispatch(input, elapsed) {
            Ok(step) => step,
            Err(err) => {
                error!(state = ?self.loop_state, %err, "turn state machine invariant violated");
                return Err(err);
            }
        };
        Ok(self.apply(step))
    }

    fn dispatch(&mut self, input: &InputSnapshot, elapsed: f32) -> Result<Step, GameError> {
        match self.loop_state {
            LoopState::Init => Ok(self.init_turn()),
            LoopState::SelectMeepleHuman => self.human_select_meeple(input),
            LoopState::SelectMeepleAiSync => self.i_player_select_meeple(),
            LoopState::SelectMeepleAiAsyncStart => self.tc_start_select_meeple(),
            LoopState::SelectMeepleAiAsyncWait => self.tc_wait_for_selected_meeple(),
            LoopState::HighlightSelectedMeeple => self.highlight_selected_meeple(elapsed),
            LoopState::SelectPositionHuman => self.human_select_meeple_position(input),
            LoopState::SelectPositionAiSync => self.i_player_select_meeple_position(),
            LoopState::SelectPositionAiAsyncStart => self.tc_start_select_meeple_position(),
            LoopState::SelectPositionAiAsyncWait => self.tc_wait_for_selected_meeple_position(),
            LoopState::MoveMeepleToPosition => self.move_meeple_to_selected_position(elapsed),
            LoopState::CheckEndCondition => self.check_end_condition(),
            LoopState::DisplayEndScreen => Ok(self.display_end_screen(input, elapsed)),
        }
    }

    fn apply(&mut self, step: Step) -> GameMenuDecision {
        match step {
            Step::Stay => {
                self.first_frame = false;
                GameMenuDecision::KeepPlaying
            }
            Step::Goto(next) => {
                trace!(from = ?self.loop_state, to = ?next, "transition");
                self.loop_state = next;
                self.first_frame = true;
                GameMenuDecision::KeepPlaying
            }
            Step::Finish(decision) => {
                self.first_frame = false;
                debug!(?decision, "end screen decision");
                decision
            }
        }
    }

    fn init_turn(&mut self) -> Step {
        let player = &self.players[self.active_player];
        debug!(player = %player.name(), kind = ?player.kind(), "turn starts");
        Step::Goto(select_meeple_state(player.kind()))
    }

    fn switch_active_player(&mut self) {
        self.active_player = 1 - self.active_player;
    }

    fn opponent(&self) -> usize {
        1 - self.active_player
    }

    fn active_kind(&self) -> PlayerKind {
        self.players[self.active_player].kind()
    }

    /// Snapshot of the match from `player`'s point of view
    fn game_state_for(&self, player: usize) -> GameState {
        GameState::new(
            self.players[player].bag().clone(),
            self.players[1 - player].bag().clone(),
            self.board,
        )
    }

    fn expect_kind(&self, state: LoopState, kind: PlayerKind) -> Result<(), GameError> {
        let actual = self.active_kind();
        if actual != kind {
            return Err(GameError::WrongController {
                state,
                expected: kind.label(),
                actual,
            });
        }
        Ok(())
    }

    fn expect_ai(&self, state: LoopState) -> Result<(), GameError> {
        match self.active_kind() {
            PlayerKind::IPlayer | PlayerKind::Tc => Ok(()),
            actual => Err(GameError::WrongController {
                state,
                expected: "AI",
                actual,
            }),
        }
    }

    fn expect_selected(&self, state: LoopState) -> Result<MeepleHandle, GameError> {
        self.selected_meeple
            .ok_or(GameError::NoSelectedMeeple { state })
    }

    fn agent_mut(&mut self, state: LoopState) -> Result<&mut Box<dyn Agent>, GameError> {
        let actual = self.active_kind();
        match self.players[self.active_player].controller_mut() {
            Controller::IPlayer(agent) => Ok(agent),
            _ => Err(GameError::WrongController {
                state,
                expected: PlayerKind::IPlayer.label(),
                actual,
            }),
        }
    }

    fn thread_controller_mut(&mut self, state: LoopState) -> Result<&mut ThreadController, GameError> {
        let actual = self.active_kind();
        match self.players[self.active_player].controller_mut() {
            Controller::Tc(tc) => Ok(tc),
            _ => Err(GameError::WrongController {
                state,
                expected: PlayerKind::Tc.label(),
                actual,
            }),
        }
    }

    /// Render handle of a meeple the active player picked from the
    /// opponent's bag
    fn selectable_handle(&self, meeple: Meeple) -> Result<MeepleHandle, GameError> {
        self.players[self.opponent()]
            .render_bag()
            .from_unused(&self.scene, meeple)
            .ok_or(GameError::MeepleNotSelectable { meeple })
    }

    /// Put the selected meeple on `pos` for the active player: bag, render
    /// bag, board and scene change together or not at all.
    fn commit_placement(&mut self, handle: MeepleHandle, pos: BoardPos) -> Result<(), GameError> {
        let meeple = self.scene.get(handle).meeple();
        let placer = &self.players[self.active_player];
        if !self.board.is_field_empty(pos) {
            return Err(GameError::InvalidPosition(pos));
        }
        if !placer.bag().contains_unused(meeple) || !placer.render_bag().unused().contains(&handle) {
            return Err(GameError::MeepleNotInBag { meeple });
        }

        let player = &mut self.players[self.active_player];
        let placed = player
            .bag_mut()
            .remove_meeple(meeple)
            .ok_or(GameError::MeepleNotInBag { meeple })?;
        player.render_bag_mut().change_to_used(handle);
        self.board.set_meeple(pos, placed)?;

        let target = self.settings.layout.field_coords(pos);
        let render = self.scene.get_mut(handle);
        render.set_position(target);
        render.set_glow(None);

        self.selected_meeple = None;
        self.selected_board_pos = None;
        self.hovered_field = None;
        self.placements += 1;
        debug!(player = %self.players[self.active_player].name(), %meeple, %pos, "meeple placed");
        Ok(())
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_first_frame(&self) -> bool {
        self.first_frame
    }

    pub fn active_player(&self) -> usize {
        self.active_player
    }

    /// Player who selected first in the current match
    pub fn opener(&self) -> usize {
        self.opener
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.settings.layout
    }

    pub fn selected_meeple(&self) -> Option<MeepleHandle> {
        self.selected_meeple
    }

    pub fn selected_board_pos(&self) -> Option<BoardPos> {
        self.selected_board_pos
    }

    pub fn hovered_meeple(&self) -> Option<MeepleHandle> {
        self.hovered_meeple
    }

    pub fn hovered_field(&self) -> Option<BoardPos> {
        self.hovered_field
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn hovered_button(&self) -> Option<MenuButton> {
        self.hovered_button
    }

    pub fn winning_meeples(&self) -> Option<[MeepleHandle; 4]> {
        self.winning_meeples
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Meeples placed so far in this match
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Where a meeple would be drawn on the given field
    pub fn field_coords(&self, pos: BoardPos) -> Vec2 {
        self.settings.layout.field_coords(pos)
    }
}

fn select_meeple_state(kind: PlayerKind) -> LoopState {
    match kind {
        PlayerKind::Human => LoopState::SelectMeepleHuman,
        PlayerKind::IPlayer => LoopState::SelectMeepleAiSync,
        PlayerKind::Tc => LoopState::SelectMeepleAiAsyncStart,
    }
}

fn select_position_state(kind: PlayerKind) -> LoopState {
    match kind {
        PlayerKind::Human => LoopState::SelectPositionHuman,
        PlayerKind::IPlayer => LoopState::SelectPositionAiSync,
        PlayerKind::Tc => LoopState::SelectPositionAiAsyncStart,
    }
}
