use super::{Board, BoardPos, Meeple, MeepleBag};

/// A decision-maker's view of the match: its own bag, the opponent's bag and
/// the shared board. Built fresh for every decision and owned, so it can be
/// handed to a worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    own_bag: MeepleBag,
    opponent_bag: MeepleBag,
    board: Board,
}

impl GameState {
    pub fn new(own_bag: MeepleBag, opponent_bag: MeepleBag, board: Board) -> Self {
        GameState {
            own_bag,
            opponent_bag,
            board,
        }
    }

    pub fn own_bag(&self) -> &MeepleBag {
        &self.own_bag
    }

    pub fn opponent_bag(&self) -> &MeepleBag {
        &self.opponent_bag
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Meeples the decision-maker may hand to the opponent
    pub fn selectable_meeples(&self) -> &[Meeple] {
        self.opponent_bag.unused()
    }

    /// Cells a meeple may be placed on
    pub fn legal_positions(&self) -> Vec<BoardPos> {
        self.board.empty_fields()
    }
}
