use crate::game::{BoardPos, GameState, Meeple};

/// Universal interface for all AI decision-makers.
///
/// A turn is split between both players: the active player hands one of the
/// opponent's meeples over, and the opponent then decides where it goes.
pub trait Agent: Send {
    /// Pick one of the opponent's unused meeples for the opponent to place.
    fn select_opponents_meeple(&mut self, state: &GameState) -> Meeple;

    /// Pick an empty board cell for `meeple`, which was taken from this
    /// agent's own bag.
    fn select_meeple_position(&mut self, state: &GameState, meeple: Meeple) -> BoardPos;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
