//! Core 4Wins domain model: meeples, bags, the 4×4 board with its win
//! predicate, and the per-decision game state snapshot.

mod bag;
mod board;
mod meeple;
mod state;

pub use bag::MeepleBag;
pub use board::{Board, BoardPos, PlaceError, WinCombination, BOARD_SIZE};
pub use meeple::{Meeple, MeepleColor, MeepleDetail, MeepleShape, MeepleSize, MEEPLES_PER_BAG};
pub use state::GameState;
