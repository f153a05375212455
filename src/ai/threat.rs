use crate::game::{Board, BoardPos, GameState, Meeple};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// One-ply threat search: wins when it can, never hands over a meeple that
/// wins on the spot if a safe one exists, and places so that as many of the
/// meeples it must hand over next stay safe.
pub struct ThreatAgent {
    rng: StdRng,
}

impl ThreatAgent {
    pub fn new() -> Self {
        ThreatAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        ThreatAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick<T: Copy>(&mut self, options: &[T]) -> T {
        assert!(!options.is_empty(), "No option to pick from");
        options[self.rng.random_range(0..options.len())]
    }
}

impl Default for ThreatAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// True if `meeple` completes a winning line on some empty cell.
fn gives_immediate_win(board: &Board, meeple: Meeple) -> bool {
    board
        .empty_fields()
        .into_iter()
        .any(|pos| board.is_winning_placement(pos, meeple))
}

/// How many of `candidates` could be handed over without losing at once.
fn safe_handovers(board: &Board, candidates: &[Meeple]) -> usize {
    candidates
        .iter()
        .filter(|&&m| !gives_immediate_win(board, m))
        .count()
}

impl Agent for ThreatAgent {
    fn select_opponents_meeple(&mut self, state: &GameState) -> Meeple {
        let meeples = state.selectable_meeples();
        let safe: Vec<Meeple> = meeples
            .iter()
            .copied()
            .filter(|&m| !gives_immediate_win(state.board(), m))
            .collect();
        if safe.is_empty() {
            self.pick(meeples)
        } else {
            self.pick(&safe)
        }
    }

    fn select_meeple_position(&mut self, state: &GameState, meeple: Meeple) -> BoardPos {
        let board = state.board();
        let positions = state.legal_positions();

        let winning: Vec<BoardPos> = positions
            .iter()
            .copied()
            .filter(|&pos| board.is_winning_placement(pos, meeple))
            .collect();
        if !winning.is_empty() {
            return self.pick(&winning);
        }

        let mut best = Vec::new();
        let mut best_score = 0;
        for pos in positions {
            let mut next = *board;
            if next.set_meeple(pos, meeple).is_err() {
                continue;
            }
            let score = safe_handovers(&next, state.opponent_bag().unused());
            if best.is_empty() || score > best_score {
                best_score = score;
                best = vec![pos];
            } else if score == best_score {
                best.push(pos);
            }
        }
        self.pick(&best)
    }

    fn name(&self) -> &str {
        "Threat"
    }
}
