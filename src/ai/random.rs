use crate::game::{BoardPos, GameState, Meeple};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// An agent that selects uniformly at random from legal options.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible matches
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_opponents_meeple(&mut self, state: &GameState) -> Meeple {
        let meeples = state.selectable_meeples();
        assert!(!meeples.is_empty(), "No meeple left to select");
        let idx = self.rng.random_range(0..meeples.len());
        meeples[idx]
    }

    fn select_meeple_position(&mut self, state: &GameState, _meeple: Meeple) -> BoardPos {
        let positions = state.legal_positions();
        assert!(!positions.is_empty(), "No empty field left");
        let idx = self.rng.random_range(0..positions.len());
        positions[idx]
    }

    fn name(&self) -> &str {
        "Random"
    }
}
