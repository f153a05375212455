//! Batch AI-vs-AI matches without a terminal, for strategy comparison and
//! smoke testing.

use tracing::info;

use crate::config::AppConfig;
use crate::error::{ConfigError, HeadlessError};
use crate::play::{Game, InputSnapshot, LoopState, MatchOutcome, PlayerKind};

/// Synthetic frame time fed to the state machine
const FRAME_SECONDS: f32 = 1.0 / 30.0;

/// Upper bound on frames per match; a match needs far fewer even with
/// long think times.
const MAX_FRAMES_PER_MATCH: usize = 10_000_000;

/// Aggregate result of a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub matches: usize,
    /// Wins indexed by player
    pub wins: [usize; 2],
    pub ties: usize,
    /// Placements summed over all matches
    pub placements: usize,
}

impl MatchSummary {
    fn record(&mut self, outcome: MatchOutcome, placements: usize) {
        self.matches += 1;
        self.placements += placements;
        match outcome {
            MatchOutcome::Winner(player) => self.wins[player] += 1,
            MatchOutcome::Tie => self.ties += 1,
        }
    }

    pub fn average_placements(&self) -> f32 {
        if self.matches == 0 {
            return 0.0;
        }
        self.placements as f32 / self.matches as f32
    }
}

/// Play `matches` matches between the configured AI players. The opener
/// alternates from one match to the next.
pub fn run_matches(config: &AppConfig, matches: usize) -> Result<MatchSummary, HeadlessError> {
    for (section, player) in [("player_one", &config.player_one), ("player_two", &config.player_two)] {
        if player.kind == PlayerKind::Human {
            return Err(ConfigError::Validation(format!(
                "{section}.kind must not be human in headless mode"
            ))
            .into());
        }
    }

    let mut game = config.new_game()?;
    let mut summary = MatchSummary::default();
    for index in 0..matches {
        if index > 0 {
            game.reset();
        }
        let outcome = play_to_end(&mut game, index)?;
        summary.record(outcome, game.placements());
        info!(
            game = index + 1,
            ?outcome,
            placements = game.placements(),
            "headless match finished"
        );
    }
    Ok(summary)
}

fn play_to_end(game: &mut Game, index: usize) -> Result<MatchOutcome, HeadlessError> {
    let input = InputSnapshot::default();
    for _ in 0..MAX_FRAMES_PER_MATCH {
        if game.loop_state() == LoopState::DisplayEndScreen {
            if let Some(outcome) = game.outcome() {
                return Ok(outcome);
            }
        }
        game.tick(&input, FRAME_SECONDS)?;
    }
    Err(HeadlessError::Stalled {
        game: index + 1,
        frames: MAX_FRAMES_PER_MATCH,
    })
}
