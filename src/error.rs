use std::path::PathBuf;

use crate::game::{BoardPos, Meeple, MeepleColor, PlaceError};
use crate::play::{LoopState, PlayerKind};

/// Errors raised by the asynchronous AI coordinator.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("failed to spawn decision worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("a decision request is still outstanding")]
    Busy,

    #[error("no decision request was submitted")]
    NotSubmitted,

    #[error("decision result is not available yet")]
    NotReady,

    #[error("decision result was already retrieved")]
    AlreadyConsumed,

    #[error("expected a {expected} decision, worker produced {actual}")]
    UnexpectedDecision {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("decision worker has stopped")]
    WorkerDisconnected,
}

/// Turn-state machine invariant violations. None of these is recoverable:
/// they mean the match state is inconsistent and the loop must stop.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{state:?} cannot run for a {actual:?} player (expected {expected})")]
    WrongController {
        state: LoopState,
        expected: &'static str,
        actual: PlayerKind,
    },

    #[error("{state:?} requires a selected meeple")]
    NoSelectedMeeple { state: LoopState },

    #[error("{state:?} requires a selected board position")]
    NoSelectedPosition { state: LoopState },

    #[error("meeple {meeple} is not available in the opponent's bag")]
    MeepleNotSelectable { meeple: Meeple },

    #[error("meeple {meeple} cannot be taken from the placing player's bag")]
    MeepleNotInBag { meeple: Meeple },

    #[error("decision produced invalid board position {0}")]
    InvalidPosition(BoardPos),

    #[error("seat {seat} must hold the {expected:?} meeples, got {actual:?}")]
    SeatColor {
        seat: usize,
        expected: MeepleColor,
        actual: MeepleColor,
    },

    #[error("winning meeple {0} has no placed counterpart in either bag")]
    WinningMeepleNotFound(Meeple),

    #[error("placement failed: {0}")]
    Placement(#[from] PlaceError),

    #[error("AI coordinator error: {0}")]
    Coordinator(#[from] CoordinatorError),

    #[error("front end I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Failures of a batch of headless matches.
#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("match {game} did not finish within {frames} frames")]
    Stalled { game: usize, frames: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_error_display() {
        let err = CoordinatorError::UnexpectedDecision {
            expected: "meeple",
            actual: "position",
        };
        assert_eq!(
            err.to_string(),
            "expected a meeple decision, worker produced position"
        );
    }

    #[test]
    fn test_game_error_display() {
        let err = GameError::WrongController {
            state: LoopState::SelectMeepleHuman,
            expected: "human",
            actual: PlayerKind::Tc,
        };
        assert_eq!(
            err.to_string(),
            "SelectMeepleHuman cannot run for a Tc player (expected human)"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("animation.move_speed must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: animation.move_speed must be > 0"
        );
    }
}
