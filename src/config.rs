use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::{Agent, RandomAgent, ThreadController, ThreatAgent};
use crate::error::{ConfigError, GameError};
use crate::game::MeepleColor;
use crate::play::{Controller, FloatRange, Game, GameSettings, Player, PlayerKind, ThinkTimes};
use crate::scene::BoardLayout;

/// Decision strategy of a computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Random,
    Threat,
}

impl Strategy {
    pub fn build(self, seed: Option<u64>) -> Box<dyn Agent> {
        match (self, seed) {
            (Strategy::Random, Some(seed)) => Box::new(RandomAgent::seeded(seed)),
            (Strategy::Random, None) => Box::new(RandomAgent::new()),
            (Strategy::Threat, Some(seed)) => Box::new(ThreatAgent::seeded(seed)),
            (Strategy::Threat, None) => Box::new(ThreatAgent::new()),
        }
    }
}

/// One player's seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
    /// Ignored for human players
    pub strategy: Strategy,
    /// Seconds an AI shows its chosen meeple before handing it over
    pub meeple_think_time: FloatRange,
    /// Seconds an AI waits before carrying the meeple to its field
    pub position_think_time: FloatRange,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            name: "Player".to_string(),
            kind: PlayerKind::Human,
            strategy: Strategy::Threat,
            meeple_think_time: FloatRange::new(0.3, 0.8),
            position_think_time: FloatRange::new(0.2, 0.6),
        }
    }
}

impl PlayerConfig {
    fn named(name: &str, kind: PlayerKind) -> Self {
        PlayerConfig {
            name: name.to_string(),
            kind,
            ..Default::default()
        }
    }

    /// Create the player, spawning a worker thread for TC players.
    pub fn build(&self, color: MeepleColor, seed: Option<u64>) -> Result<Player, GameError> {
        let controller = match self.kind {
            PlayerKind::Human => Controller::Human,
            PlayerKind::IPlayer => Controller::IPlayer(self.strategy.build(seed)),
            PlayerKind::Tc => Controller::Tc(ThreadController::spawn(self.strategy.build(seed))?),
        };
        Ok(Player::new(self.name.clone(), controller, color).with_think_times(ThinkTimes {
            meeple_choosing: self.meeple_think_time,
            meeple_position: self.position_think_time,
        }))
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{section}.name must not be empty"
            )));
        }
        if !self.meeple_think_time.is_valid() {
            return Err(ConfigError::Validation(format!(
                "{section}.meeple_think_time must satisfy 0 <= min <= max"
            )));
        }
        if !self.position_think_time.is_valid() {
            return Err(ConfigError::Validation(format!(
                "{section}.position_think_time must satisfy 0 <= min <= max"
            )));
        }
        Ok(())
    }
}

/// Meeple carry and end-screen animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Carry speed in terminal cells per second
    pub move_speed: f32,
    /// Divisor range for the arc height; larger means flatter
    pub max_lift: FloatRange,
    /// Rainbow hue rotation in degrees per second
    pub rainbow_speed: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let settings = GameSettings::default();
        AnimationConfig {
            move_speed: settings.move_speed,
            max_lift: settings.max_lift,
            rainbow_speed: settings.rainbow_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Target frame interval of the terminal front end
    pub frame_millis: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { frame_millis: 33 }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seeds the game and every agent; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub player_one: PlayerConfig,
    pub player_two: PlayerConfig,
    pub animation: AnimationConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            seed: None,
            player_one: PlayerConfig::named("Player 1", PlayerKind::Human),
            player_two: PlayerConfig::named("Player 2", PlayerKind::Tc),
            animation: AnimationConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player_one.validate("player_one")?;
        self.player_two.validate("player_two")?;

        if !(self.animation.move_speed.is_finite() && self.animation.move_speed > 0.0) {
            return Err(ConfigError::Validation(
                "animation.move_speed must be > 0".into(),
            ));
        }
        if !self.animation.max_lift.is_valid() || self.animation.max_lift.min <= 0.0 {
            return Err(ConfigError::Validation(
                "animation.max_lift must satisfy 0 < min <= max".into(),
            ));
        }
        if !self.animation.rainbow_speed.is_finite() {
            return Err(ConfigError::Validation(
                "animation.rainbow_speed must be finite".into(),
            ));
        }
        if self.ui.frame_millis == 0 {
            return Err(ConfigError::Validation(
                "ui.frame_millis must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings {
            layout: BoardLayout::default(),
            move_speed: self.animation.move_speed,
            max_lift: self.animation.max_lift,
            rainbow_speed: self.animation.rainbow_speed,
            seed: self.seed,
        }
    }

    /// Set up a match between the two configured players. Player one plays
    /// white and opens.
    pub fn new_game(&self) -> Result<Game, GameError> {
        let agent_seed = |offset: u64| self.seed.map(|seed| seed.wrapping_add(offset));
        let players = [
            self.player_one.build(MeepleColor::White, agent_seed(1))?,
            self.player_two.build(MeepleColor::Black, agent_seed(2))?,
        ];
        Game::new(players, self.settings())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}
