use serde::{Deserialize, Serialize};

use crate::ai::{Agent, ThreadController};
use crate::game::{MeepleBag, MeepleColor};
use crate::scene::RenderBag;

use super::think_time::FloatRange;

/// Capability tag of a player's controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    /// Pointer-driven human player
    Human,
    /// Agent queried synchronously inside the frame
    IPlayer,
    /// Agent running on a worker thread, polled every frame
    Tc,
}

impl PlayerKind {
    pub fn label(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::IPlayer => "I-Player",
            PlayerKind::Tc => "TC",
        }
    }

    /// Next kind in menu order
    pub fn cycle(self) -> PlayerKind {
        match self {
            PlayerKind::Human => PlayerKind::IPlayer,
            PlayerKind::IPlayer => PlayerKind::Tc,
            PlayerKind::Tc => PlayerKind::Human,
        }
    }
}

/// Who makes a player's decisions, and how.
pub enum Controller {
    Human,
    IPlayer(Box<dyn Agent>),
    Tc(ThreadController),
}

impl Controller {
    pub fn kind(&self) -> PlayerKind {
        match self {
            Controller::Human => PlayerKind::Human,
            Controller::IPlayer(_) => PlayerKind::IPlayer,
            Controller::Tc(_) => PlayerKind::Tc,
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Controller::Human => f.write_str("Human"),
            Controller::IPlayer(agent) => write!(f, "IPlayer({})", agent.name()),
            Controller::Tc(tc) => write!(f, "Tc({})", tc.agent_name()),
        }
    }
}

/// Artificial delays before an AI decision becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThinkTimes {
    pub meeple_choosing: FloatRange,
    pub meeple_position: FloatRange,
}

/// One of the two competitors. Owns its meeple bag and the matching render
/// handles for the whole session.
#[derive(Debug)]
pub struct Player {
    name: String,
    controller: Controller,
    think_times: ThinkTimes,
    bag: MeepleBag,
    render_bag: RenderBag,
}

impl Player {
    pub fn new(name: impl Into<String>, controller: Controller, color: MeepleColor) -> Self {
        Player {
            name: name.into(),
            controller,
            think_times: ThinkTimes::default(),
            bag: MeepleBag::new(color),
            render_bag: RenderBag::default(),
        }
    }

    pub fn with_think_times(mut self, think_times: ThinkTimes) -> Self {
        self.think_times = think_times;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.controller.kind()
    }

    pub fn think_times(&self) -> ThinkTimes {
        self.think_times
    }

    pub fn bag(&self) -> &MeepleBag {
        &self.bag
    }

    pub fn render_bag(&self) -> &RenderBag {
        &self.render_bag
    }

    pub(super) fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub(super) fn bag_mut(&mut self) -> &mut MeepleBag {
        &mut self.bag
    }

    pub(super) fn render_bag_mut(&mut self) -> &mut RenderBag {
        &mut self.render_bag
    }

    pub(super) fn set_render_bag(&mut self, render_bag: RenderBag) {
        self.render_bag = render_bag;
    }

    pub(super) fn reset(&mut self) {
        self.bag.reset();
        self.render_bag.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;

    #[test]
    fn test_controller_kind() {
        assert_eq!(Controller::Human.kind(), PlayerKind::Human);
        let sync = Controller::IPlayer(Box::new(RandomAgent::seeded(1)));
        assert_eq!(sync.kind(), PlayerKind::IPlayer);
        let tc = Controller::Tc(ThreadController::spawn(Box::new(RandomAgent::seeded(1))).unwrap());
        assert_eq!(tc.kind(), PlayerKind::Tc);
    }

    #[test]
    fn test_kind_cycle_visits_all() {
        let mut kind = PlayerKind::Human;
        let mut seen = vec![kind];
        for _ in 0..2 {
            kind = kind.cycle();
            seen.push(kind);
        }
        assert_eq!(seen, vec![PlayerKind::Human, PlayerKind::IPlayer, PlayerKind::Tc]);
        assert_eq!(kind.cycle(), PlayerKind::Human);
    }

    #[test]
    fn test_kind_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: PlayerKind,
        }
        let w: Wrapper = toml::from_str("kind = \"i_player\"").unwrap();
        assert_eq!(w.kind, PlayerKind::IPlayer);
        let w: Wrapper = toml::from_str("kind = \"tc\"").unwrap();
        assert_eq!(w.kind, PlayerKind::Tc);
    }
}
