//! Decision-makers for computer players: the `Agent` trait, two strategies,
//! and the threaded coordinator that runs an agent off the frame loop.

mod agent;
mod random;
mod threat;
pub mod thread_controller;

pub use agent::Agent;
pub use random::RandomAgent;
pub use thread_controller::{Decision, ResultSlot, ThreadController};
pub use threat::ThreatAgent;
