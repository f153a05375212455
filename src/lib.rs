//! # 4Wins
//!
//! A two-player meeple placement game on a 4x4 board. Each turn one player
//! picks a meeple from the opponent's bag, and the opponent has to place it.
//! Four meeples in a line that share an attribute win. Players are humans
//! (mouse in the terminal), synchronous AI players, or AI players running on
//! a worker thread.
//!
//! ## Modules
//!
//! - [`game`]: Board, meeples, bags and the win predicate
//! - [`ai`]: Agent trait, strategies, and the threaded decision coordinator
//! - [`play`]: The per-frame turn state machine
//! - [`scene`]: Render-side meeple positions, layout, and animations
//! - [`ui`]: Terminal UI: main menu and match view
//! - [`headless`]: Batch AI-vs-AI matches without a terminal
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod headless;
pub mod play;
pub mod scene;
pub mod ui;
