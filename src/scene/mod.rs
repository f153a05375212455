//! Render-side model of a match: logical geometry, board layout, one
//! drawable representative per meeple, and the animations the turn state
//! machine drives. Nothing here draws; front ends read it.

pub mod animation;
mod geometry;
mod layout;
mod meeple;

pub use animation::{MoveAnimation, RainbowAnimation};
pub use geometry::{Rect, Rgb, Vec2};
pub use layout::BoardLayout;
pub use meeple::{MeepleHandle, RenderBag, RenderMeeple, Scene};
