use crate::game::{Meeple, MeepleBag};

use super::geometry::{Rect, Rgb, Vec2};
use super::layout::BoardLayout;

/// Index of a meeple's render representative inside the [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeepleHandle(usize);

/// Drawable state of one meeple.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMeeple {
    meeple: Meeple,
    owner: usize,
    position: Vec2,
    home: Vec2,
    size: Vec2,
    glow: Option<Rgb>,
}

impl RenderMeeple {
    pub fn meeple(&self) -> Meeple {
        self.meeple
    }

    /// Index of the player whose bag this meeple came from
    pub fn owner(&self) -> usize {
        self.owner
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn glow(&self) -> Option<Rgb> {
        self.glow
    }

    pub fn set_glow(&mut self, glow: Option<Rgb>) {
        self.glow = glow;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn contains_position(&self, p: Vec2) -> bool {
        self.bounds().contains(p)
    }

    /// Reference point used to find the board cell under the meeple
    pub fn coords(&self) -> Vec2 {
        self.bounds().center()
    }

    fn reset(&mut self) {
        self.position = self.home;
        self.glow = None;
    }
}

/// All render meeples of a match, in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    meeples: Vec<RenderMeeple>,
}

impl Scene {
    /// Create one render meeple per bag entry, each at its home slot.
    /// Returns the scene and one [`RenderBag`] per player.
    pub fn new(layout: &BoardLayout, bags: [&MeepleBag; 2]) -> (Scene, [RenderBag; 2]) {
        let mut meeples = Vec::new();
        let mut render_bags = [RenderBag::default(), RenderBag::default()];
        for (owner, bag) in bags.iter().enumerate() {
            for (slot, &meeple) in bag.unused().iter().enumerate() {
                let home = layout.bag_slot(owner, slot);
                let handle = MeepleHandle(meeples.len());
                render_bags[owner].unused.push(handle);
                render_bags[owner].all.push(handle);
                meeples.push(RenderMeeple {
                    meeple,
                    owner,
                    position: home,
                    home,
                    size: layout.meeple_size,
                    glow: None,
                });
            }
        }
        (Scene { meeples }, render_bags)
    }

    /// Look up a handle. Handles are only created by this scene, so the
    /// index is always valid.
    pub fn get(&self, handle: MeepleHandle) -> &RenderMeeple {
        &self.meeples[handle.0]
    }

    pub fn get_mut(&mut self, handle: MeepleHandle) -> &mut RenderMeeple {
        &mut self.meeples[handle.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeepleHandle, &RenderMeeple)> {
        self.meeples
            .iter()
            .enumerate()
            .map(|(i, m)| (MeepleHandle(i), m))
    }

    /// Handles ordered back to front (by vertical position), for drawing
    pub fn draw_order(&self) -> Vec<MeepleHandle> {
        let mut order: Vec<MeepleHandle> = (0..self.meeples.len()).map(MeepleHandle).collect();
        order.sort_by(|a, b| {
            self.meeples[a.0]
                .position
                .y
                .total_cmp(&self.meeples[b.0].position.y)
        });
        order
    }

    /// Put every meeple back at its home slot without glow
    pub fn reset(&mut self) {
        self.meeples.iter_mut().for_each(RenderMeeple::reset);
    }
}

/// A player's render meeples, split like the logical bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderBag {
    unused: Vec<MeepleHandle>,
    used: Vec<MeepleHandle>,
    all: Vec<MeepleHandle>,
}

impl RenderBag {
    pub fn unused(&self) -> &[MeepleHandle] {
        &self.unused
    }

    pub fn used(&self) -> &[MeepleHandle] {
        &self.used
    }

    /// Unused meeple whose hit box contains `p`
    pub fn meeple_at_position(&self, scene: &Scene, p: Vec2) -> Option<MeepleHandle> {
        self.unused
            .iter()
            .rev()
            .copied()
            .find(|&h| scene.get(h).contains_position(p))
    }

    pub fn from_unused(&self, scene: &Scene, meeple: Meeple) -> Option<MeepleHandle> {
        self.unused
            .iter()
            .copied()
            .find(|&h| scene.get(h).meeple() == meeple)
    }

    pub fn from_used(&self, scene: &Scene, meeple: Meeple) -> Option<MeepleHandle> {
        self.used
            .iter()
            .copied()
            .find(|&h| scene.get(h).meeple() == meeple)
    }

    /// Move a handle from unused to used. Returns false if it was not unused.
    pub fn change_to_used(&mut self, handle: MeepleHandle) -> bool {
        match self.unused.iter().position(|&h| h == handle) {
            Some(idx) => {
                self.unused.remove(idx);
                self.used.push(handle);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.unused = self.all.clone();
        self.used.clear();
    }
}
