use super::meeple::{Meeple, MeepleColor};

/// The meeples a player still holds, plus the ones already placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeepleBag {
    color: MeepleColor,
    unused: Vec<Meeple>,
    used: Vec<Meeple>,
}

impl MeepleBag {
    /// Create a full bag of the given color
    pub fn new(color: MeepleColor) -> Self {
        MeepleBag {
            color,
            unused: Meeple::all_of_color(color).to_vec(),
            used: Vec::new(),
        }
    }

    pub fn color(&self) -> MeepleColor {
        self.color
    }

    /// Meeples not yet placed on the board
    pub fn unused(&self) -> &[Meeple] {
        &self.unused
    }

    /// Meeples already placed on the board
    pub fn used(&self) -> &[Meeple] {
        &self.used
    }

    pub fn contains_unused(&self, meeple: Meeple) -> bool {
        self.unused.contains(&meeple)
    }

    pub fn is_empty(&self) -> bool {
        self.unused.is_empty()
    }

    /// Take a meeple out of the bag, marking it used. Returns `None` if the
    /// meeple is not among the unused ones.
    pub fn remove_meeple(&mut self, meeple: Meeple) -> Option<Meeple> {
        let idx = self.unused.iter().position(|&m| m == meeple)?;
        let removed = self.unused.remove(idx);
        self.used.push(removed);
        Some(removed)
    }

    /// Put every meeple back into the bag
    pub fn reset(&mut self) {
        *self = MeepleBag::new(self.color);
    }
}
