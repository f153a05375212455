/// Number of meeples in one player's bag.
pub const MEEPLES_PER_BAG: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeepleColor {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeepleSize {
    Big,
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeepleShape {
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeepleDetail {
    Hole,
    NoHole,
}

/// A game piece. The four binary attributes make every meeple of a match
/// unique, so the value doubles as the meeple's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meeple {
    pub color: MeepleColor,
    pub size: MeepleSize,
    pub shape: MeepleShape,
    pub detail: MeepleDetail,
}

impl MeepleColor {
    pub fn name(self) -> &'static str {
        match self {
            MeepleColor::White => "White",
            MeepleColor::Black => "Black",
        }
    }
}

impl Meeple {
    /// Build the meeple encoded by the low four bits of `bits`
    /// (bit 0 color, bit 1 size, bit 2 shape, bit 3 detail).
    pub fn from_bits(bits: u8) -> Self {
        Meeple {
            color: if bits & 0b0001 == 0 { MeepleColor::White } else { MeepleColor::Black },
            size: if bits & 0b0010 == 0 { MeepleSize::Big } else { MeepleSize::Small },
            shape: if bits & 0b0100 == 0 { MeepleShape::Round } else { MeepleShape::Square },
            detail: if bits & 0b1000 == 0 { MeepleDetail::Hole } else { MeepleDetail::NoHole },
        }
    }

    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.color == MeepleColor::Black {
            bits |= 0b0001;
        }
        if self.size == MeepleSize::Small {
            bits |= 0b0010;
        }
        if self.shape == MeepleShape::Square {
            bits |= 0b0100;
        }
        if self.detail == MeepleDetail::NoHole {
            bits |= 0b1000;
        }
        bits
    }

    /// All eight meeples of one color, in bag order.
    pub fn all_of_color(color: MeepleColor) -> [Meeple; MEEPLES_PER_BAG] {
        let color_bit = match color {
            MeepleColor::White => 0,
            MeepleColor::Black => 1,
        };
        std::array::from_fn(|i| Meeple::from_bits(((i as u8) << 1) | color_bit))
    }

    /// True if all given meeples agree on at least one attribute.
    pub fn share_attribute(meeples: &[Meeple]) -> bool {
        if meeples.is_empty() {
            return false;
        }
        let all_set = meeples.iter().fold(0b1111, |acc, m| acc & m.bits());
        let all_clear = meeples.iter().fold(0b1111, |acc, m| acc & !m.bits() & 0b1111);
        all_set != 0 || all_clear != 0
    }

    /// Short label used by the terminal front end, e.g. "Bo*".
    pub fn label(self) -> String {
        let size = match self.size {
            MeepleSize::Big => 'B',
            MeepleSize::Small => 's',
        };
        let shape = match self.shape {
            MeepleShape::Round => 'o',
            MeepleShape::Square => '#',
        };
        let detail = match self.detail {
            MeepleDetail::Hole => '*',
            MeepleDetail::NoHole => ' ',
        };
        format!("{size}{shape}{detail}")
    }
}

impl std::fmt::Display for Meeple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} {:?} {:?}",
            self.color.name(),
            self.size,
            self.shape,
            self.detail
        )
    }
}
