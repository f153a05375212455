use super::meeple::Meeple;

/// Width and height of the square board.
pub const BOARD_SIZE: usize = 4;

/// A cell on the board. `x` is the column, `y` the row, both counted from the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardPos {
    pub x: u8,
    pub y: u8,
}

impl BoardPos {
    pub fn new(x: u8, y: u8) -> Self {
        BoardPos { x, y }
    }

    /// Check whether the position lies on the board
    pub fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }

    /// Iterate over every cell, row by row
    pub fn all() -> impl Iterator<Item = BoardPos> {
        (0..BOARD_SIZE as u8).flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| BoardPos { x, y }))
    }
}

impl std::fmt::Display for BoardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Four meeples on one line that share at least one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinCombination {
    pub meeples: [Meeple; 4],
    pub positions: [BoardPos; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("board position {0} is out of bounds")]
    OutOfBounds(BoardPos),

    #[error("board position {0} is already occupied")]
    Occupied(BoardPos),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Meeple>; BOARD_SIZE]; BOARD_SIZE],
}

/// Every row, column and both diagonals.
fn winning_lines() -> [[BoardPos; 4]; 10] {
    let mut lines = [[BoardPos::new(0, 0); 4]; 10];
    for i in 0..4u8 {
        lines[i as usize] = std::array::from_fn(|k| BoardPos::new(k as u8, i));
        lines[4 + i as usize] = std::array::from_fn(|k| BoardPos::new(i, k as u8));
    }
    lines[8] = std::array::from_fn(|k| BoardPos::new(k as u8, k as u8));
    lines[9] = std::array::from_fn(|k| BoardPos::new(3 - k as u8, k as u8));
    lines
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Get the meeple at a position. Out-of-bounds positions read as empty.
    pub fn get(&self, pos: BoardPos) -> Option<Meeple> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.y as usize][pos.x as usize]
    }

    pub fn is_field_empty(&self, pos: BoardPos) -> bool {
        pos.in_bounds() && self.get(pos).is_none()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// All empty cells, row by row
    pub fn empty_fields(&self) -> Vec<BoardPos> {
        BoardPos::all().filter(|&p| self.is_field_empty(p)).collect()
    }

    /// Number of meeples on the board
    pub fn meeple_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Place a meeple on an empty cell
    pub fn set_meeple(&mut self, pos: BoardPos, meeple: Meeple) -> Result<(), PlaceError> {
        if !pos.in_bounds() {
            return Err(PlaceError::OutOfBounds(pos));
        }
        if self.get(pos).is_some() {
            return Err(PlaceError::Occupied(pos));
        }
        self.cells[pos.y as usize][pos.x as usize] = Some(meeple);
        Ok(())
    }

    /// Look for a completed line whose four meeples share an attribute.
    /// Rows are checked first, then columns, then the two diagonals.
    pub fn check_win_situation(&self) -> Option<WinCombination> {
        winning_lines().into_iter().find_map(|positions| {
            let mut meeples = [Meeple::from_bits(0); 4];
            for (slot, &pos) in meeples.iter_mut().zip(positions.iter()) {
                *slot = self.get(pos)?;
            }
            Meeple::share_attribute(&meeples).then_some(WinCombination { meeples, positions })
        })
    }

    /// Would placing `meeple` at `pos` complete a winning line?
    pub fn is_winning_placement(&self, pos: BoardPos, meeple: Meeple) -> bool {
        let mut probe = *self;
        probe.set_meeple(pos, meeple).is_ok() && probe.check_win_situation().is_some()
    }

    pub fn reset(&mut self) {
        *self = Board::new();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MeepleColor;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for pos in BoardPos::all() {
            assert!(board.is_field_empty(pos));
        }
        assert_eq!(board.empty_fields().len(), 16);
        assert!(!board.is_full());
    }

    #[test]
    fn test_set_meeple() {
        let mut board = Board::new();
        let m = Meeple::from_bits(5);
        board.set_meeple(BoardPos::new(2, 1), m).unwrap();
        assert_eq!(board.get(BoardPos::new(2, 1)), Some(m));
        assert!(!board.is_field_empty(BoardPos::new(2, 1)));
        assert_eq!(board.meeple_count(), 1);
    }

    #[test]
    fn test_set_meeple_on_occupied_field() {
        let mut board = Board::new();
        let pos = BoardPos::new(0, 0);
        board.set_meeple(pos, Meeple::from_bits(0)).unwrap();
        assert_eq!(
            board.set_meeple(pos, Meeple::from_bits(1)),
            Err(PlaceError::Occupied(pos))
        );
        assert_eq!(board.get(pos), Some(Meeple::from_bits(0)));
    }

    #[test]
    fn test_set_meeple_out_of_bounds() {
        let mut board = Board::new();
        let pos = BoardPos::new(4, 0);
        assert_eq!(
            board.set_meeple(pos, Meeple::from_bits(0)),
            Err(PlaceError::OutOfBounds(pos))
        );
        assert!(!board.is_field_empty(pos));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for (bits, pos) in BoardPos::all().enumerate() {
            board.set_meeple(pos, Meeple::from_bits(bits as u8)).unwrap();
        }
        assert!(board.is_full());
        assert!(board.empty_fields().is_empty());
    }

    #[test]
    fn test_same_owner_row_wins() {
        let mut board = Board::new();
        let whites = Meeple::all_of_color(MeepleColor::White);
        for x in 0..4u8 {
            board.set_meeple(BoardPos::new(x, 2), whites[x as usize]).unwrap();
        }
        let combi = board.check_win_situation().expect("row should win");
        assert_eq!(combi.meeples, [whites[0], whites[1], whites[2], whites[3]]);
        assert!(combi.positions.iter().all(|p| p.y == 2));
    }

    #[test]
    fn test_column_win() {
        let mut board = Board::new();
        let blacks = Meeple::all_of_color(MeepleColor::Black);
        for y in 0..4u8 {
            board.set_meeple(BoardPos::new(1, y), blacks[y as usize + 4]).unwrap();
        }
        let combi = board.check_win_situation().expect("column should win");
        assert!(combi.positions.iter().all(|p| p.x == 1));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let mut board = Board::new();
        let whites = Meeple::all_of_color(MeepleColor::White);
        for k in 0..4u8 {
            board.set_meeple(BoardPos::new(3 - k, k), whites[k as usize]).unwrap();
        }
        let combi = board.check_win_situation().expect("diagonal should win");
        assert_eq!(combi.positions[0], BoardPos::new(3, 0));
        assert_eq!(combi.positions[3], BoardPos::new(0, 3));
    }

    #[test]
    fn test_incomplete_line_does_not_win() {
        let mut board = Board::new();
        let whites = Meeple::all_of_color(MeepleColor::White);
        for x in 0..3u8 {
            board.set_meeple(BoardPos::new(x, 0), whites[x as usize]).unwrap();
        }
        assert!(board.check_win_situation().is_none());
    }

    #[test]
    fn test_line_without_common_attribute_does_not_win() {
        let mut board = Board::new();
        for (x, bits) in [0b0000u8, 0b1111, 0b0101, 0b1010].into_iter().enumerate() {
            board.set_meeple(BoardPos::new(x as u8, 0), Meeple::from_bits(bits)).unwrap();
        }
        assert!(board.check_win_situation().is_none());
    }

    #[test]
    fn test_is_winning_placement_leaves_board_untouched() {
        let mut board = Board::new();
        let whites = Meeple::all_of_color(MeepleColor::White);
        for x in 0..3u8 {
            board.set_meeple(BoardPos::new(x, 0), whites[x as usize]).unwrap();
        }
        assert!(board.is_winning_placement(BoardPos::new(3, 0), whites[3]));
        assert!(!board.is_winning_placement(BoardPos::new(3, 1), whites[3]));
        assert!(board.is_field_empty(BoardPos::new(3, 0)));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        board.set_meeple(BoardPos::new(0, 0), Meeple::from_bits(0)).unwrap();
        board.reset();
        assert_eq!(board, Board::new());
    }
}
