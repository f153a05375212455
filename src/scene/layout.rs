use crate::game::{BoardPos, BOARD_SIZE, MEEPLES_PER_BAG};

use super::geometry::{Rect, Vec2};

/// Rows of meeple slots in each bag; slots fill two columns.
const BAG_ROWS: usize = MEEPLES_PER_BAG / 2;

/// Where everything sits in logical coordinates. One logical unit is one
/// terminal cell in the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub board_origin: Vec2,
    pub field_size: Vec2,
    pub meeple_size: Vec2,
    /// Top-left slot of each player's bag
    pub bag_origins: [Vec2; 2],
    pub slot_spacing: Vec2,
    pub button_size: Vec2,
    pub button_row: f32,
    pub canvas: Vec2,
}

impl Default for BoardLayout {
    fn default() -> Self {
        BoardLayout {
            board_origin: Vec2::new(24.0, 3.0),
            field_size: Vec2::new(7.0, 3.0),
            meeple_size: Vec2::new(5.0, 2.0),
            bag_origins: [Vec2::new(2.0, 3.0), Vec2::new(56.0, 3.0)],
            slot_spacing: Vec2::new(7.0, 3.0),
            button_size: Vec2::new(10.0, 3.0),
            button_row: 17.0,
            canvas: Vec2::new(70.0, 22.0),
        }
    }
}

impl BoardLayout {
    pub fn board_rect(&self) -> Rect {
        Rect::new(
            self.board_origin,
            Vec2::new(
                self.field_size.x * BOARD_SIZE as f32,
                self.field_size.y * BOARD_SIZE as f32,
            ),
        )
    }

    pub fn field_rect(&self, pos: BoardPos) -> Rect {
        Rect::new(
            Vec2::new(
                self.board_origin.x + pos.x as f32 * self.field_size.x,
                self.board_origin.y + pos.y as f32 * self.field_size.y,
            ),
            self.field_size,
        )
    }

    /// Top-left position of a meeple sitting centred on `pos`
    pub fn field_coords(&self, pos: BoardPos) -> Vec2 {
        let field = self.field_rect(pos);
        field.origin + Vec2::new(
            (self.field_size.x - self.meeple_size.x) / 2.0,
            (self.field_size.y - self.meeple_size.y) / 2.0,
        )
    }

    /// Map a point to the board cell under it, `None` off the board.
    pub fn board_pos_for_position(&self, p: Vec2) -> Option<BoardPos> {
        if !self.board_rect().contains(p) {
            return None;
        }
        let local = p - self.board_origin;
        let x = (local.x / self.field_size.x).floor() as u8;
        let y = (local.y / self.field_size.y).floor() as u8;
        let pos = BoardPos::new(x, y);
        pos.in_bounds().then_some(pos)
    }

    /// Home slot of the `slot`-th meeple in a player's bag
    pub fn bag_slot(&self, player: usize, slot: usize) -> Vec2 {
        let column = slot / BAG_ROWS;
        let row = slot % BAG_ROWS;
        self.bag_origins[player]
            + Vec2::new(
                column as f32 * self.slot_spacing.x,
                row as f32 * self.slot_spacing.y,
            )
    }

    /// Restart, back-to-menu and exit buttons, left to right
    pub fn end_screen_buttons(&self) -> [Rect; 3] {
        let center = self.board_rect().center().x;
        let gap = self.button_size.x + 4.0;
        std::array::from_fn(|i| {
            let cx = center + (i as f32 - 1.0) * gap;
            Rect::new(
                Vec2::new(cx - self.button_size.x / 2.0, self.button_row),
                self.button_size,
            )
        })
    }
}
