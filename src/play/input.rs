use crate::scene::Vec2;

/// Pointer input sampled once at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Primary button went down during the frame
    pub primary_pressed: bool,
    /// Primary button went up during the frame
    pub primary_released: bool,
    pub secondary_held: bool,
    /// Pointer in logical coordinates
    pub pointer: Vec2,
}

impl InputSnapshot {
    /// No buttons, pointer at `pointer`
    pub fn hover(pointer: Vec2) -> Self {
        InputSnapshot {
            pointer,
            ..Default::default()
        }
    }

    pub fn press(pointer: Vec2) -> Self {
        InputSnapshot {
            primary_pressed: true,
            pointer,
            ..Default::default()
        }
    }

    pub fn release(pointer: Vec2) -> Self {
        InputSnapshot {
            primary_released: true,
            pointer,
            ..Default::default()
        }
    }
}
