use serde::{Deserialize, Serialize};

use crate::types::Direction;

/// Integer 2D walk position. Unbounded on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub x: i64,
    pub y: i64,
}

impl Cursor {
    pub const ORIGIN: Cursor = Cursor { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Moves one step in `direction`; `Direction::None` is a no-op.
    pub fn apply(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.x += dx;
        self.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_steps() {
        let cases = [
            (Direction::N, Cursor::new(0, 1)),
            (Direction::E, Cursor::new(1, 0)),
            (Direction::S, Cursor::new(0, -1)),
            (Direction::W, Cursor::new(-1, 0)),
            (Direction::NE, Cursor::new(1, 1)),
            (Direction::NW, Cursor::new(-1, 1)),
            (Direction::SE, Cursor::new(1, -1)),
            (Direction::SW, Cursor::new(-1, -1)),
            (Direction::None, Cursor::ORIGIN),
        ];
        for (direction, expected) in cases {
            let mut cursor = Cursor::ORIGIN;
            cursor.apply(direction);
            assert_eq!(cursor, expected, "{:?}", direction);
        }
    }

    #[test]
    fn test_apply_in_place_accumulates() {
        let mut cursor = Cursor::ORIGIN;
        for _ in 0..3 {
            cursor.apply(Direction::SW);
        }
        cursor.apply(Direction::None);
        assert_eq!(cursor, Cursor::new(-3, -3));
    }
}
