//! Bounds checks for player cells and wall slots.

use crate::board::Position;

/// Side length of a standard Quoridor board.
pub const STANDARD_BOARD_SIDE: i32 = 9;

/// Smallest board on which every starting side has a distinct midpoint.
pub const MIN_BOARD_SIDE: i32 = 3;

/// Dimensions of the board. Cells live in `side x side`, wall slots in
/// `(side - 1) x (side - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardGeometry {
    side: i32,
}

impl BoardGeometry {
    /// Create a geometry with the given side length.
    ///
    /// Panics if `side` is smaller than [`MIN_BOARD_SIDE`].
    pub fn new(side: i32) -> Self {
        assert!(
            side >= MIN_BOARD_SIDE,
            "Board side must be at least {}, got {}",
            MIN_BOARD_SIDE,
            side
        );
        Self { side }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_BOARD_SIDE)
    }

    pub fn side(&self) -> i32 {
        self.side
    }

    pub fn wall_slots_per_side(&self) -> i32 {
        self.side - 1
    }

    /// Returns whether `pos` is a cell on the board.
    #[inline]
    pub fn is_cell_legal(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.side && pos.y >= 0 && pos.y < self.side
    }

    /// Returns whether `pos` is an anchor slot a wall can occupy.
    #[inline]
    pub fn is_wall_slot_legal(&self, pos: Position) -> bool {
        let slots = self.wall_slots_per_side();
        pos.x >= 0 && pos.x < slots && pos.y >= 0 && pos.y < slots
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let side = self.side;
        (0..side).flat_map(move |y| (0..side).map(move |x| Position::new(x, y)))
    }

    /// All wall slots, row by row.
    pub fn wall_slots(&self) -> impl Iterator<Item = Position> {
        let slots = self.wall_slots_per_side();
        (0..slots).flat_map(move |y| (0..slots).map(move |x| Position::new(x, y)))
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bounds() {
        let geometry = BoardGeometry::standard();
        assert!(geometry.is_cell_legal(Position::new(0, 0)));
        assert!(geometry.is_cell_legal(Position::new(8, 8)));
        assert!(!geometry.is_cell_legal(Position::new(9, 0)));
        assert!(!geometry.is_cell_legal(Position::new(0, -1)));
        assert_eq!(geometry.cells().count(), 81);
    }

    #[test]
    fn test_wall_slot_bounds() {
        let geometry = BoardGeometry::standard();
        assert!(geometry.is_wall_slot_legal(Position::new(0, 0)));
        assert!(geometry.is_wall_slot_legal(Position::new(7, 7)));
        assert!(!geometry.is_wall_slot_legal(Position::new(8, 0)));
        assert!(!geometry.is_wall_slot_legal(Position::new(-1, 3)));
        assert_eq!(geometry.wall_slots().count(), 64);
    }

    #[test]
    #[should_panic]
    fn test_tiny_board_rejected() {
        BoardGeometry::new(2);
    }
}
