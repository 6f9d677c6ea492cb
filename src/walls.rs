//! Index of placed walls.
//!
//! Walls are stored as one boolean plane per orientation, indexed by slot
//! `[[x, y]]`. The index only grows: Quoridor walls are never removed.

use ndarray::Array2;

use crate::board::{Position, WallOrientation, WallPiece};
use crate::grid::BoardGeometry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallIndex {
    geometry: BoardGeometry,
    vertical: Array2<bool>,
    horizontal: Array2<bool>,
    count: usize,
}

impl WallIndex {
    pub fn new(geometry: BoardGeometry) -> Self {
        let slots = geometry.wall_slots_per_side() as usize;
        Self {
            geometry,
            vertical: Array2::from_elem((slots, slots), false),
            horizontal: Array2::from_elem((slots, slots), false),
            count: 0,
        }
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    fn plane(&self, orientation: WallOrientation) -> &Array2<bool> {
        match orientation {
            WallOrientation::Vertical => &self.vertical,
            WallOrientation::Horizontal => &self.horizontal,
        }
    }

    /// Returns whether exactly this wall has been placed.
    pub fn contains(&self, wall: WallPiece) -> bool {
        if !self.geometry.is_wall_slot_legal(wall.pos) {
            return false;
        }
        self.plane(wall.orientation)[[wall.pos.x as usize, wall.pos.y as usize]]
    }

    /// Add a wall. Returns `false` if it was already present.
    ///
    /// Panics if the slot is out of bounds; validate with
    /// [`crate::validation::check_add_wall`] first.
    pub fn insert(&mut self, wall: WallPiece) -> bool {
        assert!(
            self.geometry.is_wall_slot_legal(wall.pos),
            "Wall slot {} out of bounds",
            wall.pos
        );
        let plane = match wall.orientation {
            WallOrientation::Vertical => &mut self.vertical,
            WallOrientation::Horizontal => &mut self.horizontal,
        };
        let slot = &mut plane[[wall.pos.x as usize, wall.pos.y as usize]];
        if *slot {
            return false;
        }
        *slot = true;
        self.count += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// All placed walls, vertical first, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = WallPiece> + '_ {
        self.geometry.wall_slots().flat_map(move |pos| {
            [WallOrientation::Vertical, WallOrientation::Horizontal]
                .into_iter()
                .map(move |orientation| WallPiece::new(pos, orientation))
                .filter(move |wall| self.contains(*wall))
        })
    }

    /// Returns whether placing `candidate` would overlap or cross a placed wall.
    ///
    /// Covers the identical wall, the crossing wall at the same slot, and the
    /// same-orientation walls one slot away along the wall's axis (those
    /// share a half with the candidate).
    pub fn conflicts_with(&self, candidate: WallPiece) -> bool {
        self.contains(candidate)
            || self.contains(candidate.crossing())
            || self.contains(candidate.shifted(1))
            || self.contains(candidate.shifted(-1))
    }

    /// Returns whether a placed wall or the board edge separates two
    /// orthogonally adjacent cells.
    pub fn blocks_adjacency(&self, a: Position, b: Position) -> bool {
        assert!(a.is_adjacent(b), "Cells {} and {} are not adjacent", a, b);
        if !self.geometry.is_cell_legal(a) || !self.geometry.is_cell_legal(b) {
            return true;
        }
        blocking_walls(a, b)
            .into_iter()
            .any(|wall| self.contains(wall))
    }

    /// Returns whether `candidate`, if it were placed, would separate two
    /// orthogonally adjacent cells. Ignores the walls already in the index.
    pub fn blocks_adjacency_hypothetically(
        &self,
        a: Position,
        b: Position,
        candidate: WallPiece,
    ) -> bool {
        assert!(a.is_adjacent(b), "Cells {} and {} are not adjacent", a, b);
        if !self.geometry.is_cell_legal(a)
            || !self.geometry.is_cell_legal(b)
            || !self.geometry.is_wall_slot_legal(candidate.pos)
        {
            return false;
        }
        blocking_walls(a, b).contains(&candidate)
    }
}

/// The two wall placements that would separate adjacent cells `a` and `b`.
///
/// Crossing along x needs a vertical wall, crossing along y a horizontal one.
/// A wall spans two cells, so the anchor at the lower corner of the pair and
/// the anchor one slot back along the wall's axis both cover the crossing.
pub fn blocking_walls(a: Position, b: Position) -> [WallPiece; 2] {
    debug_assert!(a.is_adjacent(b));
    let x_min = a.x.min(b.x);
    let y_min = a.y.min(b.y);
    if a.y == b.y {
        [
            WallPiece::vertical(x_min, y_min),
            WallPiece::vertical(x_min, y_min - 1),
        ]
    } else {
        [
            WallPiece::horizontal(x_min, y_min),
            WallPiece::horizontal(x_min - 1, y_min),
        ]
    }
}
