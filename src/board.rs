//! Board data types: cell positions, wall and player pieces, starting sides.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::grid::BoardGeometry;

/// A two-dimensional integer position on the grid.
///
/// Used both for player cells and for wall slots. Coordinates are signed so
/// that off-grid neighbours (`-1` or the side length) can be represented and
/// rejected by the bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallOrientation {
    Vertical,
    Horizontal,
}

impl WallOrientation {
    pub fn perpendicular(self) -> Self {
        match self {
            WallOrientation::Vertical => WallOrientation::Horizontal,
            WallOrientation::Horizontal => WallOrientation::Vertical,
        }
    }
}

impl fmt::Display for WallOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WallOrientation::Vertical => f.write_str("vertical"),
            WallOrientation::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// A wall segment, anchored at a wall slot.
///
/// A vertical wall at slot `(x, y)` separates column `x` from column `x + 1`
/// on rows `y` and `y + 1`. A horizontal wall at slot `(x, y)` separates row
/// `y` from row `y + 1` on columns `x` and `x + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallPiece {
    pub pos: Position,
    pub orientation: WallOrientation,
}

impl WallPiece {
    pub const fn new(pos: Position, orientation: WallOrientation) -> Self {
        Self { pos, orientation }
    }

    pub const fn vertical(x: i32, y: i32) -> Self {
        Self::new(Position::new(x, y), WallOrientation::Vertical)
    }

    pub const fn horizontal(x: i32, y: i32) -> Self {
        Self::new(Position::new(x, y), WallOrientation::Horizontal)
    }

    /// The wall crossing this one at the same slot.
    pub fn crossing(self) -> Self {
        Self::new(self.pos, self.orientation.perpendicular())
    }

    /// Unit step along the wall's own axis.
    pub fn axis_step(self) -> Position {
        match self.orientation {
            WallOrientation::Vertical => Position::new(0, 1),
            WallOrientation::Horizontal => Position::new(1, 0),
        }
    }

    /// The same-orientation wall shifted by `steps` slots along the wall's axis.
    pub fn shifted(self, steps: i32) -> Self {
        let step = self.axis_step();
        Self::new(
            self.pos + Position::new(step.x * steps, step.y * steps),
            self.orientation,
        )
    }
}

/// A single piece controlled by a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPiece {
    pub name: String,
    pub pos: Position,
}

impl PlayerPiece {
    pub fn new(name: impl Into<String>, pos: Position) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// The board edge a player starts on. The goal is the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    West,
    East,
    South,
    North,
}

impl Side {
    /// Side assigned to each player index, in turn order.
    pub const TURN_ORDER: [Side; 4] = [Side::West, Side::East, Side::South, Side::North];

    pub fn for_player_index(index: usize) -> Option<Side> {
        Self::TURN_ORDER.get(index).copied()
    }

    /// Midpoint of this side's edge.
    pub fn starting_position(self, geometry: &BoardGeometry) -> Position {
        let last = geometry.side() - 1;
        let mid = geometry.side() / 2;
        match self {
            Side::West => Position::new(0, mid),
            Side::East => Position::new(last, mid),
            Side::South => Position::new(mid, 0),
            Side::North => Position::new(mid, last),
        }
    }

    /// Whether `pos` lies on the edge opposite this side.
    pub fn is_goal(self, pos: Position, geometry: &BoardGeometry) -> bool {
        if !geometry.is_cell_legal(pos) {
            return false;
        }
        let last = geometry.side() - 1;
        match self {
            Side::West => pos.x == last,
            Side::East => pos.x == 0,
            Side::South => pos.y == last,
            Side::North => pos.y == 0,
        }
    }

    /// All cells of the goal edge.
    pub fn goal_cells(self, geometry: &BoardGeometry) -> Vec<Position> {
        let last = geometry.side() - 1;
        (0..geometry.side())
            .map(|j| match self {
                Side::West => Position::new(last, j),
                Side::East => Position::new(0, j),
                Side::South => Position::new(j, last),
                Side::North => Position::new(j, 0),
            })
            .collect()
    }
}

/// Players (in turn order) and the walls placed so far (in placement order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub players: Vec<PlayerPiece>,
    pub walls: Vec<WallPiece>,
}

impl Board {
    pub fn new(players: Vec<PlayerPiece>, walls: Vec<WallPiece>) -> Self {
        Self { players, walls }
    }

    pub fn player_at(&self, pos: Position) -> Option<&PlayerPiece> {
        self.players.iter().find(|player| player.pos == pos)
    }

    /// Returns whether `pos` is NOT occupied by any player piece.
    pub fn is_pos_free(&self, pos: Position) -> bool {
        self.player_at(pos).is_none()
    }
}
