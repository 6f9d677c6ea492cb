//! Read-only Quoridor engine for players.
//!
//! A [`PlayerEngine`] owns a [`QuoridorEngine`] but only exposes queries:
//! possible moves and walls, and the move/wall predicates. The board it
//! looks at can be replaced wholesale with [`PlayerEngine::update_board`].

use crate::board::{Board, Position, WallOrientation, WallPiece};
use crate::error::QuoridorError;
use crate::game_state::{QuoridorEngine, TablegameEngine};
use crate::grid::{BoardGeometry, STANDARD_BOARD_SIDE};

/// Every offset a single turn can cover: steps, straight jumps, diagonals.
const MOVE_OFFSETS: [Position; 12] = [
    Position::new(1, 0),
    Position::new(-1, 0),
    Position::new(0, 1),
    Position::new(0, -1),
    Position::new(2, 0),
    Position::new(-2, 0),
    Position::new(0, 2),
    Position::new(0, -2),
    Position::new(1, 1),
    Position::new(1, -1),
    Position::new(-1, 1),
    Position::new(-1, -1),
];

#[derive(Debug, Clone)]
pub struct PlayerEngine {
    engine: QuoridorEngine,
}

impl PlayerEngine {
    /// View a standard-size board.
    pub fn new(board: Board) -> Result<Self, QuoridorError> {
        Self::with_board_side(board, STANDARD_BOARD_SIDE)
    }

    pub fn with_board_side(board: Board, side: i32) -> Result<Self, QuoridorError> {
        let engine = QuoridorEngine::from_board_with_side(board, side, 0)?;
        Ok(Self { engine })
    }

    pub fn geometry(&self) -> &BoardGeometry {
        self.engine.geometry()
    }

    /// All cells the named player may move to this turn.
    pub fn possible_moves(&self, player_name: &str) -> Result<Vec<Position>, QuoridorError> {
        let current = self.engine.player_position(player_name)?;
        Ok(MOVE_OFFSETS
            .iter()
            .map(|&offset| current + offset)
            .filter(|&target| self.engine.check_move(current, target))
            .collect())
    }

    /// Returns whether moving the named player's piece to `pos` is possible.
    pub fn is_move_possible(&self, player_name: &str, pos: Position) -> Result<bool, QuoridorError> {
        let current = self.engine.player_position(player_name)?;
        Ok(self.engine.check_move(current, pos))
    }

    /// Returns whether placing `wall` on the board is possible.
    pub fn is_wall_possible(&self, wall: WallPiece) -> bool {
        self.engine.check_add_wall(wall)
    }

    /// All legal wall placements, slot by slot, vertical before horizontal.
    pub fn possible_walls(&self) -> Vec<WallPiece> {
        self.geometry()
            .wall_slots()
            .flat_map(|pos| {
                [WallOrientation::Vertical, WallOrientation::Horizontal]
                    .into_iter()
                    .map(move |orientation| WallPiece::new(pos, orientation))
            })
            .filter(|&wall| self.engine.check_add_wall(wall))
            .collect()
    }

    /// Replace the viewed board. On error the previous board is kept.
    ///
    /// The current player index carries over when it is still in range.
    pub fn update_board(&mut self, board: Board) -> Result<(), QuoridorError> {
        let current = self.engine.current_player();
        let first_player = if current < board.players.len() { current } else { 0 };
        let side = self.geometry().side();
        self.engine = QuoridorEngine::from_board_with_side(board, side, first_player)?;
        Ok(())
    }
}

impl From<QuoridorEngine> for PlayerEngine {
    fn from(engine: QuoridorEngine) -> Self {
        Self { engine }
    }
}

impl TablegameEngine for PlayerEngine {
    fn board(&self) -> &Board {
        self.engine.board()
    }

    fn current_player(&self) -> usize {
        self.engine.current_player()
    }

    fn find_winner(&self) -> Option<&str> {
        self.engine.find_winner()
    }
}
