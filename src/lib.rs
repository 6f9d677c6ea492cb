//! Rules engine for the board game Quoridor.
//!
//! Players race to the opposite edge of a square board while placing walls
//! to slow each other down. The engine validates every move and wall
//! placement, and never lets a wall cut a player off from their goal.

pub mod actions;
pub mod board;
#[cfg(feature = "binary")]
pub mod config;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod pathfinding;
pub mod validation;
pub mod walls;

pub use actions::PlayerEngine;
pub use board::{Board, PlayerPiece, Position, Side, WallOrientation, WallPiece};
pub use error::QuoridorError;
pub use game_state::{QuoridorEngine, TablegameEngine};
pub use grid::{BoardGeometry, MIN_BOARD_SIDE, STANDARD_BOARD_SIDE};
pub use walls::WallIndex;
