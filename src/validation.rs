//! Move and wall legality.
//!
//! Both validators are pure predicates over a board and its wall index; the
//! engine only mutates state after one of them returns `true`.

use crate::board::{Board, Position, WallPiece};
use crate::pathfinding::path_exists_for_all_players;
use crate::walls::WallIndex;

/// Validate whether a player piece may move from `current` to `target`.
///
/// The board does not need to contain a piece at `current`.
pub fn check_move(board: &Board, walls: &WallIndex, current: Position, target: Position) -> bool {
    let geometry = walls.geometry();

    if !geometry.is_cell_legal(target) {
        return false;
    }
    if !board.is_pos_free(target) {
        return false;
    }

    let delta = target - current;
    match current.manhattan_distance(target) {
        // Single step
        1 => !walls.blocks_adjacency(current, target),
        // Straight jump over an occupant
        2 if delta.x == 0 || delta.y == 0 => {
            let over = Position::new(current.x + delta.x / 2, current.y + delta.y / 2);
            !board.is_pos_free(over)
                && !walls.blocks_adjacency(current, over)
                && !walls.blocks_adjacency(over, target)
        }
        // Diagonal, only when the straight jump over an adjacent occupant is obstructed
        2 => {
            let elbows = [
                Position::new(current.x, target.y),
                Position::new(target.x, current.y),
            ];
            elbows.into_iter().any(|over| {
                let straight = over + (over - current);
                !board.is_pos_free(over)
                    && !walls.blocks_adjacency(current, over)
                    && walls.blocks_adjacency(over, straight)
                    && !walls.blocks_adjacency(over, target)
            })
        }
        _ => false,
    }
}

/// Validate whether `wall` may be added to the board.
///
/// The slot must be in bounds, the wall must not overlap or cross a placed
/// wall, and every player must keep a path to their goal edge.
pub fn check_add_wall(board: &Board, walls: &WallIndex, wall: WallPiece) -> bool {
    if !walls.geometry().is_wall_slot_legal(wall.pos) {
        return false;
    }
    if walls.conflicts_with(wall) {
        return false;
    }
    check_wall_keeps_paths(board, walls, wall)
}

/// Returns whether every player still reaches their goal with `wall` added.
///
/// Does not check whether the wall itself can be placed.
pub fn check_wall_keeps_paths(board: &Board, walls: &WallIndex, wall: WallPiece) -> bool {
    path_exists_for_all_players(board, walls, Some(wall))
}
