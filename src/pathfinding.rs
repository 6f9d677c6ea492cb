//! Breadth-first reachability from a player's cell to their goal edge.
//!
//! Used to enforce that no wall may cut a player off from their goal. The
//! search is recomputed from scratch on every call; nothing is cached
//! between wall placements.

use std::collections::VecDeque;

use ndarray::Array2;

use crate::board::{Board, Position, Side, WallPiece};
use crate::walls::WallIndex;

const DIRECTIONS: [Position; 4] = [
    Position::new(1, 0),
    Position::new(-1, 0),
    Position::new(0, 1),
    Position::new(0, -1),
];

/// Calculate the shortest distance from `start` to the goal edge of `side`.
///
/// An edge between adjacent cells is traversable iff neither a placed wall
/// nor the `hypothetical` wall separates them. Other players never block.
///
/// # Returns
/// The minimum number of steps to reach any goal cell, `Some(0)` if `start`
/// is already on it, or `None` if the goal edge is unreachable
pub fn distance_to_goal(
    walls: &WallIndex,
    start: Position,
    side: Side,
    hypothetical: Option<WallPiece>,
) -> Option<usize> {
    let geometry = walls.geometry();
    if !geometry.is_cell_legal(start) {
        return None;
    }
    if side.is_goal(start, geometry) {
        return Some(0);
    }

    let cells = geometry.side() as usize;
    let mut visited = Array2::from_elem((cells, cells), false);
    let mut queue = VecDeque::new();

    visited[[start.x as usize, start.y as usize]] = true;
    queue.push_back((start, 0usize));

    while let Some((pos, steps)) = queue.pop_front() {
        for direction in DIRECTIONS {
            let next = pos + direction;

            // Board edges are impassable, never a missing wall
            if !geometry.is_cell_legal(next) {
                continue;
            }
            if visited[[next.x as usize, next.y as usize]] {
                continue;
            }
            if walls.blocks_adjacency(pos, next) {
                continue;
            }
            if let Some(candidate) = hypothetical {
                if walls.blocks_adjacency_hypothetically(pos, next, candidate) {
                    continue;
                }
            }

            if side.is_goal(next, geometry) {
                return Some(steps + 1);
            }
            visited[[next.x as usize, next.y as usize]] = true;
            queue.push_back((next, steps + 1));
        }
    }

    None
}

/// Returns whether at least one path from `start` to the goal edge of `side` remains.
pub fn path_exists(
    walls: &WallIndex,
    start: Position,
    side: Side,
    hypothetical: Option<WallPiece>,
) -> bool {
    distance_to_goal(walls, start, side, hypothetical).is_some()
}

/// Returns whether every player on `board` can still reach their goal edge.
///
/// Sides are assigned by board order. Stops at the first player without a path.
pub fn path_exists_for_all_players(
    board: &Board,
    walls: &WallIndex,
    hypothetical: Option<WallPiece>,
) -> bool {
    board.players.iter().enumerate().all(|(index, player)| {
        match Side::for_player_index(index) {
            Some(side) => path_exists(walls, player.pos, side, hypothetical),
            None => true,
        }
    })
}
