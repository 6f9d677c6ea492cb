//! The Quoridor game state engine.
//!
//! Composes the validators with the board and wall index, and applies moves
//! and wall placements only after they pass validation.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::board::{Board, PlayerPiece, Position, Side, WallOrientation, WallPiece};
use crate::error::QuoridorError;
use crate::grid::{BoardGeometry, MIN_BOARD_SIDE, STANDARD_BOARD_SIDE};
use crate::pathfinding::path_exists_for_all_players;
use crate::validation;
use crate::walls::WallIndex;

/// Turn and board bookkeeping shared by table game engines.
pub trait TablegameEngine {
    fn board(&self) -> &Board;

    /// Player pieces in turn order.
    fn players(&self) -> &[PlayerPiece] {
        &self.board().players
    }

    /// Index of the player who takes the next turn.
    fn current_player(&self) -> usize;

    /// Name of a player satisfying the winning criterion, if any.
    fn find_winner(&self) -> Option<&str>;

    fn is_game_over(&self) -> bool {
        self.find_winner().is_some()
    }
}

fn checked_geometry(side: i32) -> Result<BoardGeometry, QuoridorError> {
    if side < MIN_BOARD_SIDE {
        return Err(QuoridorError::InvalidBoard(format!(
            "board side {} is below the minimum of {}",
            side, MIN_BOARD_SIDE
        )));
    }
    Ok(BoardGeometry::new(side))
}

/// Quoridor rules over one board.
#[derive(Debug, Clone)]
pub struct QuoridorEngine {
    board: Board,
    walls: WallIndex,
    player_indices: HashMap<String, usize>,
    current_player: usize,
}

impl QuoridorEngine {
    /// Set up a standard 9x9 game with the given players.
    ///
    /// There can be two or four players; the starting side of a player
    /// follows their index in `player_names`. With three names only the
    /// first two play, with more than four only the first four play. Both
    /// cases are logged as warnings.
    pub fn new<S: AsRef<str>>(player_names: &[S]) -> Result<Self, QuoridorError> {
        Self::with_board_side(player_names, STANDARD_BOARD_SIDE)
    }

    /// Same as [`QuoridorEngine::new`] on a board with `side` cells per side.
    pub fn with_board_side<S: AsRef<str>>(
        player_names: &[S],
        side: i32,
    ) -> Result<Self, QuoridorError> {
        let geometry = checked_geometry(side)?;
        let requested = player_names.len();
        if requested < 2 {
            return Err(QuoridorError::TooFewPlayers(requested));
        }

        let count = if requested >= 4 { 4 } else { 2 };
        if requested > count {
            let dropped: Vec<&str> = player_names[count..].iter().map(|name| name.as_ref()).collect();
            warn!(
                requested,
                playing = count,
                ?dropped,
                "Quoridor supports 2 or 4 players, ignoring extra names"
            );
        }

        let players = player_names[..count]
            .iter()
            .zip(Side::TURN_ORDER)
            .map(|(name, side)| PlayerPiece::new(name.as_ref(), side.starting_position(&geometry)))
            .collect();

        let engine = Self::build(Board::new(players, Vec::new()), geometry, 0)?;
        info!(players = count, side, "Initialized Quoridor game");
        Ok(engine)
    }

    /// Build an engine over an existing standard-size board.
    pub fn from_board(board: Board, first_player: usize) -> Result<Self, QuoridorError> {
        Self::from_board_with_side(board, STANDARD_BOARD_SIDE, first_player)
    }

    /// Build an engine over an existing board with `side` cells per side.
    ///
    /// The board must satisfy every invariant a game could have produced:
    /// 2 to 4 uniquely named players on distinct cells, walls in bounds and
    /// neither overlapping nor crossing, and a path to goal for every player.
    pub fn from_board_with_side(
        board: Board,
        side: i32,
        first_player: usize,
    ) -> Result<Self, QuoridorError> {
        Self::build(board, checked_geometry(side)?, first_player)
    }

    fn build(
        board: Board,
        geometry: BoardGeometry,
        first_player: usize,
    ) -> Result<Self, QuoridorError> {
        let num_players = board.players.len();
        if num_players < 2 {
            return Err(QuoridorError::TooFewPlayers(num_players));
        }
        if num_players > Side::TURN_ORDER.len() {
            return Err(QuoridorError::InvalidBoard(format!(
                "{} players on the board, at most {} are supported",
                num_players,
                Side::TURN_ORDER.len()
            )));
        }
        if first_player >= num_players {
            return Err(QuoridorError::InvalidBoard(format!(
                "first player index {} out of range for {} players",
                first_player, num_players
            )));
        }

        let mut player_indices = HashMap::with_capacity(num_players);
        for (index, player) in board.players.iter().enumerate() {
            if player_indices.insert(player.name.clone(), index).is_some() {
                return Err(QuoridorError::DuplicatePlayer(player.name.clone()));
            }
            if !geometry.is_cell_legal(player.pos) {
                return Err(QuoridorError::InvalidBoard(format!(
                    "player {} stands outside the board at {}",
                    player.name, player.pos
                )));
            }
            if board.players[..index].iter().any(|other| other.pos == player.pos) {
                return Err(QuoridorError::InvalidBoard(format!(
                    "more than one player stands at {}",
                    player.pos
                )));
            }
        }

        let mut walls = WallIndex::new(geometry);
        for wall in &board.walls {
            if !geometry.is_wall_slot_legal(wall.pos) || walls.conflicts_with(*wall) {
                return Err(QuoridorError::InvalidBoard(format!(
                    "{} wall at {} is out of bounds or overlaps another wall",
                    wall.orientation, wall.pos
                )));
            }
            walls.insert(*wall);
        }
        if !path_exists_for_all_players(&board, &walls, None) {
            return Err(QuoridorError::InvalidBoard(
                "a player has no path to their goal".to_owned(),
            ));
        }

        Ok(Self {
            board,
            walls,
            player_indices,
            current_player: first_player,
        })
    }

    pub fn geometry(&self) -> &BoardGeometry {
        self.walls.geometry()
    }

    /// Index of the placed walls.
    pub fn walls(&self) -> &WallIndex {
        &self.walls
    }

    pub fn player_index(&self, player_name: &str) -> Option<usize> {
        self.player_indices.get(player_name).copied()
    }

    /// Current position of the named player.
    pub fn player_position(&self, player_name: &str) -> Result<Position, QuoridorError> {
        self.player_index(player_name)
            .map(|index| self.board.players[index].pos)
            .ok_or_else(|| QuoridorError::PlayerNotFound(player_name.to_owned()))
    }

    /// Starting side of the player at `index`; their goal is the opposite edge.
    pub fn goal_side(&self, index: usize) -> Option<Side> {
        if index < self.board.players.len() {
            Side::for_player_index(index)
        } else {
            None
        }
    }

    /// Returns whether `pos` is NOT occupied by any player piece.
    pub fn is_pos_free(&self, pos: Position) -> bool {
        self.board.is_pos_free(pos)
    }

    /// Returns whether a piece at `current` may move to `target`.
    pub fn check_move(&self, current: Position, target: Position) -> bool {
        validation::check_move(&self.board, &self.walls, current, target)
    }

    /// Returns whether placing `wall` is legal.
    pub fn check_add_wall(&self, wall: WallPiece) -> bool {
        validation::check_add_wall(&self.board, &self.walls, wall)
    }

    /// Returns whether every player keeps a path to goal with `wall` added.
    ///
    /// Does not check whether the wall itself can be placed.
    pub fn check_wall_keeps_paths(&self, wall: WallPiece) -> bool {
        validation::check_wall_keeps_paths(&self.board, &self.walls, wall)
    }

    /// Move the named player's piece to `new_pos`.
    #[instrument(level = "debug", skip(self))]
    pub fn move_player(&mut self, player_name: &str, new_pos: Position) -> Result<(), QuoridorError> {
        let index = self
            .player_index(player_name)
            .ok_or_else(|| QuoridorError::PlayerNotFound(player_name.to_owned()))?;
        let current = self.board.players[index].pos;

        if !self.check_move(current, new_pos) {
            debug!(from = %current, "Rejected move");
            return Err(QuoridorError::IllegalMove(format!(
                "Moving {} to position {} is illegal.",
                player_name, new_pos
            )));
        }

        self.board.players[index].pos = new_pos;
        debug!(from = %current, "Moved player");
        Ok(())
    }

    /// Place a new wall on the board.
    #[instrument(level = "debug", skip(self))]
    pub fn add_wall(&mut self, wall: WallPiece) -> Result<(), QuoridorError> {
        if !self.check_add_wall(wall) {
            debug!("Rejected wall");
            return Err(QuoridorError::IllegalMove(format!(
                "Adding {} wall to position {} is illegal.",
                wall.orientation, wall.pos
            )));
        }

        self.board.walls.push(wall);
        self.walls.insert(wall);
        debug!(walls_on_board = self.walls.len(), "Placed wall");
        Ok(())
    }

    /// Pass the turn to the next player in board order.
    pub fn next_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.board.players.len();
    }
}

impl TablegameEngine for QuoridorEngine {
    fn board(&self) -> &Board {
        &self.board
    }

    fn current_player(&self) -> usize {
        self.current_player
    }

    /// The first player, in board order, standing on their goal edge.
    fn find_winner(&self) -> Option<&str> {
        let geometry = self.geometry();
        self.board
            .players
            .iter()
            .enumerate()
            .find(|(index, player)| {
                Side::for_player_index(*index).is_some_and(|side| side.is_goal(player.pos, geometry))
            })
            .map(|(_, player)| player.name.as_str())
    }
}

/// Text art of the board: players as `1`-`4` in board order, `|` and `-`
/// for blocked crossings, `+` for wall midpoints.
impl fmt::Display for QuoridorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.geometry().side();
        for y in 0..side {
            let mut cells = String::new();
            for x in 0..side {
                let pos = Position::new(x, y);
                let marker = match self.board.players.iter().position(|p| p.pos == pos) {
                    Some(index) => char::from_digit(index as u32 + 1, 10).unwrap_or('?'),
                    None => '.',
                };
                cells.push(marker);
                if x < side - 1 {
                    let blocked = self.walls.blocks_adjacency(pos, Position::new(x + 1, y));
                    cells.push(if blocked { '|' } else { ' ' });
                }
            }
            writeln!(f, "{}", cells.trim_end())?;

            if y < side - 1 {
                let mut between = String::new();
                for x in 0..side {
                    let pos = Position::new(x, y);
                    let blocked = self.walls.blocks_adjacency(pos, Position::new(x, y + 1));
                    between.push(if blocked { '-' } else { ' ' });
                    if x < side - 1 {
                        let midpoint = self.walls.contains(WallPiece::new(pos, WallOrientation::Vertical))
                            || self.walls.contains(WallPiece::new(pos, WallOrientation::Horizontal));
                        between.push(if midpoint { '+' } else { ' ' });
                    }
                }
                let between = between.trim_end();
                if !between.is_empty() {
                    writeln!(f, "{}", between)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_game() -> QuoridorEngine {
        QuoridorEngine::new(&["alice", "bob"]).unwrap()
    }

    #[test]
    fn test_create_initial_state() {
        let engine = two_player_game();

        assert_eq!(engine.players().len(), 2);
        assert_eq!(engine.player_position("alice").unwrap(), Position::new(0, 4));
        assert_eq!(engine.player_position("bob").unwrap(), Position::new(8, 4));
        assert_eq!(engine.current_player(), 0);
        assert!(engine.board().walls.is_empty());
        assert!(engine.walls().is_empty());
    }

    #[test]
    fn test_four_player_starting_cells() {
        let engine = QuoridorEngine::new(&["a", "b", "c", "d"]).unwrap();
        let positions: Vec<Position> = engine.players().iter().map(|p| p.pos).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 4),
                Position::new(8, 4),
                Position::new(4, 0),
                Position::new(4, 8),
            ]
        );
        assert_eq!(engine.goal_side(3), Some(Side::North));
        assert_eq!(engine.goal_side(4), None);
    }

    #[test]
    fn test_too_few_players() {
        let names: [&str; 1] = ["alone"];
        assert_eq!(
            QuoridorEngine::new(&names).unwrap_err(),
            QuoridorError::TooFewPlayers(1)
        );
        let none: [&str; 0] = [];
        assert_eq!(
            QuoridorEngine::new(&none).unwrap_err(),
            QuoridorError::TooFewPlayers(0)
        );
    }

    #[test]
    fn test_player_count_truncation() {
        let engine = QuoridorEngine::new(&["a", "b", "c"]).unwrap();
        assert_eq!(engine.players().len(), 2);
        assert!(engine.player_index("c").is_none());

        let engine = QuoridorEngine::new(&["a", "b", "c", "d", "e"]).unwrap();
        assert_eq!(engine.players().len(), 4);
        assert_eq!(
            engine.player_position("e").unwrap_err(),
            QuoridorError::PlayerNotFound("e".to_owned())
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        assert_eq!(
            QuoridorEngine::new(&["a", "a"]).unwrap_err(),
            QuoridorError::DuplicatePlayer("a".to_owned())
        );
        // Duplicates among the dropped names do not matter
        assert!(QuoridorEngine::new(&["a", "b", "b"]).is_ok());
    }

    #[test]
    fn test_move_player() {
        let mut engine = two_player_game();
        engine.move_player("alice", Position::new(1, 4)).unwrap();
        assert_eq!(engine.player_position("alice").unwrap(), Position::new(1, 4));
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut engine = two_player_game();
        let before = engine.board().clone();

        let err = engine.move_player("alice", Position::new(2, 4)).unwrap_err();
        assert_eq!(
            err,
            QuoridorError::IllegalMove("Moving alice to position (2, 4) is illegal.".to_owned())
        );
        assert_eq!(engine.board(), &before);

        let err = engine.move_player("carol", Position::new(1, 4)).unwrap_err();
        assert_eq!(err, QuoridorError::PlayerNotFound("carol".to_owned()));
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn test_add_wall_round_trip() {
        let mut engine = two_player_game();
        let wall = WallPiece::vertical(3, 3);

        engine.add_wall(wall).unwrap();
        assert!(engine.walls().contains(wall));
        assert_eq!(engine.board().walls, vec![wall]);
        assert_eq!(engine.walls().len(), 1);

        // Crossing wall at the same slot
        let err = engine.add_wall(wall.crossing()).unwrap_err();
        assert_eq!(
            err,
            QuoridorError::IllegalMove(
                "Adding horizontal wall to position (3, 3) is illegal.".to_owned()
            )
        );
        assert_eq!(engine.board().walls.len(), 1);
        assert_eq!(engine.walls().len(), 1);
    }

    #[test]
    fn test_enclosing_wall_is_rejected() {
        let mut engine = two_player_game();

        // Fence between columns 3 and 4 on rows 1..=8, then close row 0
        // under columns 0..=3. Only the last wall would seal alice in.
        let sequence = [
            WallPiece::vertical(3, 1),
            WallPiece::vertical(3, 3),
            WallPiece::vertical(3, 5),
            WallPiece::vertical(3, 7),
            WallPiece::horizontal(0, 0),
        ];
        for wall in sequence {
            assert!(engine.check_add_wall(wall), "{:?} should be allowed", wall);
            engine.add_wall(wall).unwrap();
        }

        let sealing = WallPiece::horizontal(2, 0);
        assert!(!engine.check_wall_keeps_paths(sealing));
        assert!(!engine.check_add_wall(sealing));
        assert!(engine.add_wall(sealing).is_err());
        assert_eq!(engine.walls().len(), sequence.len());
    }

    #[test]
    fn test_no_winner_at_start() {
        assert_eq!(two_player_game().find_winner(), None);
        assert!(!two_player_game().is_game_over());

        let engine = QuoridorEngine::new(&["a", "b", "c", "d"]).unwrap();
        assert_eq!(engine.find_winner(), None);
    }

    #[test]
    fn test_win_condition() {
        let board = Board::new(
            vec![
                PlayerPiece::new("alice", Position::new(7, 4)),
                PlayerPiece::new("bob", Position::new(1, 0)),
            ],
            Vec::new(),
        );
        let mut engine = QuoridorEngine::from_board(board, 0).unwrap();
        assert_eq!(engine.find_winner(), None);

        engine.move_player("alice", Position::new(8, 4)).unwrap();
        assert_eq!(engine.find_winner(), Some("alice"));
        assert!(engine.is_game_over());
    }

    #[test]
    fn test_first_winner_in_board_order() {
        let board = Board::new(
            vec![
                PlayerPiece::new("alice", Position::new(8, 1)),
                PlayerPiece::new("bob", Position::new(0, 1)),
            ],
            Vec::new(),
        );
        let engine = QuoridorEngine::from_board(board, 0).unwrap();
        assert_eq!(engine.find_winner(), Some("alice"));
    }

    #[test]
    fn test_next_turn_cycles() {
        let mut engine = QuoridorEngine::new(&["a", "b", "c", "d"]).unwrap();
        let order: Vec<usize> = (0..6)
            .map(|_| {
                let current = engine.current_player();
                engine.next_turn();
                current
            })
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_from_board_rebuilds_wall_index() {
        let board = Board::new(
            vec![
                PlayerPiece::new("alice", Position::new(0, 4)),
                PlayerPiece::new("bob", Position::new(8, 4)),
            ],
            vec![WallPiece::horizontal(2, 2), WallPiece::vertical(5, 5)],
        );
        let engine = QuoridorEngine::from_board(board, 1).unwrap();
        assert_eq!(engine.current_player(), 1);
        assert!(engine.walls().contains(WallPiece::horizontal(2, 2)));
        assert!(engine.walls().contains(WallPiece::vertical(5, 5)));
        assert!(!engine.check_add_wall(WallPiece::horizontal(3, 2)));
    }

    #[test]
    fn test_from_board_rejects_inconsistent_boards() {
        let players = || {
            vec![
                PlayerPiece::new("alice", Position::new(0, 4)),
                PlayerPiece::new("bob", Position::new(8, 4)),
            ]
        };

        let crossing = Board::new(
            players(),
            vec![WallPiece::horizontal(2, 2), WallPiece::vertical(2, 2)],
        );
        assert!(matches!(
            QuoridorEngine::from_board(crossing, 0),
            Err(QuoridorError::InvalidBoard(_))
        ));

        let out_of_bounds = Board::new(players(), vec![WallPiece::vertical(8, 0)]);
        assert!(matches!(
            QuoridorEngine::from_board(out_of_bounds, 0),
            Err(QuoridorError::InvalidBoard(_))
        ));

        let shared_cell = Board::new(
            vec![
                PlayerPiece::new("alice", Position::new(4, 4)),
                PlayerPiece::new("bob", Position::new(4, 4)),
            ],
            Vec::new(),
        );
        assert!(matches!(
            QuoridorEngine::from_board(shared_cell, 0),
            Err(QuoridorError::InvalidBoard(_))
        ));

        assert!(matches!(
            QuoridorEngine::from_board(Board::new(players(), Vec::new()), 2),
            Err(QuoridorError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_smaller_board() {
        let engine = QuoridorEngine::with_board_side(&["a", "b"], 5).unwrap();
        assert_eq!(engine.geometry().side(), 5);
        assert_eq!(engine.player_position("b").unwrap(), Position::new(4, 2));

        assert!(matches!(
            QuoridorEngine::with_board_side(&["a", "b"], 2),
            Err(QuoridorError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_display() {
        let mut engine = QuoridorEngine::with_board_side(&["a", "b"], 3).unwrap();
        engine.add_wall(WallPiece::horizontal(0, 0)).unwrap();
        engine.add_wall(WallPiece::vertical(1, 0)).unwrap();

        let expected = "\
. .|.
-+-+
1 .|2
. . .
";
        assert_eq!(engine.to_string(), expected);
    }
}
