use thiserror::Error;

/// Reasons the engine rejects an operation.
///
/// Every rejection happens before any state is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoridorError {
    /// A move or wall placement broke the rules.
    #[error("{0}")]
    IllegalMove(String),

    #[error("Player {0} was not found.")]
    PlayerNotFound(String),

    #[error("Tried to init game with too few players: {0}.")]
    TooFewPlayers(usize),

    #[error("Player name {0} is used more than once.")]
    DuplicatePlayer(String),

    /// A board handed to the engine breaks a board invariant.
    #[error("Invalid board: {0}")]
    InvalidBoard(String),
}
