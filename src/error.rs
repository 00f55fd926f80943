//! Error types for the game session.
//!
//! The rules engine itself never fails; these errors appear where a caller
//! asks the session to do something the current state does not allow.

use crate::types::{Player, Position};

/// Errors raised by [`GameInstance`](crate::game::GameInstance) and board construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The game already reached a terminal position.
    #[error("game is already over")]
    GameOver,

    /// A player tried to move out of turn.
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Player),

    /// The start square does not hold a piece of the side to move.
    #[error("no piece of the side to move at {0}")]
    NotYourPiece(Position),

    /// The engine rejected the move.
    #[error("illegal move from {start} to {end}")]
    IllegalMove { start: Position, end: Position },

    /// The automated player was asked to move without any legal move.
    #[error("{0:?} has no legal moves")]
    NoLegalMove(Player),

    /// A layout code other than 0, 1 or 2.
    #[error("invalid cell code {code} at ({row}, {col})")]
    InvalidCellCode { row: usize, col: usize, code: u8 },
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, GameError>;
