use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    /// The human side. Starts on rows 5-7 and moves toward row 0.
    User,
    /// The automated side. Starts on rows 0-2 and moves toward row 7.
    Opponent,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::User => Player::Opponent,
            Player::Opponent => Player::User,
        }
    }

    /// Forward diagonal directions as `(row, col)` deltas.
    /// Pieces are never promoted, so these are the only directions a piece moves in.
    pub fn deltas(self) -> [(i8, i8); 2] {
        match self {
            Player::User => [(-1, -1), (-1, 1)],
            Player::Opponent => [(1, 1), (1, -1)],
        }
    }

    /// Layout code: 1 = user, 2 = opponent.
    pub fn code(self) -> u8 {
        match self {
            Player::User => 1,
            Player::Opponent => 2,
        }
    }

    /// Inverse of [`Player::code`]. `Some(None)` is an empty square, `None` an unknown code.
    pub fn from_code(code: u8) -> Option<Option<Player>> {
        match code {
            0 => Some(None),
            1 => Some(Some(Player::User)),
            2 => Some(Some(Player::Opponent)),
            _ => None,
        }
    }
}

/// A board coordinate. Signed so that off-board coordinates can be expressed
/// and rejected by the engine instead of at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn offset(self, dr: i8, dc: i8) -> Self {
        Self {
            row: self.row.saturating_add(dr),
            col: self.col.saturating_add(dc),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Stable identity of a cell, kept across board copies so a front end can
/// track a square between transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellId(Uuid);

impl CellId {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub id: CellId,
    pub player: Option<Player>,
    /// Set only on boards returned by [`compute_reachable`](crate::rules::compute_reachable).
    pub is_highlighted: bool,
}

impl Cell {
    /// Creates a cell with a fresh id.
    pub fn new(player: Option<Player>) -> Self {
        Self {
            id: CellId::fresh(),
            player,
            is_highlighted: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.player.is_none()
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 row-major codes: 0 = empty, 1 = user, 2 = opponent.
    pub board: Vec<u8>,
    pub cell_ids: Vec<String>,
    pub highlighted: Vec<Position>,
    pub current_player: u8,
    pub user_count: u8,
    pub opponent_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - After a capture: every jumped square, in path order.
    /// - After a simple move, or before any move: empty.
    pub captured: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub user_count: u8,
    pub opponent_count: u8,
}
