use crate::error::{GameError, Result};
use crate::types::{Cell, CellId, Player, Position};

pub const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
/// Rows each side occupies at the start of a game.
const OPPONENT_HOME_ROWS: std::ops::Range<usize> = 0..3;
const USER_HOME_ROWS: std::ops::Range<usize> = 5..8;

/// 8x8 checkers board, row-major.
///
/// Cloning is a deep copy: every cell is a new value with the same id,
/// occupant and highlight flag. The engine never mutates a board it receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board: opponent pieces on the dark squares of
    /// rows 0-2, user pieces on the dark squares of rows 5-7.
    pub fn new() -> Self {
        Self::from_fn(|row, col| {
            if !is_dark(row, col) {
                None
            } else if OPPONENT_HOME_ROWS.contains(&row) {
                Some(Player::Opponent)
            } else if USER_HOME_ROWS.contains(&row) {
                Some(Player::User)
            } else {
                None
            }
        })
    }

    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Self::from_fn(|_, _| None)
    }

    /// Builds a board from a `{0, 1, 2}`-coded layout (0 = empty, 1 = user, 2 = opponent).
    pub fn from_codes(codes: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        for (row, line) in codes.iter().enumerate() {
            for (col, &code) in line.iter().enumerate() {
                if Player::from_code(code).is_none() {
                    return Err(GameError::InvalidCellCode { row, col, code });
                }
            }
        }

        Ok(Self::from_fn(|row, col| {
            Player::from_code(codes[row][col]).flatten()
        }))
    }

    fn from_fn(mut occupant: impl FnMut(usize, usize) -> Option<Player>) -> Self {
        Self {
            cells: std::array::from_fn(|row| {
                std::array::from_fn(|col| Cell::new(occupant(row, col)))
            }),
        }
    }

    /// Returns the cell at `pos`, or `None` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        let (row, col) = index(pos)?;
        Some(&self.cells[row][col])
    }

    /// Returns the occupant at `pos`. Off-board positions have no occupant.
    pub fn player_at(&self, pos: Position) -> Option<Player> {
        self.get(pos).and_then(|cell| cell.player)
    }

    /// `true` when `pos` is on the board and holds no piece.
    pub fn is_vacant(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Cell::is_empty)
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let (row, col) = index(pos)?;
        Some(&mut self.cells[row][col])
    }

    /// Swaps two cells, ids included.
    pub(crate) fn swap(&mut self, a: Position, b: Position) {
        if let (Some(a), Some(b)) = (index(a), index(b)) {
            let tmp = self.cells[a.0][a.1];
            self.cells[a.0][a.1] = self.cells[b.0][b.1];
            self.cells[b.0][b.1] = tmp;
        }
    }

    /// All positions in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as i8)
            .flat_map(|row| (0..BOARD_SIZE as i8).map(move |col| Position::new(row, col)))
    }

    /// Positions occupied by `player`, in row-major order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        Self::positions().filter(move |&pos| self.player_at(pos) == Some(player))
    }

    /// Returns `(user_count, opponent_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(user, opponent), cell| match cell.player {
                Some(Player::User) => (user + 1, opponent),
                Some(Player::Opponent) => (user, opponent + 1),
                None => (user, opponent),
            })
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=user, 2=opponent.
    pub fn to_codes(&self) -> [u8; NUM_SQUARES] {
        let mut codes = [0u8; NUM_SQUARES];
        for (code, cell) in codes.iter_mut().zip(self.cells.iter().flatten()) {
            *code = cell.player.map_or(0, Player::code);
        }
        codes
    }

    /// Cell ids in row-major order.
    pub fn cell_ids(&self) -> Vec<CellId> {
        self.cells.iter().flatten().map(|cell| cell.id).collect()
    }

    /// Highlighted positions in row-major order.
    pub fn highlighted(&self) -> Vec<Position> {
        Self::positions()
            .filter(|&pos| self.get(pos).is_some_and(|cell| cell.is_highlighted))
            .collect()
    }

    /// Returns a copy with every highlight flag cleared.
    pub fn clear_highlights(&self) -> Self {
        let mut copy = self.clone();
        copy.cells
            .iter_mut()
            .flatten()
            .for_each(|cell| cell.is_highlighted = false);
        copy
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub fn in_bounds(row: i8, col: i8) -> bool {
    (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col)
}

fn index(pos: Position) -> Option<(usize, usize)> {
    in_bounds(pos.row, pos.col).then(|| (pos.row as usize, pos.col as usize))
}

fn is_dark(row: usize, col: usize) -> bool {
    (row + col) % 2 == 1
}
