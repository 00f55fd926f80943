use tracing::{debug, info};

use crate::ai;
use crate::board::Board;
use crate::error::{GameError, Result};
use crate::rules;
use crate::types::{GameResult, GameState, Player, Position};

/// Chooses the automated player's move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, player: Player) -> Option<(Position, Position)>;
}

/// First piece with a move, first destination, both in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<(Position, Position)> {
        ai::find_move(board, player)
    }
}

/// One match between the user and the automated opponent. The user moves first.
pub struct GameInstance {
    board: Board,
    pub current_player: Player,
    pub is_game_over: bool,
    pub captured: Vec<Position>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::User,
            is_game_over: false,
            captured: Vec::new(),
            selector,
        }
    }

    pub fn new_with_default_selector() -> Self {
        Self::new(Box::new(FirstLegalMoveSelector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Destinations of the piece at `pos`. The session board keeps them highlighted
    /// until the next inspection, move, or [`GameInstance::clear_highlights`].
    /// Only the side to move can be inspected, and nothing once the game is over.
    pub fn inspect(&mut self, pos: Position) -> Vec<Position> {
        if self.is_game_over || self.board.player_at(pos) != Some(self.current_player) {
            self.clear_highlights();
            return Vec::new();
        }

        self.board = rules::compute_reachable(&self.board, pos);
        self.board.highlighted()
    }

    pub fn clear_highlights(&mut self) {
        self.board = self.board.clear_highlights();
    }

    /// Plays a user move.
    pub fn place(&mut self, start: Position, end: Position) -> Result<()> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.current_player != Player::User {
            return Err(GameError::NotYourTurn(Player::User));
        }

        self.apply_move(start, end)
    }

    /// Plays the automated opponent's move.
    pub fn do_ai_move(&mut self) -> Result<()> {
        if self.is_game_over {
            return Err(GameError::GameOver);
        }
        if self.current_player != Player::Opponent {
            return Err(GameError::NotYourTurn(Player::Opponent));
        }

        let (start, end) = self
            .selector
            .select_move(&self.board, Player::Opponent)
            .ok_or(GameError::NoLegalMove(Player::Opponent))?;

        self.apply_move(start, end)
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        !rules::is_game_over(&self.board, self.current_player)
    }

    pub fn to_game_state(&self) -> GameState {
        let (user_count, opponent_count) = self.board.count();
        GameState {
            board: self.board.to_codes().to_vec(),
            cell_ids: self
                .board
                .cell_ids()
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
            highlighted: self.board.highlighted(),
            current_player: self.current_player.code(),
            user_count,
            opponent_count,
            is_game_over: self.is_game_over,
            captured: self.captured.clone(),
        }
    }

    /// `None` while the game is running. The player left without a move loses.
    pub fn to_game_result(&self) -> Option<GameResult> {
        if !self.is_game_over {
            return None;
        }

        let (user_count, opponent_count) = self.board.count();
        Some(GameResult {
            winner: self.current_player.opponent().code(),
            user_count,
            opponent_count,
        })
    }

    fn apply_move(&mut self, start: Position, end: Position) -> Result<()> {
        if self.board.player_at(start) != Some(self.current_player) {
            return Err(GameError::NotYourPiece(start));
        }

        let executed = rules::execute_move(&self.board, start, end)
            .ok_or(GameError::IllegalMove { start, end })?;

        debug!(player = ?self.current_player, %start, %end, "move applied");
        self.board = executed.board.clear_highlights();
        self.captured = executed.captured;
        self.current_player = self.current_player.opponent();

        if rules::is_game_over(&self.board, self.current_player) {
            info!(loser = ?self.current_player, "game over");
            self.is_game_over = true;
        }

        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.captured.clear();
    }
}
