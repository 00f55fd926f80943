use tracing::{debug, instrument, warn};

use crate::board::Board;
use crate::rules;
use crate::types::{Player, Position};

/// First `(start, end)` for `player`: the first piece in row-major order that
/// has any destination, paired with its first destination in row-major order.
pub fn find_move(board: &Board, player: Player) -> Option<(Position, Position)> {
    board.pieces(player).find_map(|start| {
        rules::reachable(board, start)
            .first()
            .map(|&end| (start, end))
    })
}

/// Plays the opponent's move and returns the resulting board.
///
/// Caller contract: the opponent must have a legal move. Otherwise the
/// board is returned unchanged.
#[instrument(level = "debug", skip(board))]
pub fn select_move(board: &Board) -> Board {
    let Some((start, end)) = find_move(board, Player::Opponent) else {
        warn!("select_move called without a legal opponent move");
        return board.clone();
    };

    debug!(%start, %end, "opponent move selected");
    let (next, _succeeded) = rules::apply_move(board, start, end);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn codes(rows: [[u8; 8]; 8]) -> Board {
        Board::from_codes(rows).expect("valid layout")
    }

    #[test]
    fn initial_board_moves_first_opponent_piece_with_a_move() {
        let board = Board::new();

        // Rows 0 and 1 are blocked by their own pieces; (2,1) is the first mover.
        assert_eq!(find_move(&board, Player::Opponent), Some((pos(2, 1), pos(3, 0))));

        let next = select_move(&board);
        assert_eq!(next.player_at(pos(2, 1)), None);
        assert_eq!(next.player_at(pos(3, 0)), Some(Player::Opponent));
        assert_eq!(next.count(), (12, 12));
    }

    #[test]
    fn forced_capture_is_never_declined() {
        let board = codes([
            [0, 2, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 2, 0, 0],
            [0, 0, 0, 0, 1, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [1, 0, 0, 0, 0, 0, 0, 0],
        ]);
        assert!(rules::can_capture(&board, Player::Opponent));

        let next = select_move(&board);

        assert_eq!(next.count(), (1, 2));
        assert_eq!(next.player_at(pos(0, 1)), Some(Player::Opponent));
        assert_eq!(next.player_at(pos(2, 5)), None);
        assert_eq!(next.player_at(pos(4, 3)), Some(Player::Opponent));
    }

    #[test]
    fn picks_first_destination_in_row_major_order_of_a_chain() {
        let board = codes([
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 2, 0, 0, 0],
            [0, 0, 0, 1, 0, 1, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 1, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
        ]);

        // Landings from (1,4) are (3,2), (3,6) and (5,4); the longer chain is not preferred.
        assert_eq!(
            rules::reachable(&board, pos(1, 4)).into_iter().collect::<Vec<_>>(),
            vec![pos(3, 2), pos(3, 6), pos(5, 4)]
        );
        assert_eq!(find_move(&board, Player::Opponent), Some((pos(1, 4), pos(3, 2))));

        let next = select_move(&board);
        assert_eq!(next.player_at(pos(3, 2)), Some(Player::Opponent));
        assert_eq!(next.player_at(pos(2, 3)), None);
        assert_eq!(next.player_at(pos(2, 5)), Some(Player::User));
    }

    #[test]
    fn without_a_move_the_board_is_returned_unchanged() {
        let board = codes([
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 2],
            [0, 0, 0, 0, 0, 0, 1, 0],
        ]);

        assert_eq!(find_move(&board, Player::Opponent), None);
        assert_eq!(select_move(&board), board);
    }
}
