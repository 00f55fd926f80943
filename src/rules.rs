use std::collections::BTreeSet;

use tracing::{debug, instrument, trace};

use crate::board::Board;
use crate::types::{Cell, Player, Position};

/// Result of a committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedMove {
    pub board: Board,
    /// Opponent squares emptied by the move, in path order. Empty for a simple move.
    pub captured: Vec<Position>,
}

/// Returns `(jumped, landing)` when `player` can capture from `from` in direction `(dr, dc)`.
fn capture_step(
    board: &Board,
    player: Player,
    from: Position,
    (dr, dc): (i8, i8),
) -> Option<(Position, Position)> {
    let jumped = from.offset(dr, dc);
    let landing = from.offset(2 * dr, 2 * dc);
    (board.player_at(jumped) == Some(player.opponent()) && board.is_vacant(landing))
        .then_some((jumped, landing))
}

/// `true` if any piece of `player` has a capture available.
pub fn can_capture(board: &Board, player: Player) -> bool {
    board.pieces(player).any(|pos| {
        player
            .deltas()
            .into_iter()
            .any(|delta| capture_step(board, player, pos, delta).is_some())
    })
}

/// Destinations reachable by the piece at `pos`, in row-major order.
///
/// When `player` can capture anywhere on the board, only capture landings
/// (including multi-jump landings) are returned, even if that leaves this
/// piece with nothing. Otherwise the empty forward neighbors are returned.
/// Empty or off-board `pos` yields an empty set.
pub fn reachable(board: &Board, pos: Position) -> BTreeSet<Position> {
    let Some(player) = board.player_at(pos) else {
        return BTreeSet::new();
    };

    if can_capture(board, player) {
        capture_landings(board, player, pos)
    } else {
        player
            .deltas()
            .into_iter()
            .map(|(dr, dc)| pos.offset(dr, dc))
            .filter(|&next| board.is_vacant(next))
            .collect()
    }
}

fn capture_landings(board: &Board, player: Player, start: Position) -> BTreeSet<Position> {
    let mut landings = BTreeSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        for delta in player.deltas() {
            if let Some((_, landing)) = capture_step(board, player, current, delta)
                && landings.insert(landing)
            {
                trace!(%current, %landing, "capture landing");
                stack.push(landing);
            }
        }
    }

    landings
}

/// Returns a copy of `board` whose highlight flags mark exactly the
/// destinations of the piece at `pos`. Highlights already present on
/// `board` are not carried over.
#[instrument(level = "debug", skip(board))]
pub fn compute_reachable(board: &Board, pos: Position) -> Board {
    let mut highlighted = board.clear_highlights();
    for dest in reachable(board, pos) {
        if let Some(cell) = highlighted.cell_mut(dest) {
            cell.is_highlighted = true;
        }
    }
    highlighted
}

/// Validates and applies a move, returning the new board and whether it succeeded.
/// On failure the returned board equals `board`.
#[instrument(level = "debug", skip(board))]
pub fn apply_move(board: &Board, start: Position, end: Position) -> (Board, bool) {
    match execute_move(board, start, end) {
        Some(executed) => (executed.board, true),
        None => (board.clone(), false),
    }
}

/// Like [`apply_move`], but reports which squares were captured.
pub fn execute_move(board: &Board, start: Position, end: Position) -> Option<ExecutedMove> {
    let Some(player) = board.player_at(start) else {
        debug!(%start, "no piece to move");
        return None;
    };
    if !board.is_vacant(end) {
        debug!(%end, "destination is off board or occupied");
        return None;
    }

    let delta = (end.row - start.row, end.col - start.col);
    let mut next = board.clone();

    if !can_capture(board, player) && player.deltas().contains(&delta) {
        next.swap(start, end);
        return Some(ExecutedMove {
            board: next,
            captured: Vec::new(),
        });
    }

    match resolve_capture(&mut next, player, start, end) {
        Some(captured) => Some(ExecutedMove {
            board: next,
            captured,
        }),
        None => {
            debug!(?player, %start, %end, "no capture path");
            None
        }
    }
}

/// Finds a capture path from `start` to `end` and commits it to `board`.
///
/// Paths are explored depth-first with a LIFO stack, so when several paths
/// reach `end` the one through the last-listed direction wins. Returns the
/// jumped squares of the committed path; `board` is untouched on `None`.
fn resolve_capture(
    board: &mut Board,
    player: Player,
    start: Position,
    end: Position,
) -> Option<Vec<Position>> {
    let path = capture_path(board, player, start, end)?;
    let moving = *board.get(start)?;

    if let Some(cell) = board.cell_mut(end) {
        *cell = moving;
    }
    for &pos in &path {
        if let Some(cell) = board.cell_mut(pos) {
            *cell = Cell::new(None);
        }
    }

    let captured = path[1..].to_vec();
    debug!(?player, %start, %end, captured = captured.len(), "capture committed");
    Some(captured)
}

/// `start` followed by every jumped square on the first path found to `end`.
fn capture_path(
    board: &Board,
    player: Player,
    start: Position,
    end: Position,
) -> Option<Vec<Position>> {
    let mut stack = vec![(start, vec![start])];

    while let Some((current, path)) = stack.pop() {
        if current == end {
            return Some(path);
        }
        for delta in player.deltas() {
            if let Some((jumped, landing)) = capture_step(board, player, current, delta) {
                let mut next = path.clone();
                next.push(jumped);
                stack.push((landing, next));
            }
        }
    }

    None
}

/// `true` if `player` has no pieces, or none of them has a destination.
#[instrument(level = "debug", skip(board))]
pub fn is_game_over(board: &Board, player: Player) -> bool {
    board
        .pieces(player)
        .all(|pos| reachable(board, pos).is_empty())
}
