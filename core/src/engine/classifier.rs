//! Decides whether a position belongs in the critical-positions database.

use crate::{Config, Position, Solver};

/// Analyzes a position and returns the column of its unique non-obvious winning
/// move, if it has one.
///
/// A position is critical when exactly one legal move wins, every other move
/// draws or loses, and the winning move is neither an immediate four-in-a-row
/// nor a forced block of the opponent's immediate threat.
pub fn analyze(solver: &mut Solver, config: &Config, position: &Position) -> Option<usize> {
    let ply = position.get_moves() as u8;
    if ply < config.min_ply || ply > config.max_ply {
        return None;
    }

    // A position with an immediate win is trivial, not critical.
    if position.can_win_next() {
        return None;
    }

    let non_losing_moves = position.possible_non_losing_moves();
    if non_losing_moves == 0 {
        return None;
    }

    let mut winning_column = None;
    let mut winning_count = 0;

    for column in 0..Position::WIDTH {
        if !position.is_playable(column) {
            continue;
        }
        if position.move_bit(column) & non_losing_moves == 0 {
            continue;
        }

        let mut child = *position;
        child.play(column);
        let score = -solver.solve(&child);

        if score > 0 {
            winning_count += 1;
            winning_column = Some(column);
        }
    }

    if winning_count != 1 {
        return None;
    }

    let column = winning_column?;
    if is_obvious(position, column) {
        return None;
    }

    Some(column)
}

/// Indicates whether playing `column` is a move an immediate-tactics checker
/// would already find: a win-in-one, or a forced block of the opponent's
/// immediate threat.
fn is_obvious(position: &Position, column: usize) -> bool {
    position.is_winning_move(column) || position.blocks_opponent_win(column)
}
