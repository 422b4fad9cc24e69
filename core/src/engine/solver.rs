//! Provides the core weak-solving logic used to classify critical positions.

use crate::error::GeneratorError;
use crate::{MoveSorter, Position, TranspositionTable};

/// A weak solver for Connect Four positions.
///
/// This struct implements a negamax search algorithm that determines only the *sign*
/// of a position's game-theoretic value (win, draw or loss), not its exact
/// distance-to-mate. It uses the same building blocks as a strong solver:
/// - Alpha-beta pruning with window tightening around the mate-distance bounds
/// - Score-based move ordering to prioritise stronger moves
/// - A transposition table to cache results of previously seen positions
/// - A null-window binary search over the score axis for faster convergence
///
/// Solving only the sign is sufficient for the critical-positions classifier, which only
/// needs to know whether each legal move wins, draws or loses.
#[derive(Debug)]
pub struct Solver {
    /// A counter for the number of nodes explored since the last reset.
    pub explored_positions: usize,

    /// The transposition table used for caching search results.
    pub transposition_table: TranspositionTable,
}

impl Solver {
    /// A pre-sorted list of columns to check, starting from the centre column.
    const COLUMNS: [usize; Position::WIDTH] = const {
        let mut columns = [0; Position::WIDTH];
        let mut i = 0;
        while i < Position::WIDTH {
            columns[i] = (Position::WIDTH as i32 / 2 + (1 - 2 * (i as i32 % 2)) * (i as i32 + 1) / 2) as usize;
            i += 1;
        }
        columns
    };

    /// The largest transposition table size, in bits, that [`Solver::with_tt_size`] will
    /// allocate. Bounds the `Config::tt_bits` surface against unreasonable requests.
    pub const MAX_TT_BITS: u32 = 30;

    /// Creates a new `Solver` instance with an empty, default-sized transposition table.
    pub fn new() -> Solver {
        Self::default()
    }

    /// Creates a new `Solver` instance with a transposition table sized to `2^tt_bits`
    /// entries, as read from [`crate::Config::tt_bits`].
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::TableTooLarge`] if `tt_bits` exceeds [`Solver::MAX_TT_BITS`].
    pub fn with_tt_size(tt_bits: u32) -> Result<Solver, GeneratorError> {
        if tt_bits > Self::MAX_TT_BITS {
            return Err(GeneratorError::TableTooLarge { requested_bits: tt_bits });
        }

        Ok(Solver {
            explored_positions: 0,
            transposition_table: TranspositionTable::with_size(1usize << tt_bits),
        })
    }

    /// Resets the solver's exploration counter.
    ///
    /// The transposition table is intentionally *not* cleared here: its entries
    /// remain valid across sibling subtrees within the same enumeration, since keys
    /// disambiguate positions regardless of which search call populated them.
    pub fn reset(&mut self) {
        self.explored_positions = 0;
    }

    /// Solves a position to find the sign of its exact score.
    ///
    /// This function uses a binary search over the possible score range, repeatedly
    /// calling the negamax search with a null window to test if the score is above a
    /// certain value. This allows faster convergence than a full-window search.
    ///
    /// Assumes that the given position is valid and not already won by either player.
    ///
    /// # Returns
    /// A positive score if the current player will win, a negative score if the
    /// current player will lose, or zero for a draw.
    pub fn solve(&mut self, position: &Position) -> i8 {
        self.explored_positions = 0;

        // Initial search window is the widest possible score range
        let mut min = -((Position::BOARD_SIZE - position.get_moves()) as i8) / 2;
        let mut max = (Position::BOARD_SIZE + 1 - position.get_moves()) as i8 / 2;

        while min < max {
            // Binary search for the true score, biasing the probe towards zero
            let mut mid = min + (max - min) / 2;
            if mid <= 0 && min / 2 < mid {
                mid = min / 2
            } else if mid >= 0 && max / 2 > mid {
                mid = max / 2
            }

            // Performs a null-window search to test if the score is greater than the midpoint
            let score = self.negamax(position, mid, mid + 1);

            // Adjusts the search window based on the result
            if score <= mid {
                max = score
            } else {
                min = score
            }
        }

        min
    }

    /// The core negamax search function with alpha-beta pruning.
    ///
    /// Unlike a strong solver, the transposition table here carries no depth or bound
    /// flag: every stored value is treated as exact, which is sound because the
    /// classifier only ever queries `solve`, and `solve`'s null-window probes at a
    /// given position always use the same pruning window derived from `position.get_moves()`.
    pub fn negamax(&mut self, position: &Position, mut alpha: i8, mut beta: i8) -> i8 {
        self.explored_positions += 1;

        // An immediate win is the base case: no deeper search is required
        if position.can_win_next() {
            return (Position::BOARD_SIZE + 1 - position.get_moves()) as i8 / 2;
        }

        // Move generation and pruning
        let possible_moves = position.possible_non_losing_moves();
        if possible_moves == 0 {
            // If there are no possible non-losing moves, then the opponent is guaranteed to win
            return -((Position::BOARD_SIZE - position.get_moves()) as i8) / 2;
        }

        // A drawn game: the board will fill with no further alignment possible
        if position.get_moves() >= Position::BOARD_SIZE - 2 {
            return 0;
        }

        // Tightens the lower bound as the opponent cannot win next move
        let min = -((Position::BOARD_SIZE - position.get_moves()) as i8 - 2) / 2;
        if alpha < min {
            if min >= beta { return min }
            alpha = min;
        }

        // Tightens the upper bound as we cannot win immediately
        let max = ((Position::BOARD_SIZE - position.get_moves()) as i8 - 1) / 2;
        if beta > max {
            if alpha >= max { return max }
            beta = max;
        }

        // Transposition table look-up
        let key = position.get_key();
        if let Some(value) = self.transposition_table.get(key) {
            if value >= beta || value <= alpha {
                return value;
            }
        }

        // Scores and sorts possible moves to explore the best ones first
        let mut moves = MoveSorter::new();
        for &column in Self::COLUMNS.iter().rev() {
            let move_bit = possible_moves & Position::column_mask(column);
            if move_bit > 0 {
                moves.add(column, position.score_move(move_bit))
            }
        }

        // Computes the scores of all possible next moves, keeping the best
        for column in moves {
            let mut new_position = *position;
            new_position.play(column);
            let score = -self.negamax(&new_position, -beta, -alpha);
            if score > alpha {
                alpha = score;
            }

            // Stops searching if a score is found outside the search window
            if alpha >= beta {
                break;
            }
        }

        self.transposition_table.put(key, alpha);
        alpha
    }
}

/// Default constructor for the `Solver` struct.
impl Default for Solver {
    fn default() -> Solver {
        Solver {
            explored_positions: 0,
            transposition_table: TranspositionTable::new(),
        }
    }
}
