//! Local search over N-Queens boards.
//!
//! Two strategies are provided, both as free functions that take a board by
//! reference and return a new one:
//!
//! - `hill_climbing`: a single steepest-ascent pass. It tries, one at a time,
//!   every move of a single queen from the *initial* board, and keeps the
//!   last candidate whose cost is no worse than the best seen. A candidate that
//!   solves the puzzle ends the pass at once. Repeating passes until the cost
//!   stops improving is left to the caller (see `solver::climb_to_plateau`).
//! - `min_conflicts`: each step scans every row and column of the current
//!   board, applies the single move with the lowest resulting cost, and stops
//!   as soon as the board is solved or the step budget runs out.
//!
//! Neither strategy guarantees a solution. A returned board with a positive
//! cost is the best effort within the budget.

use crate::queens::board::{Board, CURRENT_COLUMN};
use tracing::{debug, trace};

/// A candidate move: put the queen of `row` in `column`, giving `cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Row whose queen is moved.
    pub row: usize,
    /// Destination column.
    pub column: usize,
    /// Cost of the board after the move.
    pub cost: usize,
}

/// Runs one steepest-ascent hill-climbing pass from `initial`.
///
/// Candidates are generated in row-major order, each by moving one queen of a
/// fresh copy of `initial`. Ties favour the later candidate. When the cursor
/// reaches a row's original column it skips the next one, so the column right
/// after the original is never tried.
///
/// Returns `initial` unchanged if it is already solved.
#[must_use]
pub fn hill_climbing(initial: &Board) -> Board {
    if initial.is_solved() {
        return initial.clone();
    }

    let size = initial.size();
    let origin = initial.queens();
    let mut best = initial.clone();
    let (mut row, mut column) = (0, 0);

    while !best.is_solved() && row < size {
        let mut candidate = initial.clone();
        if candidate.move_queen(row, column) {
            debug!(row, column, "hill climbing found a solving move");
            return candidate;
        }

        if candidate.cost() <= best.cost() {
            trace!(row, column, cost = candidate.cost(), "accepted candidate");
            best = candidate;
        }

        column += if origin[row] == column { 2 } else { 1 };
        if column >= size {
            row += 1;
            column = 0;
        }
    }

    best
}

/// Finds the move with the lowest resulting cost anywhere on `board`.
///
/// Rows are scanned top to bottom and columns left to right. The first strict
/// minimum wins. A queen's current column is never a candidate, so a
/// one-column board has no move at all.
#[must_use]
pub fn best_move(board: &Board) -> Option<Move> {
    let mut best: Option<Move> = None;

    for row in 0..board.size() {
        for (column, cost) in board.conflicts_for_row(row).into_iter().enumerate() {
            if cost < best.map_or(CURRENT_COLUMN, |m| m.cost) {
                best = Some(Move { row, column, cost });
            }
        }
    }

    best
}

/// Runs min-conflicts from `initial` for at most `max_steps` moves.
///
/// Each step applies [`best_move`] to the current board. Returns as soon as a
/// move solves the board, or the last board reached once the budget is spent.
/// With `max_steps == 0`, or when `initial` is already solved, `initial` is
/// returned unchanged.
#[must_use]
pub fn min_conflicts(initial: &Board, max_steps: usize) -> Board {
    min_conflicts_counted(initial, max_steps).0
}

/// Same as [`min_conflicts`], also returning the number of moves applied.
pub(crate) fn min_conflicts_counted(initial: &Board, max_steps: usize) -> (Board, usize) {
    if initial.is_solved() {
        return (initial.clone(), 0);
    }

    let mut current = initial.clone();
    let mut steps = 0;

    while steps < max_steps {
        let Some(Move { row, column, cost }) = best_move(&current) else {
            break;
        };

        steps += 1;
        if current.move_queen(row, column) {
            debug!(steps, "min-conflicts found a solution");
            return (current, steps);
        }
        debug!(step = steps, row, column, cost, "min-conflicts step");
    }

    (current, steps)
}
