//! Board state and conflict evaluation for the N-Queens puzzle.
//!
//! A `Board` holds exactly one queen per row. The placement is stored twice:
//! as a list of columns indexed by row (`queens`) and as an N×N occupancy
//! matrix (`Grid`). The two are always kept in sync, and the board's cost is
//! recomputed from them on every change, so it is never stale.
//!
//! The cost counts attacks per queen: every queen counts each other queen it
//! shares a column or diagonal with. A pair of attacking queens therefore adds
//! two to the total, once from each side. Horizontal attacks are never checked
//! because the one-queen-per-row layout rules them out.

use bit_vec::BitVec;
use itertools::Itertools;
use std::fmt::{self, Display};

/// Value reported by [`Board::conflicts_for_row`] for the column the row's
/// queen already occupies, so that a minimum search never picks it.
pub const CURRENT_COLUMN: usize = usize::MAX;

/// A square occupancy matrix, stored row-major in a bit vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: BitVec,
}

impl Grid {
    /// Creates an empty `size`×`size` grid.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: BitVec::from_elem(size * size, false),
        }
    }

    /// The side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at `(row, column)` is occupied.
    /// Cells outside the grid read as empty.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> bool {
        row < self.size && column < self.size && self.cells[row * self.size + column]
    }

    /// Marks the cell at `(row, column)` as occupied or empty.
    ///
    /// # Panics
    ///
    /// If `row` or `column` is outside the grid.
    pub fn set(&mut self, row: usize, column: usize, occupied: bool) {
        assert!(
            row < self.size && column < self.size,
            "cell ({row}, {column}) is outside a {0}x{0} grid",
            self.size
        );
        self.cells.set(row * self.size + column, occupied);
    }

    /// Iterates over the cells of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |column| self.get(row, column))
    }

    /// The column of the occupied cell in `row`.
    ///
    /// A well-formed row has exactly one occupied cell. If there are several,
    /// the right-most one is returned. An empty row yields `None`.
    #[must_use]
    pub fn occupied_column(&self, row: usize) -> Option<usize> {
        self.row(row).positions(|occupied| occupied).last()
    }

    /// The number of occupied cells in the whole grid.
    #[must_use]
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|&occupied| occupied).count()
    }
}

impl From<Vec<Vec<u8>>> for Grid {
    fn from(rows: Vec<Vec<u8>>) -> Self {
        Self::from(rows.as_slice())
    }
}

impl From<&[Vec<u8>]> for Grid {
    fn from(rows: &[Vec<u8>]) -> Self {
        let size = rows.len();
        let mut grid = Self::new(size);
        for (r, row) in rows.iter().enumerate() {
            for (c, &cell) in row.iter().take(size).enumerate() {
                if cell != 0 {
                    grid.set(r, c, true);
                }
            }
        }
        grid
    }
}

impl<const N: usize> From<&[[u8; N]; N]> for Grid {
    fn from(rows: &[[u8; N]; N]) -> Self {
        let rows: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
        Self::from(rows)
    }
}

impl From<&Grid> for Vec<Vec<u8>> {
    fn from(grid: &Grid) -> Self {
        (0..grid.size)
            .map(|r| grid.row(r).map(u8::from).collect())
            .collect()
    }
}

/// One complete placement of N queens, one per row, together with its cost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Grid,
    queens: Vec<usize>,
    cost: usize,
}

impl Board {
    /// Creates a board of the given size with every row's queen placed in a
    /// uniformly random column drawn from `rng`.
    ///
    /// # Panics
    ///
    /// If `size` is zero.
    #[must_use]
    pub fn new_random(size: usize, rng: &mut fastrand::Rng) -> Self {
        assert!(size > 0, "board size must be positive");
        let queens: Vec<usize> = (0..size).map(|_| rng.usize(..size)).collect();
        Self::from_queens(&queens)
    }

    /// Creates a board from a list of columns, one per row.
    ///
    /// # Panics
    ///
    /// If any column is not smaller than the number of rows.
    #[must_use]
    pub fn from_queens(queens: &[usize]) -> Self {
        let size = queens.len();
        let mut grid = Grid::new(size);
        for (row, &column) in queens.iter().enumerate() {
            grid.set(row, column, true);
        }
        let cost = evaluate(&grid, queens);

        Self {
            grid,
            queens: queens.to_vec(),
            cost,
        }
    }

    /// Creates a board by reading the queen of each row off `grid`.
    ///
    /// Each row is expected to hold exactly one occupied cell. This is not
    /// checked: a row with several takes the right-most, an empty row puts its
    /// queen in column 0. The board rebuilds its own grid from the derived
    /// placement, so the result always satisfies the one-queen-per-row invariant.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let queens: Vec<usize> = (0..grid.size())
            .map(|row| grid.occupied_column(row).unwrap_or(0))
            .collect();
        Self::from_queens(&queens)
    }

    /// The number of attacks on this board. Zero means the puzzle is solved.
    #[must_use]
    pub const fn cost(&self) -> usize {
        self.cost
    }

    /// Whether no queen attacks another.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.cost == 0
    }

    /// The side length of the board, which is also the number of queens.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.grid.size()
    }

    /// The column of each row's queen, indexed by row.
    #[must_use]
    pub fn queens(&self) -> &[usize] {
        &self.queens
    }

    /// The occupancy matrix of this board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Moves the queen in `row` to `column` and recomputes the cost.
    ///
    /// Returns `true` if the board is solved after the move.
    ///
    /// # Panics
    ///
    /// If `row` or `column` is outside the board.
    pub fn move_queen(&mut self, row: usize, column: usize) -> bool {
        let old = self.queens[row];
        self.grid.set(row, old, false);
        self.grid.set(row, column, true);
        self.queens[row] = column;
        self.cost = evaluate(&self.grid, &self.queens);
        self.is_solved()
    }

    /// For each column of `row`, the cost the board would have if that row's
    /// queen moved there. The column the queen already occupies is reported as
    /// [`CURRENT_COLUMN`].
    ///
    /// Every candidate is evaluated on a full copy of the board, so one call is
    /// O(N³) and scanning all rows is O(N⁴). This dominates the running time
    /// of min-conflicts for large boards.
    ///
    /// # Panics
    ///
    /// If `row` is outside the board.
    #[must_use]
    pub fn conflicts_for_row(&self, row: usize) -> Vec<usize> {
        let current = self.queens[row];
        (0..self.size())
            .map(|column| {
                if column == current {
                    return CURRENT_COLUMN;
                }
                let mut candidate = self.clone();
                candidate.move_queen(row, column);
                candidate.cost()
            })
            .collect()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size() {
            writeln!(f, "{}", self.grid.row(row).map(u8::from).join(" "))?;
        }
        write!(f, "h-cost: {}", self.cost)
    }
}

fn evaluate(grid: &Grid, queens: &[usize]) -> usize {
    vertical_conflicts(grid, queens) + diagonal_conflicts(grid, queens)
}

/// Scans the column of every queen and counts the other rows occupied in it.
fn vertical_conflicts(grid: &Grid, queens: &[usize]) -> usize {
    queens
        .iter()
        .enumerate()
        .map(|(row, &column)| {
            (0..grid.size())
                .filter(|&other| other != row && grid.get(other, column))
                .count()
        })
        .sum()
}

/// Walks both diagonals through every queen, from the board edge where each
/// diagonal starts to the edge where it leaves, counting the other occupied cells.
fn diagonal_conflicts(grid: &Grid, queens: &[usize]) -> usize {
    let size = grid.size();
    let mut cost = 0;

    for (row, &pivot) in queens.iter().enumerate() {
        // Rising diagonal: row and column increase together.
        let mut r = row.saturating_sub(pivot);
        let mut c = pivot.saturating_sub(row);
        while r < size && c < size {
            if grid.get(r, c) && c != pivot && r != row {
                cost += 1;
            }
            r += 1;
            c += 1;
        }

        // Falling diagonal: row increases while column decreases.
        let mut r = (row + pivot).saturating_sub(size - 1);
        let mut c = (row + pivot).min(size - 1);
        while r < size {
            if grid.get(r, c) && c != pivot && r != row {
                cost += 1;
            }
            if c == 0 {
                break;
            }
            r += 1;
            c -= 1;
        }
    }

    cost
}
