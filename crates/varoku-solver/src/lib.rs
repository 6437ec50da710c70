//! Solver interface and exhaustive solution counting for varoku boards.
//!
//! This crate defines the seam between the engine and the external solver
//! that decides global solvability:
//!
//! - [`Solver`]: the trait a solver binding implements — given a board,
//!   produce one [`FullAssignment`] or report infeasibility. Production
//!   deployments bind an integer-linear-programming solver here; the engine
//!   itself never supplies a fallback.
//! - [`count_solutions`]: stack-based depth-first enumeration of *all*
//!   complete assignments consistent with the committed cells.
//! - [`testing`]: a reference backtracking [`Solver`] for tests, benches,
//!   and examples.

use derive_more::{Display, Error};
use varoku_core::{Board, Geometry, Position};

pub use self::count::count_solutions;

mod count;
pub mod testing;

/// An error produced when constructing a [`FullAssignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SolverError {
    /// The value vector does not cover the board exactly.
    #[display("assignment has {found} values, board needs {expected}")]
    LengthMismatch {
        /// The board's cell count.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A value lies outside `1..=N`.
    #[display("assignment value {value} not in range 1-{max}")]
    ValueOutOfRange {
        /// The offending value.
        value: u8,
        /// The board's side length.
        max: u8,
    },
}

/// A complete assignment: one value `1..=N` per cell, row-major.
///
/// Produced by a [`Solver`]. The solver guarantees the assignment satisfies
/// every row/column/block constraint and agrees with every committed cell of
/// the board it solved; this type only enforces shape and value range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullAssignment {
    geometry: Geometry,
    values: Vec<u8>,
}

impl FullAssignment {
    /// Wraps a row-major value vector.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::LengthMismatch`] if the vector does not hold
    /// exactly one value per cell, and [`SolverError::ValueOutOfRange`] for
    /// any value outside `1..=N`.
    pub fn new(geometry: Geometry, values: Vec<u8>) -> Result<Self, SolverError> {
        if values.len() != geometry.cell_count() {
            return Err(SolverError::LengthMismatch {
                expected: geometry.cell_count(),
                found: values.len(),
            });
        }
        if let Some(&value) = values
            .iter()
            .find(|&&value| value == 0 || value > geometry.size())
        {
            return Err(SolverError::ValueOutOfRange {
                value,
                max: geometry.size(),
            });
        }
        Ok(Self { geometry, values })
    }

    /// Returns the geometry the assignment covers.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Returns the value at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    pub fn value(&self, pos: Position) -> u8 {
        self.values[self.geometry.index_of(pos)]
    }

    /// Returns the value at a row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn value_at(&self, index: usize) -> u8 {
        self.values[index]
    }

    /// Returns the values as a row-major slice.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

/// The external solver seam.
///
/// `solve` either produces a [`FullAssignment`] consistent with every
/// committed cell of `board`, or returns `None` when no such assignment
/// exists. Infeasibility is a negative result, not an error.
pub trait Solver {
    /// Solves the board, or reports that it cannot be solved.
    fn solve(&self, board: &Board) -> Option<FullAssignment>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, board: &Board) -> Option<FullAssignment> {
        (**self).solve(board)
    }
}
