//! Randomized puzzle generation for varoku boards.
//!
//! Generation follows a seed-verify-prune scheme: fill a handful of cells
//! with unchecked random values, ask the bound [`Solver`] whether the
//! position is still solvable, and when it is, keep a random subset of the
//! full solution as clues. Random seeding makes dead positions likely, so a
//! single attempt is allowed to fail; [`PuzzleGenerator::generate`] retries
//! under a bounded attempt budget.
//!
//! # Examples
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64Mcg;
//! use varoku_core::Geometry;
//! use varoku_generator::PuzzleGenerator;
//! use varoku_solver::testing::BacktrackingSolver;
//!
//! let solver = BacktrackingSolver;
//! let generator = PuzzleGenerator::new(&solver);
//! let mut rng = Pcg64Mcg::seed_from_u64(7);
//!
//! let puzzle = generator
//!     .generate(Geometry::new(2, 2)?, 6, 4, &mut rng)
//!     .expect("4x4 generation succeeds within the attempt budget");
//! assert_eq!(puzzle.clues.len(), 4);
//! # Ok::<(), varoku_core::GeometryError>(())
//! ```

use derive_more::{Display, Error};
use rand::{Rng, RngExt};
use varoku_core::{Board, Geometry, Position};
use varoku_solver::{FullAssignment, Solver};

/// Attempt budget used by [`PuzzleGenerator::generate`].
pub const DEFAULT_ATTEMPTS: usize = 1000;

/// An error produced while generating a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GenerateError {
    /// More seed cells requested than the board holds.
    #[display("cannot seed {requested} cells on a board with {available} cells")]
    SeedCountOutOfRange {
        /// Requested number of randomly seeded cells.
        requested: usize,
        /// Cells available on the board.
        available: usize,
    },
    /// More clues requested than the board holds.
    #[display("cannot keep {requested} clues on a board with {available} cells")]
    ClueCountOutOfRange {
        /// Requested number of retained clues.
        requested: usize,
        /// Cells available on the board.
        available: usize,
    },
    /// The random seeding produced an unsolvable position; retryable.
    #[display("board seeding produced an unsolvable position")]
    Infeasible,
    /// Every attempt in the budget produced an unsolvable position.
    #[display("puzzle generator failed after {attempts} attempts")]
    AttemptsExhausted {
        /// The exhausted attempt budget.
        attempts: usize,
    },
}

/// A generated puzzle: the retained clues and the full solution they came
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// Board shape the puzzle was generated for.
    pub geometry: Geometry,
    /// Retained clues in row-major order.
    pub clues: Vec<(Position, u8)>,
    /// The complete solution the clues are a subset of.
    pub solution: FullAssignment,
}

/// A puzzle generator bound to an external [`Solver`].
#[derive(Debug, Clone, Copy)]
pub struct PuzzleGenerator<'a, S: ?Sized> {
    solver: &'a S,
}

impl<'a, S> PuzzleGenerator<'a, S>
where
    S: Solver + ?Sized,
{
    /// Creates a generator using `solver` to verify seeded positions.
    #[must_use]
    pub fn new(solver: &'a S) -> Self {
        Self { solver }
    }

    /// Makes a single generation attempt.
    ///
    /// Fills `seed_count` distinct cells of a fresh board with uniformly
    /// random values `1..=N` without any conflict checking, then asks the
    /// solver for a full assignment. If one exists, `clue_count` cells are
    /// drawn uniformly at random from the solution and returned as clues in
    /// row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Infeasible`] when the seeded position cannot
    /// be solved — the caller may simply try again — and the range errors
    /// when `seed_count` or `clue_count` exceed the board's cell count.
    pub fn attempt<R>(
        &self,
        geometry: Geometry,
        seed_count: usize,
        clue_count: usize,
        rng: &mut R,
    ) -> Result<GeneratedPuzzle, GenerateError>
    where
        R: Rng + ?Sized,
    {
        let total = geometry.cell_count();
        if seed_count > total {
            return Err(GenerateError::SeedCountOutOfRange {
                requested: seed_count,
                available: total,
            });
        }
        if clue_count > total {
            return Err(GenerateError::ClueCountOutOfRange {
                requested: clue_count,
                available: total,
            });
        }

        let mut board = Board::new(geometry);
        let mut seeded = 0;
        while seeded < seed_count {
            let index = rng.random_range(0..total);
            let pos = geometry.position_of(index);
            if board.value(pos) != 0 {
                continue;
            }
            board.commit(pos, rng.random_range(1..=geometry.size()));
            seeded += 1;
        }

        let solution = self
            .solver
            .solve(&board)
            .ok_or(GenerateError::Infeasible)?;

        let mut retained: Vec<usize> = rand::seq::index::sample(rng, total, clue_count).into_vec();
        retained.sort_unstable();
        let clues = retained
            .into_iter()
            .map(|index| (geometry.position_of(index), solution.value_at(index)))
            .collect();

        Ok(GeneratedPuzzle {
            geometry,
            clues,
            solution,
        })
    }

    /// Generates a puzzle, retrying infeasible seedings up to
    /// [`DEFAULT_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::AttemptsExhausted`] when every attempt
    /// failed, or a range error from the first attempt.
    pub fn generate<R>(
        &self,
        geometry: Geometry,
        seed_count: usize,
        clue_count: usize,
        rng: &mut R,
    ) -> Result<GeneratedPuzzle, GenerateError>
    where
        R: Rng + ?Sized,
    {
        self.generate_with_attempts(geometry, seed_count, clue_count, DEFAULT_ATTEMPTS, rng)
    }

    /// Generates a puzzle under a caller-chosen attempt budget.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::AttemptsExhausted`] when every attempt
    /// failed, or a range error from the first attempt.
    pub fn generate_with_attempts<R>(
        &self,
        geometry: Geometry,
        seed_count: usize,
        clue_count: usize,
        attempts: usize,
        rng: &mut R,
    ) -> Result<GeneratedPuzzle, GenerateError>
    where
        R: Rng + ?Sized,
    {
        for attempt in 1..=attempts {
            match self.attempt(geometry, seed_count, clue_count, rng) {
                Ok(puzzle) => {
                    log::debug!("puzzle generated on attempt {attempt}");
                    return Ok(puzzle);
                }
                Err(GenerateError::Infeasible) => {
                    log::debug!("generation attempt {attempt} was infeasible, retrying");
                }
                Err(err) => return Err(err),
            }
        }
        Err(GenerateError::AttemptsExhausted { attempts })
    }
}
