//! Reference solver for tests, benches, and examples.
//!
//! Production deployments bind an integer-linear-programming solver behind
//! the [`Solver`] trait; this module supplies a small exhaustive-search
//! stand-in so the game and generator crates can be exercised without that
//! binding.

use varoku_core::Board;

use crate::{FullAssignment, Solver};

/// A first-solution depth-first [`Solver`] over a cloned board.
///
/// Uses the same explicit-stack search as the solution counter but stops at
/// the first complete assignment. Boards carrying conflict flags are
/// reported unsolvable immediately, matching the contract that a solution
/// must agree with every committed cell.
///
/// # Examples
///
/// ```
/// use varoku_core::{Board, Geometry};
/// use varoku_solver::{Solver as _, testing::BacktrackingSolver};
///
/// let board = Board::new(Geometry::new(2, 2)?);
/// let assignment = BacktrackingSolver.solve(&board).expect("empty board is solvable");
/// assert_eq!(assignment.values().len(), 16);
/// # Ok::<(), varoku_core::GeometryError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktrackingSolver;

impl Solver for BacktrackingSolver {
    fn solve(&self, board: &Board) -> Option<FullAssignment> {
        if board.has_errors() {
            return None;
        }

        let mut work = board.clone();
        let total = work.cell_count();
        let n = work.size();
        work.clear_scratch_from(0);

        let mut stack = vec![work.next_empty_cell(0)];
        while let Some(&frame) = stack.last() {
            if frame >= total {
                let values = (0..total)
                    .map(|index| {
                        let cell = work.cell_at(index);
                        if cell.is_empty() { cell.scratch() } else { cell.value() }
                    })
                    .collect();
                return FullAssignment::new(work.geometry(), values).ok();
            }

            work.clear_scratch_from(frame + 1);
            let mut candidate = work.scratch_at(frame) + 1;
            let mut advanced = false;
            while candidate <= n {
                work.set_scratch(frame, candidate);
                if work.scratch_fits(frame) {
                    advanced = true;
                    break;
                }
                candidate += 1;
            }

            if advanced {
                stack.push(work.next_empty_cell(frame + 1));
            } else {
                stack.pop();
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use varoku_core::{Geometry, Position};

    use super::*;

    #[test]
    fn solution_agrees_with_committed_cells() {
        let mut board = Board::new(Geometry::new(2, 2).unwrap());
        board.commit(Position::new(0, 0), 2);
        board.commit(Position::new(3, 3), 1);

        let assignment = BacktrackingSolver.solve(&board).unwrap();
        assert_eq!(assignment.value(Position::new(0, 0)), 2);
        assert_eq!(assignment.value(Position::new(3, 3)), 1);

        // Every row, column, and block holds each value exactly once.
        let geometry = board.geometry();
        for pos in geometry.positions() {
            let value = assignment.value(pos);
            assert!(
                geometry.peers(pos).all(|peer| assignment.value(peer) != value),
                "duplicate {value} around {pos:?}"
            );
        }
    }

    #[test]
    fn erroneous_board_is_unsolvable() {
        let mut board = Board::new(Geometry::new(2, 2).unwrap());
        board.commit(Position::new(0, 0), 1);
        board.commit(Position::new(1, 0), 1);
        assert!(BacktrackingSolver.solve(&board).is_none());
    }

    #[test]
    fn dead_end_board_is_unsolvable() {
        let mut board = Board::new(Geometry::new(2, 2).unwrap());
        board.commit(Position::new(0, 0), 1);
        board.commit(Position::new(0, 1), 2);
        board.commit(Position::new(1, 3), 3);
        board.commit(Position::new(2, 3), 4);
        assert!(BacktrackingSolver.solve(&board).is_none());
    }

    #[test]
    fn input_board_is_untouched() {
        let mut board = Board::new(Geometry::new(2, 2).unwrap());
        board.commit(Position::new(2, 2), 4);
        let before = board.clone();
        let _ = BacktrackingSolver.solve(&board);
        assert_eq!(board, before);
    }
}
