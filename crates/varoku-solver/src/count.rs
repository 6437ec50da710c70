//! Exhaustive solution counting with an explicit depth-first stack.

use varoku_core::Board;

/// Counts every complete assignment consistent with the board's committed
/// cells.
///
/// The frontier is an explicit stack of cell indices, so the search depth is
/// bounded by the number of empty cells rather than the native call stack.
/// Each frame is the next undecided cell; a frame holding `cell_count()`
/// marks a complete assignment. Trial values live in the cells' scratch
/// slots and resume where they left off after a backtrack, so each branch at
/// a cell tries values `1..=N` in increasing order exactly once.
///
/// Committed state is never touched; all scratch values are cleared before
/// and after the run. Enumeration is exhaustive — for boards with many
/// solutions the running time is exponential, which is inherent to exact
/// counting.
///
/// The caller is responsible for only counting on boards without conflict
/// flags set; committed duplicates are not re-checked here.
pub fn count_solutions(board: &mut Board) -> u64 {
    let total = board.cell_count();
    let n = board.size();
    board.clear_scratch_from(0);

    let mut count = 0;
    let mut stack = vec![board.next_empty_cell(0)];
    while let Some(&frame) = stack.last() {
        if frame >= total {
            count += 1;
            stack.pop();
            continue;
        }

        // Trial values chosen below this cell belong to an abandoned branch.
        board.clear_scratch_from(frame + 1);

        let mut candidate = board.scratch_at(frame) + 1;
        let mut advanced = false;
        while candidate <= n {
            board.set_scratch(frame, candidate);
            if board.scratch_fits(frame) {
                advanced = true;
                break;
            }
            candidate += 1;
        }

        if advanced {
            stack.push(board.next_empty_cell(frame + 1));
        } else {
            stack.pop();
        }
    }

    board.clear_scratch_from(0);
    count
}
