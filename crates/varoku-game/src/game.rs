//! The game session and its operations.

use rand::Rng;
use varoku_core::{Board, CellRecord, Geometry, Position};
use varoku_generator::PuzzleGenerator;
use varoku_solver::{Solver, count_solutions};

use crate::{GameError, History, Mode, Move, MoveOrigin};

/// A game session: a board, its move history, and the current [`Mode`].
///
/// The session is the only holder of game state; every operation is a method
/// and returns a structured result. Mutating operations either succeed and
/// record their moves or fail without touching the board. Board and history
/// always change together, so undoing the whole history yields the board the
/// session started with.
///
/// # Examples
///
/// ```
/// use varoku_core::Position;
/// use varoku_game::{Game, Mode};
///
/// let mut game = Game::edit_blank();
/// assert_eq!(game.mode(), Mode::Editing);
///
/// game.set_cell(Position::new(4, 4), 7)?;
/// assert_eq!(game.board().value(Position::new(4, 4)), 7);
/// # Ok::<(), varoku_game::GameError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    history: History,
    mode: Mode,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates an uninitialized session holding a blank classic board.
    ///
    /// Every board operation is rejected until a board is set up through
    /// [`Game::edit_blank`] or [`Game::from_records`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(Geometry::default()),
            history: History::new(),
            mode: Mode::Uninitialized,
        }
    }

    /// Starts editing a blank classic 9×9 board.
    #[must_use]
    pub fn edit_blank() -> Self {
        Self {
            board: Board::new(Geometry::default()),
            history: History::new(),
            mode: Mode::Editing,
        }
    }

    /// Starts a session from saved cell records.
    ///
    /// An `Editing` load drops the fixed flags so every cell can be changed;
    /// a `Solving` load keeps them, making the saved clues immutable.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ModeMismatch`] for `Mode::Uninitialized` and
    /// [`GameError::InvalidRecords`] when the records do not form a board of
    /// the given geometry.
    pub fn from_records<I>(mode: Mode, geometry: Geometry, records: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        if mode.is_uninitialized() {
            return Err(GameError::ModeMismatch { mode });
        }
        let mut board = Board::from_records(geometry, records).map_err(GameError::InvalidRecords)?;
        if mode.is_editing() {
            for pos in geometry.positions() {
                board.set_fixed(pos, false);
            }
        }
        Ok(Self {
            board,
            history: History::new(),
            mode,
        })
    }

    /// Returns the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sets or clears a cell (`value == 0` clears) and records one `User`
    /// move.
    ///
    /// Conflicting entries are accepted; the constraint engine flags them on
    /// the board rather than rejecting the move.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and `Solving`, for positions off the
    /// board, for values above the side length, and for fixed clues.
    pub fn set_cell(&mut self, pos: Position, value: u8) -> Result<Move, GameError> {
        self.require_active()?;
        let geometry = self.board.geometry();
        if !geometry.contains(pos) {
            return Err(GameError::out_of_bounds(pos));
        }
        if value > geometry.size() {
            return Err(GameError::ValueOutOfRange {
                value,
                max: geometry.size(),
            });
        }
        if self.board.cell(pos).is_fixed() {
            return Err(GameError::fixed_cell(pos));
        }

        let old = self.board.commit(pos, value);
        let mv = Move {
            position: pos,
            old_value: old,
            new_value: value,
            origin: MoveOrigin::User,
        };
        self.history.record(mv);
        Ok(mv)
    }

    /// Reverts the most recent batch and returns its moves in application
    /// order.
    ///
    /// A batch is one `User` move plus the `Automatic` moves recorded with
    /// it, so a whole autofill or generation step undoes as a unit.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and `Solving`, and when nothing is left to
    /// undo.
    pub fn undo(&mut self) -> Result<Vec<Move>, GameError> {
        self.require_active()?;
        let batch = self
            .history
            .undo_batch()
            .ok_or(GameError::NothingToUndo)?
            .to_vec();
        for mv in batch.iter().rev() {
            self.board.commit(mv.position, mv.old_value);
        }
        Ok(batch)
    }

    /// Re-applies the next undone batch and returns its moves in application
    /// order.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and `Solving`, and when no undone batch
    /// exists.
    pub fn redo(&mut self) -> Result<Vec<Move>, GameError> {
        self.require_active()?;
        let batch = self
            .history
            .redo_batch()
            .ok_or(GameError::NothingToRedo)?
            .to_vec();
        for mv in &batch {
            self.board.commit(mv.position, mv.new_value);
        }
        Ok(batch)
    }

    /// Reverts every applied move and forgets the history.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and `Solving`.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.require_active()?;
        let applied = self.history.moves()[..self.history.cursor()].to_vec();
        for mv in applied.iter().rev() {
            self.board.commit(mv.position, mv.old_value);
        }
        self.history.clear();
        Ok(())
    }

    /// Counts every complete assignment consistent with the board.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and `Solving`, and on boards carrying
    /// conflict flags.
    pub fn count_solutions(&mut self) -> Result<u64, GameError> {
        self.require_active()?;
        if self.board.has_errors() {
            return Err(GameError::ErroneousBoard);
        }
        Ok(count_solutions(&mut self.board))
    }

    /// Commits every naked single found in one pass over the board, as one
    /// undoable batch.
    ///
    /// Candidates are detected against the board as it stands, stashed in
    /// the scratch layer, and only then committed in index order; cells
    /// becoming forced by the commits are left for a later call. An empty
    /// batch is returned when no cell is forced.
    ///
    /// # Errors
    ///
    /// Rejected outside `Solving` and on boards carrying conflict flags.
    pub fn autofill(&mut self) -> Result<Vec<Move>, GameError> {
        self.require_solving()?;
        if self.board.has_errors() {
            return Err(GameError::ErroneousBoard);
        }

        let geometry = self.board.geometry();
        let total = self.board.cell_count();
        self.board.clear_scratch_from(0);
        for index in 0..total {
            if self.board.cell_at(index).is_empty() {
                if let Some(value) = self.board.sole_candidate(index) {
                    self.board.set_scratch(index, value);
                }
            }
        }
        let stashed: Vec<(Position, u8)> = (0..total)
            .filter(|&index| self.board.scratch_at(index) != 0)
            .map(|index| (geometry.position_of(index), self.board.scratch_at(index)))
            .collect();
        self.board.clear_scratch_from(0);

        log::debug!("autofill found {} naked singles", stashed.len());
        Ok(self.commit_batch(stashed))
    }

    /// Reports whether the board can be completed.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and `Solving`, and on boards carrying
    /// conflict flags.
    pub fn validate<S>(&self, solver: &S) -> Result<bool, GameError>
    where
        S: Solver + ?Sized,
    {
        self.require_active()?;
        if self.board.has_errors() {
            return Err(GameError::ErroneousBoard);
        }
        Ok(solver.solve(&self.board).is_some())
    }

    /// Looks up the value a solution assigns to an empty cell.
    ///
    /// Returns `Ok(None)` when the board holds no solution at all.
    ///
    /// # Errors
    ///
    /// Rejected outside `Solving`, for positions off the board, on boards
    /// carrying conflict flags, and for fixed or already filled cells.
    pub fn hint<S>(&self, solver: &S, pos: Position) -> Result<Option<u8>, GameError>
    where
        S: Solver + ?Sized,
    {
        self.require_solving()?;
        if !self.board.geometry().contains(pos) {
            return Err(GameError::out_of_bounds(pos));
        }
        if self.board.has_errors() {
            return Err(GameError::ErroneousBoard);
        }
        if self.board.cell(pos).is_fixed() {
            return Err(GameError::fixed_cell(pos));
        }
        if self.board.value(pos) != 0 {
            return Err(GameError::already_filled(pos));
        }
        Ok(solver.solve(&self.board).map(|assignment| assignment.value(pos)))
    }

    /// Generates a puzzle onto the empty board and commits its clues as one
    /// undoable batch, returned in application order.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and on boards already holding entries;
    /// generator failures, including out-of-range counts and an exhausted
    /// attempt budget, surface as [`GameError::GenerationFailed`].
    pub fn generate<S, R>(
        &mut self,
        generator: &PuzzleGenerator<'_, S>,
        seed_count: usize,
        clue_count: usize,
        rng: &mut R,
    ) -> Result<Vec<Move>, GameError>
    where
        S: Solver + ?Sized,
        R: Rng + ?Sized,
    {
        self.require_editing()?;
        if !self.board.is_blank() {
            return Err(GameError::BoardNotEmpty);
        }

        let puzzle = generator
            .generate(self.board.geometry(), seed_count, clue_count, rng)
            .map_err(GameError::GenerationFailed)?;
        log::debug!("generated {} clues", puzzle.clues.len());
        Ok(self.commit_batch(puzzle.clues))
    }

    /// Finishes the game if the full board is a valid solution.
    ///
    /// On success the session flips to `Uninitialized` and `true` is
    /// returned; a full board with conflicts or disagreeing with every
    /// solution yields `false` with the session unchanged.
    ///
    /// # Errors
    ///
    /// Rejected outside `Solving` and while the board still has empty
    /// cells.
    pub fn try_complete<S>(&mut self, solver: &S) -> Result<bool, GameError>
    where
        S: Solver + ?Sized,
    {
        self.require_solving()?;
        if !self.board.is_full() {
            return Err(GameError::BoardNotFull);
        }
        if self.board.has_errors() {
            return Ok(false);
        }
        if solver.solve(&self.board).is_none() {
            return Ok(false);
        }
        log::debug!("board completed, game over");
        self.mode = Mode::Uninitialized;
        Ok(true)
    }

    /// Exports the board as row-major cell records for saving.
    ///
    /// An `Editing` export turns every filled cell into a fixed clue, so
    /// the saved board loads as a playable puzzle; a `Solving` export keeps
    /// the flags as they are.
    ///
    /// # Errors
    ///
    /// Rejected outside `Editing` and `Solving`. An `Editing` export also
    /// requires a conflict-free board with at least one solution.
    pub fn save_records<S>(&self, solver: &S) -> Result<Vec<CellRecord>, GameError>
    where
        S: Solver + ?Sized,
    {
        match self.mode {
            Mode::Editing => {
                if self.board.has_errors() {
                    return Err(GameError::ErroneousBoard);
                }
                if solver.solve(&self.board).is_none() {
                    return Err(GameError::Unsolvable);
                }
                Ok(self
                    .board
                    .records()
                    .map(|record| CellRecord {
                        value: record.value,
                        fixed: record.value != 0,
                    })
                    .collect())
            }
            Mode::Solving => Ok(self.board.records().collect()),
            Mode::Uninitialized => Err(GameError::ModeMismatch { mode: self.mode }),
        }
    }

    /// Commits `entries` in order as one batch, the last move `User` and the
    /// rest `Automatic`, recording each in the history.
    fn commit_batch(&mut self, entries: Vec<(Position, u8)>) -> Vec<Move> {
        let last = entries.len().checked_sub(1);
        let mut moves = Vec::with_capacity(entries.len());
        for (i, (pos, value)) in entries.into_iter().enumerate() {
            let origin = if Some(i) == last {
                MoveOrigin::User
            } else {
                MoveOrigin::Automatic
            };
            let old = self.board.commit(pos, value);
            let mv = Move {
                position: pos,
                old_value: old,
                new_value: value,
                origin,
            };
            self.history.record(mv);
            moves.push(mv);
        }
        moves
    }

    fn require_active(&self) -> Result<(), GameError> {
        if self.mode.is_uninitialized() {
            return Err(GameError::ModeMismatch { mode: self.mode });
        }
        Ok(())
    }

    fn require_solving(&self) -> Result<(), GameError> {
        if !self.mode.is_solving() {
            return Err(GameError::ModeMismatch { mode: self.mode });
        }
        Ok(())
    }

    fn require_editing(&self) -> Result<(), GameError> {
        if !self.mode.is_editing() {
            return Err(GameError::ModeMismatch { mode: self.mode });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;
    use varoku_solver::testing::BacktrackingSolver;

    use super::*;

    // One of the 288 complete 4x4 solutions.
    const SOLVED_4X4: [[u8; 4]; 4] = [
        [1, 2, 3, 4],
        [3, 4, 1, 2],
        [2, 1, 4, 3],
        [4, 3, 2, 1],
    ];

    fn geometry_4x4() -> Geometry {
        Geometry::new(2, 2).unwrap()
    }

    fn blank_game(mode: Mode) -> Game {
        Game::from_records(mode, geometry_4x4(), vec![CellRecord::default(); 16]).unwrap()
    }

    /// Records for the solved 4x4 board, with `holes` left empty.
    fn solved_records(holes: &[(u8, u8)]) -> Vec<CellRecord> {
        let mut records = Vec::new();
        for (y, row) in SOLVED_4X4.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                #[expect(clippy::cast_possible_truncation)]
                let hole = holes.contains(&(x as u8, y as u8));
                records.push(CellRecord {
                    value: if hole { 0 } else { value },
                    fixed: false,
                });
            }
        }
        records
    }

    #[test]
    fn new_game_rejects_board_operations() {
        let mut game = Game::new();
        assert_eq!(game.mode(), Mode::Uninitialized);
        assert_eq!(
            game.set_cell(Position::new(0, 0), 1),
            Err(GameError::ModeMismatch {
                mode: Mode::Uninitialized
            })
        );
        assert_eq!(
            game.undo(),
            Err(GameError::ModeMismatch {
                mode: Mode::Uninitialized
            })
        );
    }

    #[test]
    fn edit_blank_is_a_classic_board() {
        let game = Game::edit_blank();
        assert_eq!(game.mode(), Mode::Editing);
        assert_eq!(game.board().size(), 9);
        assert!(game.board().is_blank());
    }

    #[test]
    fn editing_load_drops_fixed_flags() {
        let mut records = solved_records(&[]);
        records[0].fixed = true;

        let editing =
            Game::from_records(Mode::Editing, geometry_4x4(), records.clone()).unwrap();
        assert!(!editing.board().cell(Position::new(0, 0)).is_fixed());

        let solving = Game::from_records(Mode::Solving, geometry_4x4(), records).unwrap();
        assert!(solving.board().cell(Position::new(0, 0)).is_fixed());
    }

    #[test]
    fn from_records_rejects_uninitialized_and_bad_records() {
        assert_eq!(
            Game::from_records(Mode::Uninitialized, geometry_4x4(), Vec::new()),
            Err(GameError::ModeMismatch {
                mode: Mode::Uninitialized
            })
        );
        assert!(matches!(
            Game::from_records(Mode::Solving, geometry_4x4(), Vec::new()),
            Err(GameError::InvalidRecords(_))
        ));
    }

    #[test]
    fn set_cell_commits_and_records() {
        let mut game = blank_game(Mode::Solving);
        let mv = game.set_cell(Position::new(1, 2), 3).unwrap();
        assert_eq!(mv.old_value, 0);
        assert_eq!(mv.new_value, 3);
        assert_eq!(mv.origin, MoveOrigin::User);
        assert_eq!(game.board().value(Position::new(1, 2)), 3);
        assert_eq!(game.history().moves().len(), 1);

        // Zero clears.
        game.set_cell(Position::new(1, 2), 0).unwrap();
        assert_eq!(game.board().value(Position::new(1, 2)), 0);
    }

    #[test]
    fn set_cell_rejections_leave_the_game_unchanged() {
        let mut records = solved_records(&[(0, 0)]);
        records[1].fixed = true;
        let mut game = Game::from_records(Mode::Solving, geometry_4x4(), records).unwrap();
        let before = game.clone();

        assert_eq!(
            game.set_cell(Position::new(4, 0), 1),
            Err(GameError::PositionOutOfBounds { x: 4, y: 0 })
        );
        assert_eq!(
            game.set_cell(Position::new(0, 0), 5),
            Err(GameError::ValueOutOfRange { value: 5, max: 4 })
        );
        assert_eq!(
            game.set_cell(Position::new(1, 0), 1),
            Err(GameError::FixedCell { x: 1, y: 0 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn undo_restores_conflict_flags() {
        let mut game = blank_game(Mode::Solving);
        game.set_cell(Position::new(0, 0), 3).unwrap();
        game.set_cell(Position::new(3, 0), 3).unwrap();
        assert!(game.board().has_errors());

        let batch = game.undo().unwrap();
        assert_eq!(batch.len(), 1);
        assert!(!game.board().has_errors());
        assert_eq!(game.board().value(Position::new(0, 0)), 3);
    }

    #[test]
    fn empty_history_rejects_undo_and_redo() {
        let mut game = blank_game(Mode::Solving);
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
        assert_eq!(game.redo(), Err(GameError::NothingToRedo));
    }

    #[test]
    fn new_move_discards_the_redo_branch() {
        let mut game = blank_game(Mode::Solving);
        game.set_cell(Position::new(0, 0), 1).unwrap();
        game.set_cell(Position::new(1, 1), 2).unwrap();
        game.undo().unwrap();

        game.set_cell(Position::new(2, 2), 3).unwrap();
        assert_eq!(game.redo(), Err(GameError::NothingToRedo));
        assert_eq!(game.history().moves().len(), 2);
    }

    #[test]
    fn reset_restores_the_initial_board() {
        let mut game =
            Game::from_records(Mode::Solving, geometry_4x4(), solved_records(&[(0, 0), (2, 1)]))
                .unwrap();
        let initial = game.board().clone();

        game.set_cell(Position::new(0, 0), 1).unwrap();
        game.autofill().unwrap();
        game.reset().unwrap();

        assert_eq!(game.board(), &initial);
        assert!(!game.history().can_undo());
        assert!(!game.history().can_redo());
    }

    #[test]
    fn solution_counting_goes_through_the_engine() {
        let mut game = blank_game(Mode::Editing);
        assert_eq!(game.count_solutions(), Ok(288));

        game.set_cell(Position::new(0, 0), 1).unwrap();
        game.set_cell(Position::new(1, 0), 1).unwrap();
        assert_eq!(game.count_solutions(), Err(GameError::ErroneousBoard));
    }

    #[test]
    fn autofill_commits_the_forced_cell_as_a_user_move() {
        let mut game =
            Game::from_records(Mode::Solving, geometry_4x4(), solved_records(&[(2, 1)])).unwrap();

        let batch = game.autofill().unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].origin, MoveOrigin::User);
        assert_eq!(batch[0].new_value, SOLVED_4X4[1][2]);
        assert!(game.board().is_full());
        assert!(!game.board().has_errors());
    }

    #[test]
    fn autofill_batches_in_index_order() {
        let mut game =
            Game::from_records(Mode::Solving, geometry_4x4(), solved_records(&[(2, 1), (0, 3)]))
                .unwrap();

        let batch = game.autofill().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].position, Position::new(2, 1));
        assert_eq!(batch[0].origin, MoveOrigin::Automatic);
        assert_eq!(batch[1].position, Position::new(0, 3));
        assert_eq!(batch[1].origin, MoveOrigin::User);
        assert!(game.board().is_full());

        // The whole batch undoes as one step.
        game.undo().unwrap();
        assert_eq!(game.board().value(Position::new(2, 1)), 0);
        assert_eq!(game.board().value(Position::new(0, 3)), 0);
    }

    #[test]
    fn autofill_without_forced_cells_is_an_empty_batch() {
        let mut game = blank_game(Mode::Solving);
        assert_eq!(game.autofill(), Ok(Vec::new()));
        assert!(game.board().is_blank());
    }

    #[test]
    fn autofill_requires_solving_mode() {
        let mut game = blank_game(Mode::Editing);
        assert_eq!(
            game.autofill(),
            Err(GameError::ModeMismatch {
                mode: Mode::Editing
            })
        );
    }

    #[test]
    fn validate_reports_solvability() {
        let solver = BacktrackingSolver;
        let mut game = blank_game(Mode::Editing);
        assert_eq!(game.validate(&solver), Ok(true));

        // Column 0 holds 1,2 and row 3 holds 3,4; cell (0,3) is dead.
        game.set_cell(Position::new(0, 0), 1).unwrap();
        game.set_cell(Position::new(0, 1), 2).unwrap();
        game.set_cell(Position::new(1, 3), 3).unwrap();
        game.set_cell(Position::new(2, 3), 4).unwrap();
        assert_eq!(game.validate(&solver), Ok(false));
    }

    #[test]
    fn hint_reads_the_solution() {
        let solver = BacktrackingSolver;
        let mut records = solved_records(&[(2, 1)]);
        records[0].fixed = true;
        let game = Game::from_records(Mode::Solving, geometry_4x4(), records).unwrap();

        assert_eq!(
            game.hint(&solver, Position::new(2, 1)),
            Ok(Some(SOLVED_4X4[1][2]))
        );
        assert_eq!(
            game.hint(&solver, Position::new(0, 0)),
            Err(GameError::FixedCell { x: 0, y: 0 })
        );
        assert_eq!(
            game.hint(&solver, Position::new(1, 0)),
            Err(GameError::CellAlreadyFilled { x: 1, y: 0 })
        );
        assert_eq!(
            game.hint(&solver, Position::new(4, 4)),
            Err(GameError::PositionOutOfBounds { x: 4, y: 4 })
        );
    }

    #[test]
    fn hint_on_a_dead_board_is_none() {
        let solver = BacktrackingSolver;
        let mut game = blank_game(Mode::Solving);
        game.set_cell(Position::new(0, 0), 1).unwrap();
        game.set_cell(Position::new(0, 1), 2).unwrap();
        game.set_cell(Position::new(1, 3), 3).unwrap();
        game.set_cell(Position::new(2, 3), 4).unwrap();
        assert_eq!(game.hint(&solver, Position::new(3, 1)), Ok(None));
    }

    #[test]
    fn generate_fills_the_board_as_one_batch() {
        let solver = BacktrackingSolver;
        let generator = PuzzleGenerator::new(&solver);
        let mut rng = Pcg64Mcg::seed_from_u64(21);
        let mut game = blank_game(Mode::Editing);

        let batch = game.generate(&generator, 6, 4, &mut rng).unwrap();
        assert_eq!(batch.len(), 4);
        assert_eq!(batch[3].origin, MoveOrigin::User);
        assert!(batch[..3]
            .iter()
            .all(|mv| mv.origin == MoveOrigin::Automatic));
        assert_eq!(game.board().filled_count(), 4);
        assert!(!game.board().has_errors());

        game.undo().unwrap();
        assert!(game.board().is_blank());
    }

    #[test]
    fn generate_requires_an_empty_editing_board() {
        let solver = BacktrackingSolver;
        let generator = PuzzleGenerator::new(&solver);
        let mut rng = Pcg64Mcg::seed_from_u64(0);

        let mut game = blank_game(Mode::Solving);
        assert_eq!(
            game.generate(&generator, 6, 4, &mut rng),
            Err(GameError::ModeMismatch {
                mode: Mode::Solving
            })
        );

        let mut game = blank_game(Mode::Editing);
        game.set_cell(Position::new(0, 0), 1).unwrap();
        assert_eq!(
            game.generate(&generator, 6, 4, &mut rng),
            Err(GameError::BoardNotEmpty)
        );
    }

    #[test]
    fn completing_a_solved_board_ends_the_game() {
        let solver = BacktrackingSolver;
        let mut game =
            Game::from_records(Mode::Solving, geometry_4x4(), solved_records(&[])).unwrap();

        assert_eq!(game.try_complete(&solver), Ok(true));
        assert_eq!(game.mode(), Mode::Uninitialized);
        assert_eq!(
            game.set_cell(Position::new(0, 0), 1),
            Err(GameError::ModeMismatch {
                mode: Mode::Uninitialized
            })
        );
    }

    #[test]
    fn completing_needs_a_full_valid_board() {
        let solver = BacktrackingSolver;

        let mut game =
            Game::from_records(Mode::Solving, geometry_4x4(), solved_records(&[(2, 1)])).unwrap();
        assert_eq!(game.try_complete(&solver), Err(GameError::BoardNotFull));

        // Swap two cells of a row to make the full board invalid.
        let mut records = solved_records(&[]);
        records.swap(0, 1);
        let mut game = Game::from_records(Mode::Solving, geometry_4x4(), records).unwrap();
        assert_eq!(game.try_complete(&solver), Ok(false));
        assert_eq!(game.mode(), Mode::Solving);
    }

    #[test]
    fn editing_save_fixes_every_filled_cell() {
        let solver = BacktrackingSolver;
        let mut game = blank_game(Mode::Editing);
        game.set_cell(Position::new(0, 0), 1).unwrap();
        game.set_cell(Position::new(3, 3), 2).unwrap();

        let records = game.save_records(&solver).unwrap();
        assert_eq!(records.len(), 16);
        for (index, record) in records.iter().enumerate() {
            assert_eq!(record.fixed, record.value != 0, "record {index}");
        }
        assert_eq!(records.iter().filter(|record| record.fixed).count(), 2);
    }

    #[test]
    fn editing_save_requires_a_solvable_board() {
        let solver = BacktrackingSolver;
        let mut game = blank_game(Mode::Editing);
        game.set_cell(Position::new(0, 0), 1).unwrap();
        game.set_cell(Position::new(0, 1), 2).unwrap();
        game.set_cell(Position::new(1, 3), 3).unwrap();
        game.set_cell(Position::new(2, 3), 4).unwrap();
        assert_eq!(game.save_records(&solver), Err(GameError::Unsolvable));

        game.set_cell(Position::new(1, 3), 4).unwrap();
        assert_eq!(game.save_records(&solver), Err(GameError::ErroneousBoard));
    }

    #[test]
    fn solving_save_keeps_flags_as_they_are() {
        let solver = BacktrackingSolver;
        let mut records = solved_records(&[(2, 1)]);
        records[0].fixed = true;
        let mut game = Game::from_records(Mode::Solving, geometry_4x4(), records).unwrap();
        game.set_cell(Position::new(2, 1), 1).unwrap();

        let saved = game.save_records(&solver).unwrap();
        assert!(saved[0].fixed);
        assert!(!saved[6].fixed);
        assert_eq!(saved[6].value, 1);
    }

    proptest! {
        /// Undoing everything restores the initial board and redoing
        /// everything restores the final one, conflict flags included.
        #[test]
        fn undo_and_redo_are_inverses(
            ops in proptest::collection::vec((0usize..16, 0u8..=4), 1..40),
        ) {
            let mut game = blank_game(Mode::Solving);
            let geometry = game.board().geometry();
            let initial = game.board().clone();

            for (index, value) in ops {
                game.set_cell(geometry.position_of(index), value).unwrap();
            }
            let last = game.board().clone();

            while game.undo().is_ok() {}
            prop_assert_eq!(game.board(), &initial);

            while game.redo().is_ok() {}
            prop_assert_eq!(game.board(), &last);
        }
    }
}
