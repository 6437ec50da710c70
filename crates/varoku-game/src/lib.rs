//! Game sessions over varoku boards.
//!
//! A [`Game`] owns a board, a move history, and a [`Mode`], and exposes
//! every user-facing operation as a method returning a structured result:
//! cell entry, batched undo and redo, autofill, solvability checks, hints,
//! puzzle generation, completion, and the record export used for saving.
//! There is no shared or global state; callers hold the `Game` and pass it
//! where it is needed.
//!
//! # Examples
//!
//! ```
//! use varoku_core::Position;
//! use varoku_game::Game;
//!
//! let mut game = Game::edit_blank();
//! game.set_cell(Position::new(0, 0), 5)?;
//! game.set_cell(Position::new(1, 0), 5)?;
//! assert!(game.board().has_errors());
//!
//! game.undo()?;
//! assert!(!game.board().has_errors());
//! # Ok::<(), varoku_game::GameError>(())
//! ```

use derive_more::{Display, Error, IsVariant};
use varoku_core::{BoardError, Position};
use varoku_generator::GenerateError;

pub use self::{
    game::Game,
    moves::{History, Move, MoveOrigin},
};

mod game;
mod moves;

/// The lifecycle phase of a [`Game`].
///
/// `Editing` is for authoring a puzzle; `Solving` is for playing one.
/// `Uninitialized` is the state before a board is set up and after a game
/// has been completed, and every board operation is rejected in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IsVariant)]
pub enum Mode {
    /// No game in progress.
    #[display("uninitialized")]
    Uninitialized,
    /// Authoring a puzzle; every non-conflicting entry is allowed.
    #[display("editing")]
    Editing,
    /// Playing a puzzle; fixed clues are immutable.
    #[display("solving")]
    Solving,
}

/// An error produced by a [`Game`] operation.
///
/// A rejected operation leaves the game unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The operation is not available in the game's current mode.
    #[display("operation not available in {mode} mode")]
    ModeMismatch {
        /// The game's current mode.
        mode: Mode,
    },
    /// The position lies outside the board.
    #[display("position ({x}, {y}) is outside the board")]
    PositionOutOfBounds {
        /// Requested column.
        x: u8,
        /// Requested row.
        y: u8,
    },
    /// The value exceeds the board's side length.
    #[display("value {value} not in range 0-{max}")]
    ValueOutOfRange {
        /// The offending value.
        value: u8,
        /// The board's side length.
        max: u8,
    },
    /// The cell is a fixed clue and cannot change.
    #[display("cell ({x}, {y}) is a fixed clue")]
    FixedCell {
        /// The cell's column.
        x: u8,
        /// The cell's row.
        y: u8,
    },
    /// The cell already holds a value.
    #[display("cell ({x}, {y}) is already filled")]
    CellAlreadyFilled {
        /// The cell's column.
        x: u8,
        /// The cell's row.
        y: u8,
    },
    /// The board carries conflict flags.
    #[display("board has conflicting entries")]
    ErroneousBoard,
    /// The board holds no solution.
    #[display("board is unsolvable")]
    Unsolvable,
    /// There is no move to undo.
    #[display("nothing to undo")]
    NothingToUndo,
    /// There is no undone move to redo.
    #[display("nothing to redo")]
    NothingToRedo,
    /// Generation requires an empty board.
    #[display("board already holds entries")]
    BoardNotEmpty,
    /// Completion requires a full board.
    #[display("board still has empty cells")]
    BoardNotFull,
    /// The supplied cell records do not form a valid board.
    #[display("invalid cell records: {_0}")]
    InvalidRecords(BoardError),
    /// The puzzle generator gave up.
    #[display("puzzle generation failed: {_0}")]
    GenerationFailed(GenerateError),
}

impl GameError {
    pub(crate) fn out_of_bounds(pos: Position) -> Self {
        Self::PositionOutOfBounds {
            x: pos.x(),
            y: pos.y(),
        }
    }

    pub(crate) fn fixed_cell(pos: Position) -> Self {
        Self::FixedCell {
            x: pos.x(),
            y: pos.y(),
        }
    }

    pub(crate) fn already_filled(pos: Position) -> Self {
        Self::CellAlreadyFilled {
            x: pos.x(),
            y: pos.y(),
        }
    }
}
