//! Core data structures for the varoku Sudoku engine.
//!
//! This crate provides the board store and the incremental constraint engine
//! shared by the solver, generator, and game crates:
//!
//! - [`geometry`]: block-rectangular board geometry ([`Geometry`],
//!   [`Position`]) with row/column/block peer enumeration
//! - [`cell`]: a single board cell ([`Cell`]) holding a committed value, a
//!   fixed flag, a cached conflict flag, and a scratch (trial) value
//! - [`board`]: the board store ([`Board`]) whose [`Board::commit`] entry
//!   point keeps every cell's conflict flag consistent as values change
//!
//! Boards are `block_width * block_height == N` generalized Sudoku grids;
//! classic 9×9 Sudoku is the 3×3-block special case.
//!
//! # Examples
//!
//! ```
//! use varoku_core::{Board, Geometry, Position};
//!
//! let geometry = Geometry::new(2, 2)?;
//! let mut board = Board::new(geometry);
//!
//! // Two 3s in the same row conflict with each other.
//! board.commit(Position::new(0, 0), 3);
//! board.commit(Position::new(2, 0), 3);
//! assert!(board.cell(Position::new(0, 0)).is_erroneous());
//! assert!(board.cell(Position::new(2, 0)).is_erroneous());
//!
//! // Retracting one clears both flags.
//! board.commit(Position::new(0, 0), 0);
//! assert!(!board.has_errors());
//! # Ok::<(), varoku_core::GeometryError>(())
//! ```

pub use self::{
    board::{Board, BoardError, CellRecord},
    cell::Cell,
    geometry::{Geometry, GeometryError, Position},
};

pub mod board;
pub mod cell;
pub mod geometry;
