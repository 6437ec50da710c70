//! A single board cell.

/// One cell of a [`Board`](crate::Board).
///
/// A cell holds a committed `value` (`0` meaning empty, otherwise `1..=N`),
/// a `fixed` flag marking puzzle clues the player may not alter, a cached
/// `erroneous` flag maintained by the board's constraint engine, and a
/// `scratch` value used for trial assignments during search, autofill
/// detection, and generation. The scratch value is never visible as
/// committed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) value: u8,
    pub(crate) fixed: bool,
    pub(crate) erroneous: bool,
    pub(crate) scratch: u8,
}

impl Cell {
    /// Returns the committed value; `0` means empty.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Returns whether the cell has no committed value.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.value == 0
    }

    /// Returns whether the cell is a fixed clue.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        self.fixed
    }

    /// Returns whether another cell in the same row, column, or block holds
    /// the same nonzero value.
    ///
    /// Always `false` for empty cells.
    #[must_use]
    pub const fn is_erroneous(self) -> bool {
        self.erroneous
    }

    /// Returns the scratch (trial) value; `0` means unset.
    #[must_use]
    pub const fn scratch(self) -> u8 {
        self.scratch
    }
}
