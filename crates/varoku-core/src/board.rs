//! The board store and incremental constraint engine.

use derive_more::{Display, Error};

use crate::{Cell, Geometry, Position};

/// A `(value, fixed)` pair exchanged with the persistence collaborator.
///
/// Boards serialize as one record per cell in row-major order; the on-disk
/// encoding itself is the caller's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellRecord {
    /// Committed value, `0` for empty.
    pub value: u8,
    /// Whether the cell is a fixed clue.
    pub fixed: bool,
}

/// An error produced when building a board from cell records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// A record's value exceeds the board's side length.
    #[display("cell value {value} not in range 0-{max}")]
    ValueOutOfRange {
        /// The offending value.
        value: u8,
        /// The board's side length.
        max: u8,
    },
    /// The record iterator yielded more cells than the board holds.
    #[display("more than {expected} cell records supplied")]
    TooManyCells {
        /// The board's cell count.
        expected: usize,
    },
    /// The record iterator ended before the board was full.
    #[display("expected {expected} cell records, got {found}")]
    TooFewCells {
        /// The board's cell count.
        expected: usize,
        /// Number of records supplied.
        found: usize,
    },
}

/// A block-rectangular Sudoku board with incrementally maintained conflict
/// flags.
///
/// Every committed mutation goes through [`Board::commit`], which updates
/// the fill counter and re-derives the affected cells' `erroneous` flags.
/// After any sequence of commits, a cell is flagged erroneous exactly when
/// another cell in its row, column, or block holds the same nonzero value;
/// no full-board recomputation ever happens.
///
/// Scratch values are a separate, per-cell trial layer used by the solution
/// counter, autofill detection, and the generator; they never affect the
/// committed state or the conflict flags.
///
/// # Examples
///
/// ```
/// use varoku_core::{Board, Geometry, Position};
///
/// let mut board = Board::new(Geometry::new(2, 2)?);
/// board.commit(Position::new(1, 1), 4);
/// board.commit(Position::new(1, 2), 4); // same column
/// assert!(board.has_errors());
///
/// board.commit(Position::new(1, 2), 3);
/// assert!(!board.has_errors());
/// assert_eq!(board.filled_count(), 2);
/// # Ok::<(), varoku_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Cell>,
    filled: usize,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            cells: vec![Cell::default(); geometry.cell_count()],
            filled: 0,
        }
    }

    /// Builds a board from row-major cell records, running every value
    /// through the constraint engine so conflict flags and the fill counter
    /// come out consistent.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ValueOutOfRange`] for a value above the side
    /// length, and [`BoardError::TooManyCells`] / [`BoardError::TooFewCells`]
    /// when the iterator length does not match the board.
    pub fn from_records<I>(geometry: Geometry, records: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = CellRecord>,
    {
        let mut board = Self::new(geometry);
        let expected = board.cell_count();
        let mut found = 0;
        for (index, record) in records.into_iter().enumerate() {
            if index >= expected {
                return Err(BoardError::TooManyCells { expected });
            }
            if record.value > geometry.size() {
                return Err(BoardError::ValueOutOfRange {
                    value: record.value,
                    max: geometry.size(),
                });
            }
            board.commit(geometry.position_of(index), record.value);
            board.cells[index].fixed = record.fixed;
            found = index + 1;
        }
        if found != expected {
            return Err(BoardError::TooFewCells { expected, found });
        }
        Ok(board)
    }

    /// Returns the board's geometry.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Returns the side length `N`.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.geometry.size()
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        assert!(self.geometry.contains(pos));
        &self.cells[self.geometry.index_of(pos)]
    }

    /// Returns the cell at a row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Returns the committed value at `pos`; `0` means empty.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    pub fn value(&self, pos: Position) -> u8 {
        self.cell(pos).value
    }

    /// Returns the number of cells holding a nonzero committed value.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    /// Returns whether every cell holds a committed value.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled == self.cell_count()
    }

    /// Returns whether no cell holds a committed value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.filled == 0
    }

    /// Returns whether any cell is flagged erroneous.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.cells.iter().any(|cell| cell.erroneous)
    }

    /// Returns the row-major index of the first empty cell at or after
    /// `from`, or `cell_count()` when no empty cell remains.
    #[must_use]
    pub fn next_empty_cell(&self, from: usize) -> usize {
        let total = self.cell_count();
        (from..total)
            .find(|&index| self.cells[index].value == 0)
            .unwrap_or(total)
    }

    /// Commits a value at `pos` and returns the value it replaces.
    ///
    /// This is the single entry point for committed mutations: it updates
    /// the fill counter and re-derives the conflict flags of every affected
    /// cell, including the cascading re-evaluation of cells that conflicted
    /// only with the retracted old value.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board or `value` exceeds the side
    /// length.
    pub fn commit(&mut self, pos: Position, value: u8) -> u8 {
        assert!(self.geometry.contains(pos));
        assert!(value <= self.size());
        let index = self.geometry.index_of(pos);
        let old = self.cells[index].value;
        self.cells[index].value = value;
        if old == 0 && value != 0 {
            self.filled += 1;
        }
        if old != 0 && value == 0 {
            self.filled -= 1;
        }
        self.refresh_conflicts(pos, value, old);
        old
    }

    /// Marks the cell at `pos` as a fixed clue (or clears the mark).
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    pub fn set_fixed(&mut self, pos: Position, fixed: bool) {
        assert!(self.geometry.contains(pos));
        let index = self.geometry.index_of(pos);
        self.cells[index].fixed = fixed;
    }

    /// Updates the conflict flags after the cell at `pos` changed from `old`
    /// to `new`. The committed value must already be in place.
    fn refresh_conflicts(&mut self, pos: Position, new: u8, old: u8) {
        let index = self.geometry.index_of(pos);
        if new == 0 {
            // Cells that conflicted only with the retracted value may be
            // clean now.
            if self.cells[index].erroneous && old != 0 {
                self.rescan_retracted(pos, old);
            }
            self.cells[index].erroneous = false;
            return;
        }

        let geometry = self.geometry;
        let mut found = false;
        for peer in geometry.peers(pos) {
            let peer_index = geometry.index_of(peer);
            if self.cells[peer_index].value == new {
                self.cells[peer_index].erroneous = true;
                found = true;
            }
        }

        // The pre-change flag: if this cell was part of a conflict on its
        // old value, its former partners need a fresh look.
        if self.cells[index].erroneous && new != old {
            self.rescan_retracted(pos, old);
        }
        self.cells[index].erroneous = found;
    }

    /// Re-evaluates every peer of `pos` whose committed value is `old`.
    ///
    /// Removing `old` from `pos` may have been the only cause of a peer's
    /// conflict; re-running the scan for the peer's own value either clears
    /// its flag or confirms a remaining duplicate elsewhere. Re-evaluation
    /// passes `new == old`, so it never cascades further.
    fn rescan_retracted(&mut self, pos: Position, old: u8) {
        let geometry = self.geometry;
        for peer in geometry.peers(pos) {
            if self.cells[geometry.index_of(peer)].value == old {
                let value = self.cells[geometry.index_of(peer)].value;
                self.refresh_conflicts(peer, value, value);
            }
        }
    }

    /// Returns the scratch value at a row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    #[must_use]
    pub fn scratch_at(&self, index: usize) -> u8 {
        self.cells[index].scratch
    }

    /// Sets the scratch value at a row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    pub fn set_scratch(&mut self, index: usize, value: u8) {
        self.cells[index].scratch = value;
    }

    /// Clears the scratch value of every cell at or after `start`.
    pub fn clear_scratch_from(&mut self, start: usize) {
        for cell in self.cells.iter_mut().skip(start) {
            cell.scratch = 0;
        }
    }

    /// Returns whether the (nonzero) scratch value at `index` conflicts with
    /// no peer, where a peer counts as its committed value when filled and
    /// its scratch value otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    #[must_use]
    pub fn scratch_fits(&self, index: usize) -> bool {
        let value = self.cells[index].scratch;
        let geometry = self.geometry;
        geometry.peers(geometry.position_of(index)).all(|peer| {
            let cell = &self.cells[geometry.index_of(peer)];
            let effective = if cell.value == 0 { cell.scratch } else { cell.value };
            effective != value
        })
    }

    /// Returns the naked single for the cell at `index`: the only value
    /// `1..=N` consistent with the committed values of its peers, or `None`
    /// when zero or several candidates remain.
    ///
    /// Only committed values participate; scratch values are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    #[must_use]
    pub fn sole_candidate(&self, index: usize) -> Option<u8> {
        let pos = self.geometry.position_of(index);
        let mut found = None;
        for value in 1..=self.size() {
            if self.geometry.peers(pos).any(|peer| self.value(peer) == value) {
                continue;
            }
            if found.is_some() {
                return None;
            }
            found = Some(value);
        }
        found
    }

    /// Iterates over the board's cells as `(value, fixed)` records in
    /// row-major order.
    pub fn records(&self) -> impl Iterator<Item = CellRecord> + '_ {
        self.cells.iter().map(|cell| CellRecord {
            value: cell.value,
            fixed: cell.fixed,
        })
    }
}
