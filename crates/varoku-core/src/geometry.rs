//! Board geometry for block-rectangular Sudoku grids.

use derive_more::{Display, Error};

/// A board position as zero-based `(x, y)` coordinates.
///
/// `x` is the column and `y` the row; `(0, 0)` is the top-left cell.
/// Positions carry no board size of their own — range checking is the
/// responsibility of the [`Geometry`] they are used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position from zero-based column and row coordinates.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns the zero-based column.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the zero-based row.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }
}

/// An error produced when constructing a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GeometryError {
    /// A block dimension was zero.
    #[display("block dimensions must be nonzero")]
    ZeroBlockDimension,
    /// The side length `block_width * block_height` does not fit a cell value.
    #[display("{block_width}x{block_height} blocks exceed the maximum board size")]
    BoardTooLarge {
        /// Requested block width.
        block_width: u8,
        /// Requested block height.
        block_height: u8,
    },
}

/// The shape of a block-rectangular Sudoku board.
///
/// A board is an `N × N` grid of cells partitioned into `block_height ×
/// block_width` blocks, where `N == block_width * block_height`. Every row,
/// column, and block must hold each value `1..=N` at most once.
///
/// Cells are addressed either by [`Position`] or by their row-major index
/// `y * N + x`.
///
/// # Examples
///
/// ```
/// use varoku_core::Geometry;
///
/// let geometry = Geometry::new(3, 2)?;
/// assert_eq!(geometry.size(), 6);
/// assert_eq!(geometry.cell_count(), 36);
/// # Ok::<(), varoku_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    block_width: u8,
    block_height: u8,
    size: u8,
}

impl Default for Geometry {
    /// The classic shape: 3×3 blocks, values 1 to 9.
    fn default() -> Self {
        Self {
            block_width: 3,
            block_height: 3,
            size: 9,
        }
    }
}

impl Geometry {
    /// Creates a geometry from block dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroBlockDimension`] if either dimension is
    /// zero, and [`GeometryError::BoardTooLarge`] if the side length
    /// `block_width * block_height` exceeds 255 (values are stored as `u8`).
    pub fn new(block_width: u8, block_height: u8) -> Result<Self, GeometryError> {
        if block_width == 0 || block_height == 0 {
            return Err(GeometryError::ZeroBlockDimension);
        }
        let size = u16::from(block_width) * u16::from(block_height);
        let size = u8::try_from(size).map_err(|_| GeometryError::BoardTooLarge {
            block_width,
            block_height,
        })?;
        Ok(Self {
            block_width,
            block_height,
            size,
        })
    }

    /// Returns the number of columns in a block.
    #[must_use]
    pub const fn block_width(self) -> u8 {
        self.block_width
    }

    /// Returns the number of rows in a block.
    #[must_use]
    pub const fn block_height(self) -> u8 {
        self.block_height
    }

    /// Returns the side length `N` of the board.
    #[must_use]
    pub const fn size(self) -> u8 {
        self.size
    }

    /// Returns the total number of cells, `N * N`.
    #[must_use]
    pub fn cell_count(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Returns whether `pos` lies on the board.
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos.x() < self.size && pos.y() < self.size
    }

    /// Converts a position to its row-major cell index.
    #[must_use]
    pub fn index_of(self, pos: Position) -> usize {
        usize::from(pos.y()) * usize::from(self.size) + usize::from(pos.x())
    }

    /// Converts a row-major cell index to a position.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    #[must_use]
    pub fn position_of(self, index: usize) -> Position {
        assert!(index < self.cell_count());
        let size = usize::from(self.size);
        #[expect(clippy::cast_possible_truncation)]
        Position::new((index % size) as u8, (index / size) as u8)
    }

    /// Returns the top-left position of the block containing `pos`.
    #[must_use]
    pub fn block_origin(self, pos: Position) -> Position {
        Position::new(
            pos.x() - pos.x() % self.block_width,
            pos.y() - pos.y() % self.block_height,
        )
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Position::new(x, y)))
    }

    /// Iterates over every other cell sharing `pos`'s row, column, or block.
    ///
    /// Each peer is yielded exactly once: block cells that also share the row
    /// or column are covered by the row/column legs and skipped by the block
    /// leg. `pos` itself is never yielded. A cell has
    /// `2 * (N - 1) + (block_width - 1) * (block_height - 1)` peers.
    pub fn peers(self, pos: Position) -> impl Iterator<Item = Position> {
        let row = (0..self.size)
            .filter(move |&x| x != pos.x())
            .map(move |x| Position::new(x, pos.y()));
        let column = (0..self.size)
            .filter(move |&y| y != pos.y())
            .map(move |y| Position::new(pos.x(), y));
        let origin = self.block_origin(pos);
        let block = (origin.y()..origin.y() + self.block_height)
            .flat_map(move |y| {
                (origin.x()..origin.x() + self.block_width).map(move |x| Position::new(x, y))
            })
            .filter(move |peer| peer.x() != pos.x() && peer.y() != pos.y());
        row.chain(column).chain(block)
    }
}
