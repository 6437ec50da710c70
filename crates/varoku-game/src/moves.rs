//! The move history backing undo and redo.

use varoku_core::Position;

/// Who created a move.
///
/// A logical action is recorded as a run of `Automatic` moves closed by a
/// single `User` move; the origin is assigned when the move is created and
/// never changes. Undo and redo walk whole runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    /// Entered directly by the player.
    User,
    /// Produced by the engine as part of the enclosing action.
    Automatic,
}

/// One committed cell change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// The changed cell.
    pub position: Position,
    /// Value before the change, `0` for empty.
    pub old_value: u8,
    /// Value after the change, `0` for empty.
    pub new_value: u8,
    /// Who created the move.
    pub origin: MoveOrigin,
}

/// An append-only move sequence with a cursor separating applied moves from
/// the redo branch.
///
/// Moves before the cursor are applied; moves at and after it have been
/// undone and can be redone until a new move truncates them. A cursor of
/// zero means there is nothing to undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
    cursor: usize,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded move, applied and undone alike.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the number of currently applied moves.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether at least one applied move exists.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether an undone branch exists.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.moves.len()
    }

    /// Appends a move, discarding any undone branch.
    pub fn record(&mut self, mv: Move) {
        self.moves.truncate(self.cursor);
        self.moves.push(mv);
        self.cursor = self.moves.len();
    }

    /// Steps the cursor back over one batch and returns it in application
    /// order, or `None` when nothing is applied.
    ///
    /// The batch is the trailing applied move plus every `Automatic` move
    /// immediately before it; the walk stops once the next older move is a
    /// `User` move, which closes the previous batch.
    pub fn undo_batch(&mut self) -> Option<&[Move]> {
        if self.cursor == 0 {
            return None;
        }
        let mut start = self.cursor - 1;
        while start > 0 && self.moves[start - 1].origin == MoveOrigin::Automatic {
            start -= 1;
        }
        let end = self.cursor;
        self.cursor = start;
        Some(&self.moves[start..end])
    }

    /// Steps the cursor forward over one undone batch and returns it in
    /// application order, or `None` when no redo branch exists.
    ///
    /// The batch runs through the first `User` move inclusive; a branch
    /// ending without one is consumed whole.
    pub fn redo_batch(&mut self) -> Option<&[Move]> {
        if self.cursor == self.moves.len() {
            return None;
        }
        let mut end = self.cursor;
        while end < self.moves.len() && self.moves[end].origin == MoveOrigin::Automatic {
            end += 1;
        }
        if end < self.moves.len() {
            end += 1;
        }
        let start = self.cursor;
        self.cursor = end;
        Some(&self.moves[start..end])
    }

    /// Forgets every move and rewinds the cursor.
    pub fn clear(&mut self) {
        self.moves.clear();
        self.cursor = 0;
    }
}
