use std::fmt;

use crate::board::Side;

/// A placement that was applied to a board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub side: Side,
    pub column: usize,
    /// the row gravity resolved the piece to
    pub row: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: column {}, row {}", self.side.label(), self.column, self.row)
    }
}

/// Ordered record of the moves applied in a game
#[derive(Clone, Default, Debug)]
pub struct MoveLog {
    moves: Vec<Move>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    pub fn push(&mut self, played: Move) {
        self.moves.push(played);
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

impl<'a> IntoIterator for &'a MoveLog {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
