use rustc_hash::FxHashMap;

use crate::{board::*, search::SearchResult};

/// Identifies a search node: the packed board, the side to move and the ply
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Key {
    cells: u128,
    mover: Side,
    depth: u8,
}

impl Key {
    pub fn new(board: &Board, mover: Side, depth: usize) -> Self {
        Self {
            cells: board.key(),
            mover,
            depth: depth as u8,
        }
    }
}

/// Cache of search results for the positions met during one decision
#[derive(Clone, Default)]
pub struct TranspositionTable {
    entries: FxHashMap<Key, SearchResult>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
    pub fn set(&mut self, key: Key, value: SearchResult) {
        self.entries.insert(key, value);
    }
    pub fn get(&self, key: &Key) -> Option<SearchResult> {
        self.entries.get(key).copied()
    }
    pub fn clear(&mut self) {
        self.entries.clear();
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
