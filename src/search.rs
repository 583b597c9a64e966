//! A depth-limited negamax search to pick the automated opponent's move

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{board::*, heuristic::evaluate, transposition_table::*, DEPTH_LIMIT, WIDTH};

/// The magnitude of a won position's score before the depth adjustment
pub const WIN_SCORE: i32 = 1000;

/// The value of a position for the side to move, and the column achieving it
///
/// `column` is `None` for positions that are already decided or cut off by the depth limit.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub score: i32,
    pub column: Option<usize>,
}

impl SearchResult {
    fn leaf(score: i32) -> Self {
        Self {
            score,
            column: None,
        }
    }
}

/// A full-width negamax search with a transposition table
///
/// # Position Scoring
/// A position where the side to move has already lost scores `-WIN_SCORE + depth`, so
/// after negation a win found sooner scores higher than one found later and a loss
/// found later scores higher than one found sooner. A full board scores 0. Positions
/// at the depth limit are scored by the heuristic evaluation from the mover's view.
///
/// Columns with equal scores are chosen between uniformly at random.
#[derive(Clone)]
pub struct Searcher {
    rng: ChaCha8Rng,
    depth_limit: usize,
    memoize: bool,
    silent: bool,

    /// The number of nodes searched in the last decision (for diagnostics only)
    pub node_count: usize,
    transposition_table: TranspositionTable,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// Creates a new `Searcher` breaking ties with an entropy-seeded generator
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates a new `Searcher` with reproducible tie-breaking
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            depth_limit: DEPTH_LIMIT,
            memoize: true,
            silent: true,
            node_count: 0,
            transposition_table: TranspositionTable::new(),
        }
    }

    /// Changes the number of plies searched before the heuristic takes over
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        assert!(
            depth_limit >= 1 && depth_limit <= u8::MAX as usize,
            "depth limit {} out of range",
            depth_limit
        );
        self.depth_limit = depth_limit;
        self
    }

    /// Disables the transposition table, searching every node in full
    pub fn without_transposition_table(mut self) -> Self {
        self.memoize = false;
        self
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Performs game tree search on a private board, playing `mover` at this node
    ///
    /// Returns the score of the position (see [Position Scoring])
    ///
    /// [Position Scoring]: #position-scoring
    fn negamax(&mut self, board: &mut Board, mover: Side, depth: usize) -> SearchResult {
        self.node_count += 1;

        // the previous move completed a line, so the side to move has lost
        if board.has_four() {
            return SearchResult::leaf(-WIN_SCORE + depth as i32);
        }

        if board.check_draw() {
            return SearchResult::leaf(0);
        }

        // search horizon
        if depth == self.depth_limit {
            return SearchResult::leaf(evaluate(board, mover));
        }

        let key = Key::new(board, mover, depth);
        if self.memoize {
            if let Some(result) = self.transposition_table.get(&key) {
                return result;
            }
        }

        let mut scores: [Option<i32>; WIDTH] = [None; WIDTH];
        for column in 0..WIDTH {
            let row = match board.place(column, mover) {
                Some(row) => row,
                None => continue,
            };
            // the child's value is from the opponent's point of view
            let score = -self.negamax(board, mover.opponent(), depth + 1).score;
            board.undo(row, column);

            if depth == 0 && !self.silent {
                println!("Column {}: score {}", column + 1, score);
            }
            scores[column] = Some(score);
        }

        // the board is not full, so at least one column was searched
        let best_score = match scores.iter().flatten().max() {
            Some(&score) => score,
            None => return SearchResult::leaf(0),
        };

        let mut best_columns = [0; WIDTH];
        let mut count = 0;
        for column in 0..WIDTH {
            if scores[column] == Some(best_score) {
                best_columns[count] = column;
                count += 1;
            }
        }

        let result = SearchResult {
            score: best_score,
            column: best_columns[..count].choose(&mut self.rng).copied(),
        };
        if self.memoize {
            self.transposition_table.set(key, result);
        }
        result
    }

    /// Calculates the score and best column of a position for `mover`
    pub fn search(&mut self, board: &Board, mover: Side) -> SearchResult {
        self._search(board, mover, true)
    }

    /// Calculates the score and best column of a position for `mover`, logging the
    /// score of every root column to stdout
    pub fn search_verbose(&mut self, board: &Board, mover: Side) -> SearchResult {
        self._search(board, mover, false)
    }

    fn _search(&mut self, board: &Board, mover: Side, silent: bool) -> SearchResult {
        self.silent = silent;
        self.node_count = 0;
        // cached scores belong to the previous decision's position
        self.transposition_table.clear();

        let mut scratch = *board;
        let result = self.negamax(&mut scratch, mover, 0);

        if !silent {
            match result.column {
                Some(column) => println!(
                    "Best move: {}, score {}, {} positions searched",
                    column + 1,
                    result.score,
                    self.node_count
                ),
                None => println!("No move available, score {}", result.score),
            }
        }
        result
    }

    /// Returns the best column for `mover`, or `None` if the game is already over
    pub fn choose_column(&mut self, board: &Board, mover: Side) -> Option<usize> {
        self.search(board, mover).column
    }

    /// Converts a search score into the number of plies until the game is decided,
    /// if the search proved the outcome within its depth limit
    ///
    /// A positive score means the side to move wins, a negative one that it loses.
    pub fn score_to_win_distance(&self, score: i32) -> Option<usize> {
        let plies = WIN_SCORE - score.abs();
        if plies >= 0 && plies as usize <= self.depth_limit {
            Some(plies as usize)
        } else {
            None
        }
    }
}
