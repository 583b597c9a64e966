//! Rules engine and automated opponent for the board game 'Connect 4'
//!
//! The board model applies gravity placement and detects wins and draws.
//! The automated opponent either plays uniformly at random or runs a
//! depth-limited negamax search over a heuristic evaluation.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{board::*, opponent::*};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // the computer has three in the bottom row, column 4 completes it
//! let board = Board::from_moves(Side::Computer, "112233")?;
//! let mut opponent = SearchOpponent::seeded(7);
//!
//! assert_eq!(opponent.choose_column(&board, Side::Computer), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod move_log;

pub mod game;

pub mod heuristic;

pub mod transposition_table;

pub mod search;

pub mod opponent;

pub mod record;


pub use board::{Board, Cell, Side};
pub use game::{Game, GameState};
pub use move_log::{Move, MoveLog};
pub use opponent::{Difficulty, Opponent, RandomOpponent, SearchOpponent};
pub use record::GameRecord;
pub use search::{SearchResult, Searcher};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const CONNECT: usize = 4;

/// The number of plies the search looks ahead before falling back to the heuristic
pub const DEPTH_LIMIT: usize = 7;

// a win must fit on the board in both directions
const_assert!(WIDTH >= CONNECT && HEIGHT >= CONNECT);
// ensure that the given dimensions fit in a u128 at two bits per tile for the search key
const_assert!(WIDTH * HEIGHT * 2 <= 128);
// column numbers are written and read as single digits
const_assert!(WIDTH <= 9);
