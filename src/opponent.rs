//! The automated opponent's move selection policies

use anyhow::{anyhow, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use std::{fmt, str::FromStr};

use crate::{board::*, search::*, WIDTH};

/// A policy choosing which column to play
pub trait Opponent {
    /// Picks a column for `side` to play, or `None` when no column has room
    fn choose_column(&mut self, board: &Board, side: Side) -> Option<usize>;

    fn name(&self) -> &str;
}

/// Plays a uniformly random legal column
pub struct RandomOpponent {
    rng: ChaCha8Rng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn choose_column(&mut self, board: &Board, _side: Side) -> Option<usize> {
        // sampling below only terminates if some column has room
        if board.check_draw() {
            return None;
        }
        loop {
            let column = self.rng.gen_range(0..WIDTH);
            if board.is_playable(column) {
                return Some(column);
            }
        }
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Plays the column picked by a negamax search
pub struct SearchOpponent {
    searcher: Searcher,
}

impl SearchOpponent {
    pub fn new() -> Self {
        Self::with_searcher(Searcher::new())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_searcher(Searcher::seeded(seed))
    }

    pub fn with_searcher(searcher: Searcher) -> Self {
        Self { searcher }
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }
}

impl Default for SearchOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for SearchOpponent {
    fn choose_column(&mut self, board: &Board, side: Side) -> Option<usize> {
        self.searcher.choose_column(board, side)
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}

/// How strong the automated opponent plays
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    /// Builds the opponent for this difficulty
    pub fn opponent(self) -> Box<dyn Opponent> {
        match self {
            Difficulty::Easy => Box::new(RandomOpponent::new()),
            Difficulty::Hard => Box::new(SearchOpponent::new()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Easy" => Ok(Difficulty::Easy),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(anyhow!("unknown difficulty '{}'", other)),
        }
    }
}
