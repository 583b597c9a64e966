use anyhow::{anyhow, Result};

use crate::{board::*, move_log::*, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Side),
    Draw,
}

/// A game in progress: the board, its move log and whose turn it is
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    log: MoveLog,
    first: Side,
    next: Side,
    state: GameState,
}

impl Game {
    pub fn new(first: Side) -> Self {
        Self {
            board: Board::new(),
            log: MoveLog::new(),
            first,
            next: first,
            state: GameState::Playing,
        }
    }

    /// Plays the side to move into a zero-indexed column
    ///
    /// Out-of-range columns, full columns and moves after the game has ended
    /// are rejected with a message suitable for the player.
    pub fn play(&mut self, column: usize) -> Result<Move> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        if column >= WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column + 1,
                WIDTH
            ));
        }
        let side = self.next;
        let row = self
            .board
            .place(column, side)
            .ok_or_else(|| anyhow!("Invalid move, column {} full", column + 1))?;

        let played = Move { side, column, row };
        self.log.push(played);

        self.state = if self.board.check_win(row, column) {
            GameState::Won(side)
        } else if self.board.check_draw() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.next = side.opponent();

        Ok(played)
    }

    pub fn check_win(&self, row: usize, column: usize) -> bool {
        self.board.check_win(row, column)
    }

    pub fn check_draw(&self) -> bool {
        self.board.check_draw()
    }

    /// Empties the board and the move log, handing the first move back to the starting side
    pub fn reset(&mut self) {
        self.board.reset();
        self.log.clear();
        self.next = self.first;
        self.state = GameState::Playing;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    pub fn first_side(&self) -> Side {
        self.first
    }

    pub fn next_side(&self) -> Side {
        self.next
    }

    pub fn state(&self) -> GameState {
        self.state
    }
}
