//! The saved game format
//!
//! ```text
//! Player plays first
//! Difficulty: Hard
//! Log of moves:
//! PLAYER: column 3, row 5
//! AI: column 3, row 4
//! ```
//!
//! Columns and rows are zero-indexed and row 0 is the top of the board.

use anyhow::{anyhow, Context, Result};

use std::{fmt, str::FromStr};

use crate::{board::*, game::*, move_log::*, opponent::Difficulty};

const MOVES_HEADER: &str = "Log of moves:";
const DIFFICULTY_PREFIX: &str = "Difficulty:";
const FIRST_SUFFIX: &str = " plays first";

/// Everything needed to restore a game: the settings and the moves played
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub first: Side,
    pub difficulty: Difficulty,
    pub moves: Vec<Move>,
}

impl GameRecord {
    pub fn from_game(game: &Game, difficulty: Difficulty) -> Self {
        Self {
            first: game.first_side(),
            difficulty,
            moves: game.log().moves().to_vec(),
        }
    }

    /// Rebuilds the game by playing every recorded move in order
    ///
    /// Fails if a move is out of turn, illegal, or landed on a different row than recorded.
    pub fn replay(&self) -> Result<Game> {
        let mut game = Game::new(self.first);
        for (index, recorded) in self.moves.iter().enumerate() {
            if recorded.side != game.next_side() {
                return Err(anyhow!(
                    "move {} ({}) was played out of turn",
                    index + 1,
                    recorded
                ));
            }
            let played = game
                .play(recorded.column)
                .with_context(|| format!("could not replay move {} ({})", index + 1, recorded))?;
            if played.row != recorded.row {
                return Err(anyhow!(
                    "move {} ({}) should have landed on row {}",
                    index + 1,
                    recorded,
                    played.row
                ));
            }
        }
        Ok(game)
    }
}

fn first_label(side: Side) -> &'static str {
    match side {
        Side::Human => "Player",
        Side::Computer => "AI",
    }
}

fn parse_move(line: &str) -> Result<Move> {
    let (side, placement) = line.split_once(':').ok_or_else(|| anyhow!("missing ':'"))?;
    let side = Side::from_label(side.trim())?;
    let (column, row) =
        placement.split_once(',').ok_or_else(|| anyhow!("missing ',' between column and row"))?;

    Ok(Move {
        side,
        column: parse_field(column, "column")?,
        row: parse_field(row, "row")?,
    })
}

// parses "<name> <number>"
fn parse_field(text: &str, name: &str) -> Result<usize> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(label), Some(value), None) if label == name => value
            .parse::<usize>()
            .with_context(|| format!("invalid {} number '{}'", name, value)),
        _ => Err(anyhow!("expected '{} <number>', found '{}'", name, text.trim())),
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", first_label(self.first), FIRST_SUFFIX)?;
        writeln!(f, "{} {}", DIFFICULTY_PREFIX, self.difficulty)?;
        writeln!(f, "{}", MOVES_HEADER)?;
        for recorded in self.moves.iter() {
            writeln!(f, "{}", recorded)?;
        }
        Ok(())
    }
}

impl FromStr for GameRecord {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut first = None;
        let mut difficulty = None;
        let mut moves = Vec::new();
        let mut in_moves = false;

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let number = number + 1;

            if in_moves {
                let parsed =
                    parse_move(line).with_context(|| format!("line {}: bad move '{}'", number, line))?;
                moves.push(parsed);
            } else if line == MOVES_HEADER {
                in_moves = true;
            } else if let Some(label) = line.strip_prefix(DIFFICULTY_PREFIX) {
                let parsed = label
                    .parse::<Difficulty>()
                    .with_context(|| format!("line {}", number))?;
                difficulty = Some(parsed);
            } else if let Some(label) = line.strip_suffix(FIRST_SUFFIX) {
                first = Some(match label {
                    "Player" => Side::Human,
                    "AI" => Side::Computer,
                    other => return Err(anyhow!("line {}: unknown first player '{}'", number, other)),
                });
            } else {
                return Err(anyhow!("line {}: unexpected '{}'", number, line));
            }
        }

        if !in_moves {
            return Err(anyhow!("missing '{}' section", MOVES_HEADER));
        }
        Ok(Self {
            first: first.ok_or_else(|| anyhow!("missing who plays first"))?,
            difficulty: difficulty.ok_or_else(|| anyhow!("missing difficulty"))?,
            moves,
        })
    }
}
