//! Static evaluation of positions the search cannot look past
//!
//! Every maximal line of the board (rows, columns and both diagonal
//! directions, corner stubs included) is scanned for runs of one side's
//! pieces. A run scores by its length and by how many of its ends are open,
//! where an empty neighbour counts as open and an opposing piece does not.
//! Lines are scanned left to right and top to bottom, and the far end of a
//! line counts as open while its start does not.

use crate::{board::*, HEIGHT, WIDTH};

/// Score for three in a line with both ends open
pub const THREE_IN_A_ROW_SCORE: i32 = 7;
/// Score for two in a line with both ends open
pub const TWO_IN_A_ROW_SCORE: i32 = 4;

fn run_score(run: usize, open_ends: usize) -> i32 {
    match (run, open_ends) {
        (3, 2) => THREE_IN_A_ROW_SCORE,
        (3, 1) => THREE_IN_A_ROW_SCORE / 2,
        (2, 2) => TWO_IN_A_ROW_SCORE,
        (2, 1) => TWO_IN_A_ROW_SCORE / 2,
        _ => 0,
    }
}

/// Scores the runs of `side` along one line of cells, in scan order
pub fn line_potential<I>(line: I, side: Side) -> i32
where
    I: IntoIterator<Item = Cell>,
{
    let mut score = 0;
    let mut run = 0;
    let mut open_ends = 0;

    for cell in line {
        match cell {
            Cell::Occupied(owner) if owner == side => run += 1,
            Cell::Empty => {
                if run > 0 {
                    score += run_score(run, open_ends + 1);
                    run = 0;
                }
                // this cell can extend the next run
                open_ends = 1;
            }
            Cell::Occupied(_) => {
                if run > 0 {
                    score += run_score(run, open_ends);
                    run = 0;
                }
                open_ends = 0;
            }
        }
    }

    if run > 0 {
        score += run_score(run, open_ends + 1);
    }
    score
}

// cells from (row, column) stepping down the board until the edge
fn diagonal(
    board: &Board,
    row: usize,
    column: usize,
    step: isize,
) -> impl Iterator<Item = Cell> + '_ {
    (0..HEIGHT - row)
        .map(move |i| (row + i, column as isize + step * i as isize))
        .take_while(|&(_, x)| x >= 0 && x < WIDTH as isize)
        .map(move |(y, x)| board.cell(y, x as usize))
}

/// Sums the run scores of `side` over every line of the board
pub fn potential_score(board: &Board, side: Side) -> i32 {
    let mut score = 0;

    // horizontal
    for row in 0..HEIGHT {
        score += line_potential((0..WIDTH).map(|column| board.cell(row, column)), side);
    }

    // vertical
    for column in 0..WIDTH {
        score += line_potential((0..HEIGHT).map(|row| board.cell(row, column)), side);
    }

    // diagonals start on the top row or on the side they lean away from
    for &step in [1isize, -1].iter() {
        for column in 0..WIDTH {
            score += line_potential(diagonal(board, 0, column, step), side);
        }
        let edge = if step > 0 { 0 } else { WIDTH - 1 };
        for row in 1..HEIGHT {
            score += line_potential(diagonal(board, row, edge, step), side);
        }
    }

    score
}

/// Evaluates a position from `side`'s point of view
pub fn evaluate(board: &Board, side: Side) -> i32 {
    potential_score(board, side) - potential_score(board, side.opponent())
}
