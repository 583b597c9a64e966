use anyhow::{anyhow, Result};

use std::fmt;

use crate::{CONNECT, HEIGHT, WIDTH};

/// One of the two participants in a game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    /// The label used for this side in saved move logs
    pub fn label(self) -> &'static str {
        match self {
            Side::Human => "PLAYER",
            Side::Computer => "AI",
        }
    }

    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "PLAYER" => Ok(Side::Human),
            "AI" => Ok(Side::Computer),
            _ => Err(anyhow!("unknown side '{}'", label)),
        }
    }

    fn symbol(self) -> char {
        match self {
            Side::Human => 'X',
            Side::Computer => 'O',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Occupied(Side),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    // two bits per cell in the packed search key
    fn bits(self) -> u128 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(Side::Human) => 1,
            Cell::Occupied(Side::Computer) => 2,
        }
    }
}

// (row, column) steps for the horizontal, vertical and both diagonal directions
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A Connect 4 grid with gravity placement
///
/// Row 0 is the top row, so pieces land on the highest free row index of a column.
/// The board is a plain value: it can be copied, compared and hashed, and has no
/// memory of the moves that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Builds a board by dropping pieces into the given one-indexed columns,
    /// alternating sides starting with `first`
    pub fn from_moves<S: AsRef<str>>(first: Side, moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut side = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let column = column - 1;
                    let row = board
                        .place(column, side)
                        .ok_or_else(|| anyhow!("Invalid move, column {} full", column + 1))?;
                    // abort if the position is won at any point
                    if board.check_win(row, column) {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    side = side.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a board from a top-to-bottom diagram, one string per row.
    ///
    /// `X` is the human side, `O` the computer side and `.` an empty cell.
    /// Floating pieces are rejected.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        if rows.len() != HEIGHT {
            return Err(anyhow!("expected {} rows, found {}", HEIGHT, rows.len()));
        }
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != WIDTH {
                return Err(anyhow!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    WIDTH
                ));
            }
            for (column, symbol) in symbols.into_iter().enumerate() {
                board.cells[row][column] = match symbol {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::Occupied(Side::Human),
                    'O' | 'o' => Cell::Occupied(Side::Computer),
                    other => return Err(anyhow!("unknown cell symbol '{}'", other)),
                };
            }
        }
        for row in 0..HEIGHT - 1 {
            for column in 0..WIDTH {
                if !board.cells[row][column].is_empty() && board.cells[row + 1][column].is_empty() {
                    return Err(anyhow!(
                        "floating piece at row {}, column {}",
                        row,
                        column
                    ));
                }
            }
        }
        Ok(board)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Returns the row a piece dropped into `column` would land on, or `None` if the column is full
    pub fn find_open_row(&self, column: usize) -> Option<usize> {
        assert!(column < WIDTH, "column {} out of range", column);
        (0..HEIGHT)
            .rev()
            .find(|&row| self.cells[row][column].is_empty())
    }

    pub fn is_playable(&self, column: usize) -> bool {
        self.find_open_row(column).is_some()
    }

    /// Drops a piece for `side` into `column`, returning the landing row.
    ///
    /// A full column leaves the board untouched and returns `None`.
    pub fn place(&mut self, column: usize, side: Side) -> Option<usize> {
        let row = self.find_open_row(column)?;
        self.cells[row][column] = Cell::Occupied(side);
        Some(row)
    }

    /// Takes back the top piece of a column placed at `row`
    pub(crate) fn undo(&mut self, row: usize, column: usize) {
        debug_assert!(row == 0 || self.cells[row - 1][column].is_empty());
        self.cells[row][column] = Cell::Empty;
    }

    /// Checks whether the piece at `(row, column)` is part of four or more in a line
    pub fn check_win(&self, row: usize, column: usize) -> bool {
        let side = match self.cells[row][column] {
            Cell::Empty => return false,
            Cell::Occupied(side) => side,
        };

        DIRECTIONS.iter().any(|&(dy, dx)| {
            let run = 1
                + self.run_length(row, column, dy, dx, side)
                + self.run_length(row, column, -dy, -dx, side);
            run >= CONNECT
        })
    }

    // number of consecutive `side` pieces stepping away from (row, column), excluding it
    fn run_length(&self, row: usize, column: usize, dy: isize, dx: isize, side: Side) -> usize {
        let mut run = 0;
        let mut y = row as isize + dy;
        let mut x = column as isize + dx;
        while y >= 0
            && y < HEIGHT as isize
            && x >= 0
            && x < WIDTH as isize
            && self.cells[y as usize][x as usize] == Cell::Occupied(side)
        {
            run += 1;
            y += dy;
            x += dx;
        }
        run
    }

    /// Checks every occupied cell for a completed line of four
    pub fn has_four(&self) -> bool {
        (0..HEIGHT).any(|row| (0..WIDTH).any(|column| self.check_win(row, column)))
    }

    pub fn check_draw(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; WIDTH]; HEIGHT];
    }

    /// Returns the number of occupied cells
    pub fn num_moves(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// Returns a unique key for the position, two bits per cell
    pub fn key(&self) -> u128 {
        self.cells
            .iter()
            .flatten()
            .fold(0, |key, cell| (key << 2) | cell.bits())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row.iter() {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(side) => side.symbol(),
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        let columns: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        write!(f, "{}", columns)
    }
}
