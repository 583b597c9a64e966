use anyhow::{anyhow, Context, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use indicatif::ProgressBar;

use std::fs;
use std::io::{stdin, stdout, BufRead, Write};

use connect4_engine::*;

fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.cell(row, column) {
                        Cell::Occupied(Side::Human) => Color::Red,
                        Cell::Occupied(Side::Computer) => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Prints a question and reads one trimmed line of input
///
/// A closed input is an error, so every prompt loop ends with it.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{}", question)?;
    output.flush().context("failed to flush to stdout")?;
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Err(anyhow!("stdin closed"));
    }
    Ok(buffer.trim().to_string())
}

fn ask_yes_no<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    loop {
        match prompt(input, output, question)?.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => writeln!(output, "Unknown answer given")?,
        }
    }
}

fn ask_settings<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<(Side, Difficulty)> {
    let first = if ask_yes_no(input, output, "Does the AI play first? y/n: ")? {
        Side::Computer
    } else {
        Side::Human
    };
    let difficulty = if ask_yes_no(input, output, "Play on hard difficulty? y/n: ")? {
        Difficulty::Hard
    } else {
        Difficulty::Easy
    };
    Ok((first, difficulty))
}

/// What to do once a game has ended
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum AfterGame {
    /// same settings, empty board
    PlayAgain,
    /// choose new settings
    NewGame,
    Exit,
}

fn ask_after_game<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<AfterGame> {
    loop {
        let answer = prompt(input, output, "Play again, new game or exit? p/n/e: ")?;
        match answer.to_lowercase().chars().next() {
            Some('p') => return Ok(AfterGame::PlayAgain),
            Some('n') => return Ok(AfterGame::NewGame),
            Some('e') => return Ok(AfterGame::Exit),
            _ => writeln!(output, "Unknown answer given")?,
        }
    }
}

fn load_game(path: &str) -> Result<(Game, Difficulty)> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))?;
    let record = text.parse::<GameRecord>()?;
    let game = record.replay()?;
    Ok((game, record.difficulty))
}

fn offer_save<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    game: &Game,
    difficulty: Difficulty,
) -> Result<()> {
    let path = prompt(input, output, "Save the game log to (leave blank to skip): ")?;
    if path.is_empty() {
        return Ok(());
    }
    let record = GameRecord::from_game(game, difficulty);
    match fs::write(&path, record.to_string()) {
        Ok(()) => writeln!(output, "Saved {} moves to {}", game.log().len(), path)?,
        Err(err) => writeln!(output, "Failed to save the game: {}", err)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let stdin = stdin();
    let mut input = stdin.lock();
    let mut output = stdout();

    println!("Welcome to Connect 4\n");

    // optionally resume a saved game
    let mut loaded = None;
    while loaded.is_none() {
        let path = prompt(
            &mut input,
            &mut output,
            "Saved game to load (leave blank for a new game): ",
        )?;
        if path.is_empty() {
            break;
        }
        match load_game(&path) {
            Ok(game) => loaded = Some(game),
            Err(err) => println!("Failed to load the game: {:#}", err),
        }
    }

    let (mut game, mut difficulty) = match loaded {
        Some(loaded) => loaded,
        None => {
            let (first, difficulty) = ask_settings(&mut input, &mut output)?;
            (Game::new(first), difficulty)
        }
    };
    let mut opponent = difficulty.opponent();
    println!("Playing against the {} opponent ({})", opponent.name(), difficulty);

    // game loop
    loop {
        display(game.board())?;

        match game.state() {
            GameState::Playing => {
                let column = if game.next_side() == Side::Computer {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_message("AI is thinking...");
                    spinner.enable_steady_tick(100);

                    let chosen = opponent.choose_column(game.board(), Side::Computer);
                    spinner.finish_and_clear();

                    match chosen {
                        Some(column) => {
                            println!("AI plays column {}", column + 1);
                            column
                        }
                        None => {
                            println!("AI has no move left");
                            break;
                        }
                    }
                } else {
                    let answer = prompt(&mut input, &mut output, "Move input > ")?;
                    match answer.parse::<usize>() {
                        Ok(column) if column >= 1 => column - 1,
                        _ => {
                            println!("Invalid number: {}", answer);
                            continue;
                        }
                    }
                };

                if let Err(err) = game.play(column) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            finished => {
                match finished {
                    GameState::Won(Side::Human) => println!("You win!"),
                    GameState::Won(Side::Computer) => println!("You lose!"),
                    _ => println!("It's a draw!"),
                }

                match ask_after_game(&mut input, &mut output)? {
                    // the side that started moves first again
                    AfterGame::PlayAgain => game.reset(),
                    AfterGame::NewGame => {
                        let (first, chosen) = ask_settings(&mut input, &mut output)?;
                        game = Game::new(first);
                        difficulty = chosen;
                        opponent = difficulty.opponent();
                        println!("Playing against the {} opponent ({})", opponent.name(), difficulty);
                    }
                    AfterGame::Exit => break,
                }
            }
        }
    }

    offer_save(&mut input, &mut output, &game, difficulty)
}
