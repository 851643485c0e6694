use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::info;

use std::io::{stdin, stdout, Stdin, Write};
use std::time::Instant;

use connect4::*;

mod display;
use display::*;

/// Play Connect 4 against another person in the terminal.
#[derive(Parser)]
#[command(name = "connect4", about = "Two-player Connect 4 in the terminal")]
struct Cli {
    /// Number of rows on the board
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    #[arg(long, value_enum, default_value_t = PieceColor::Red)]
    player_one_color: PieceColor,

    #[arg(long, value_enum, default_value_t = PieceColor::Yellow)]
    player_two_color: PieceColor,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Check win detection on every game up to a number of moves
    Verify {
        #[arg(long, default_value_t = 8)]
        depth: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Some(Command::Verify { depth }) = cli.command {
        return run_verify(cli.height, cli.width, depth);
    }

    let palette = Palette {
        player_one: cli.player_one_color.color(),
        player_two: cli.player_two_color.color(),
    };
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    loop {
        let mut game = GameEngine::new(cli.height, cli.width)?;
        if !play(&mut game, &palette, &stdin)? {
            break;
        }
        match ask(&stdin, "Play again? y/n: ")? {
            Some(true) => info!("restarting"),
            _ => break,
        }
    }
    Ok(())
}

// returns false if input ran out before the game finished
fn play(game: &mut GameEngine, palette: &Palette, stdin: &Stdin) -> Result<bool> {
    loop {
        draw(game.grid(), game.winning_cells().as_ref(), palette)?;

        match game.status() {
            GameStatus::InProgress => {
                print!("{} move input > ", game.current_player());
                stdout().flush()?;
                let mut input_str = String::new();
                if stdin.read_line(&mut input_str)? == 0 {
                    return Ok(false);
                }

                let column_one_indexed = match input_str.trim().parse::<usize>() {
                    Err(_) => {
                        println!("Invalid number: {}", input_str.trim());
                        continue;
                    }
                    Ok(column) => column,
                };
                if column_one_indexed < 1 || column_one_indexed > game.width() {
                    println!(
                        "Invalid move, column {} out of range. Columns must be between 1 and {}",
                        column_one_indexed,
                        game.width()
                    );
                    continue;
                }

                if let Err(err) = game.drop_piece(column_one_indexed - 1) {
                    match err {
                        Error::ColumnFull { .. } => {
                            println!("Invalid move, column {} full", column_one_indexed)
                        }
                        err => println!("{}", err),
                    }
                    // try the move again
                    continue;
                }
            }

            // end states
            GameStatus::Won(player) => {
                println!("{} wins!", player);
                return Ok(true);
            }
            GameStatus::Tied => {
                println!("Draw!");
                return Ok(true);
            }
        }
    }
}

// Some(answer), or None once stdin is closed
fn ask(stdin: &Stdin, prompt: &str) -> Result<Option<bool>> {
    loop {
        print!("{}", prompt);
        stdout().flush()?;

        let mut buffer = String::new();
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(Some(true)),
            Some('n') => return Ok(Some(false)),
            _ => println!("Unknown answer given"),
        }
    }
}

fn run_verify(height: usize, width: usize, depth: usize) -> Result<()> {
    let start = Instant::now();

    let progress = ProgressBar::new(width as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Verifying opening columns: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );
    let report = verify::verify(height, width, depth, Some(&progress))?;
    progress.finish();

    println!(
        "Checked {} positions ({} wins, {} draws) to depth {} in {}",
        report.positions,
        report.wins,
        report.ties,
        depth,
        HumanDuration(start.elapsed())
    );
    for mismatch in report.mismatches.iter() {
        println!("{}", mismatch);
    }
    if report.is_clean() {
        Ok(())
    } else {
        Err(anyhow!("{} mismatches found", report.mismatches.len()))
    }
}
