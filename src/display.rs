use anyhow::Result;
use clap::ValueEnum;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4::{Cell, GridState, WinningLine};

/// Piece colors a player can pick from.
#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum PieceColor {
    Red,
    Yellow,
    Green,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl PieceColor {
    pub fn color(self) -> Color {
        match self {
            PieceColor::Red => Color::Red,
            PieceColor::Yellow => Color::Yellow,
            PieceColor::Green => Color::Green,
            PieceColor::Blue => Color::Blue,
            PieceColor::Magenta => Color::Magenta,
            PieceColor::Cyan => Color::Cyan,
            PieceColor::White => Color::White,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Palette {
    pub player_one: Color,
    pub player_two: Color,
}

const BOARD: Color = Color::DarkBlue;
const HIGHLIGHT: Color = Color::Grey;

/// Draw the grid with 1-indexed column numbers above it. Cells in
/// `winning_line` are drawn on a light background.
pub fn draw(grid: &GridState, winning_line: Option<&WinningLine>, palette: &Palette) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=grid.width()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in 0..grid.height() {
        for column in 0..grid.width() {
            let highlighted = winning_line.map_or(false, |line| line.contains(&(row, column)));
            let piece = match grid.owner(row, column) {
                Cell::PlayerOne => palette.player_one,
                Cell::PlayerTwo => palette.player_two,
                Cell::Empty => BOARD,
            };
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(if highlighted { HIGHLIGHT } else { BOARD })
                    .with(piece),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
