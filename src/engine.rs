//! Turn sequencing and win/tie detection on top of a [`GridState`].

use anyhow::{anyhow, Result};
use log::{debug, info, trace};

use std::fmt;

use crate::{Cell, Error, GridState, Player, DEFAULT_HEIGHT, DEFAULT_WIDTH, WIN_LENGTH};

/// Four consecutive `(row, column)` cells, in the order they were walked.
pub type WinningLine = [(usize, usize); WIN_LENGTH];

/// Line directions as `(row step, column step)`, in the order they are tried
/// from each start cell.
pub const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal, down and right
    (-1, 1), // diagonal, up and right
];

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

impl GameStatus {
    /// `Won` and `Tied` accept no further moves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(player) => write!(f, "{} won", player),
            GameStatus::Tied => write!(f, "tied"),
        }
    }
}

/// What happened when a piece was dropped.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MoveResult {
    pub row: usize,
    pub column: usize,
    pub player: Player,
    pub status: GameStatus,
    /// Present exactly when `status` is `Won`.
    pub winning_cells: Option<WinningLine>,
}

/// Scan the whole grid for a line of four belonging to `player`.
///
/// Start cells are visited row by row from the top, left to right, and each
/// start cell tries [`DIRECTIONS`] in order. The first line found is returned.
pub fn find_winning_line(grid: &GridState, player: Player) -> Option<WinningLine> {
    let target = Cell::from(player);
    for row in 0..grid.height() {
        for column in 0..grid.width() {
            if grid.owner(row, column) != target {
                continue;
            }
            for &direction in DIRECTIONS.iter() {
                if let Some(line) = owned_line(grid, (row, column), direction, target) {
                    return Some(line);
                }
            }
        }
    }
    None
}

/// Check only the lines passing through `(row, column)`.
///
/// Finds a win exactly when [`find_winning_line`] does, provided `player` had
/// no line of four before the piece at `(row, column)` was placed. The cells
/// returned may differ from the full scan.
pub fn winning_line_through(
    grid: &GridState,
    row: usize,
    column: usize,
    player: Player,
) -> Option<WinningLine> {
    let target = Cell::from(player);
    if grid.owner(row, column) != target {
        return None;
    }
    let (row, column) = (row as isize, column as isize);

    for &(dr, dc) in DIRECTIONS.iter() {
        let run = |sign: isize| {
            (1..WIN_LENGTH as isize)
                .take_while(|&k| grid.cell_at(row + sign * dr * k, column + sign * dc * k) == target)
                .count() as isize
        };
        let behind = run(-1);
        let ahead = run(1);
        if (behind + ahead + 1) as usize >= WIN_LENGTH {
            let start = ((row - dr * behind) as usize, (column - dc * behind) as usize);
            return owned_line(grid, start, (dr, dc), target);
        }
    }
    None
}

// the line of WIN_LENGTH cells starting at `start`, if every one holds `target`
fn owned_line(
    grid: &GridState,
    start: (usize, usize),
    (dr, dc): (isize, isize),
    target: Cell,
) -> Option<WinningLine> {
    let mut line = [start; WIN_LENGTH];
    for (step, cell) in line.iter_mut().enumerate().skip(1) {
        let row = start.0 as isize + dr * step as isize;
        let column = start.1 as isize + dc * step as isize;
        // off-board cells read as empty, so a match is always in bounds
        if grid.cell_at(row, column) != target {
            return None;
        }
        *cell = (row as usize, column as usize);
    }
    Some(line)
}

/// A single game session: the grid, whose turn it is and how the game stands.
///
/// The only way to change a game is [`GameEngine::drop_piece`]. Start a new
/// engine to restart.
#[derive(Clone, Debug)]
pub struct GameEngine {
    grid: GridState,
    current_player: Player,
    status: GameStatus,
    winning_line: Option<WinningLine>,
}

impl GameEngine {
    pub fn new(height: usize, width: usize) -> Result<Self, Error> {
        let grid = GridState::new(height, width)?;
        info!("new {}x{} game", height, width);
        Ok(Self::from_parts(grid, Player::One))
    }

    fn from_parts(grid: GridState, current_player: Player) -> Self {
        Self {
            grid,
            current_player,
            status: GameStatus::InProgress,
            winning_line: None,
        }
    }

    /// Continue from an existing grid with `to_move` to play next.
    ///
    /// If the grid already holds a line of four the game starts out won,
    /// with the player who moved last checked first. A full grid without one
    /// starts out tied.
    pub fn with_grid(grid: GridState, to_move: Player) -> Self {
        let mut engine = Self::from_parts(grid, to_move);
        for &player in [to_move.other(), to_move].iter() {
            if let Some(line) = find_winning_line(&engine.grid, player) {
                engine.current_player = player;
                engine.status = GameStatus::Won(player);
                engine.winning_line = Some(line);
                return engine;
            }
        }
        if engine.grid.is_full() {
            engine.status = GameStatus::Tied;
        }
        engine
    }

    /// Play a string of 1-indexed column digits on a new default board,
    /// starting with player one.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut engine = Self::default();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=DEFAULT_WIDTH) => {
                    engine.drop_piece(column - 1)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(engine)
    }

    /// Drop the current player's piece into `column`.
    ///
    /// On error nothing changes: not the grid, the turn, nor the status.
    pub fn drop_piece(&mut self, column: usize) -> Result<MoveResult, Error> {
        if self.status.is_terminal() {
            trace!("rejected move in column {}, game is {}", column, self.status);
            return Err(Error::GameOver {
                status: self.status,
            });
        }
        let row = match self.grid.find_landing_row(column)? {
            Some(row) => row,
            None => {
                trace!("rejected move in column {}, column is full", column);
                return Err(Error::ColumnFull { column });
            }
        };

        let player = self.current_player;
        self.grid.place(row, column, player)?;
        debug!("{} played ({}, {})", player, row, column);

        // a full board that also completes a line is a win
        if let Some(line) = find_winning_line(&self.grid, player) {
            info!("{} won with {:?}", player, line);
            self.status = GameStatus::Won(player);
            self.winning_line = Some(line);
        } else if self.grid.is_full() {
            info!("board full, game tied");
            self.status = GameStatus::Tied;
        } else {
            self.current_player = player.other();
        }

        Ok(MoveResult {
            row,
            column,
            player,
            status: self.status,
            winning_cells: self.winning_line,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// The player to move, or the winner once the game is won.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn cell_owner(&self, row: usize, column: usize) -> Cell {
        self.grid.owner(row, column)
    }

    /// The line that won the game, if it has been won.
    pub fn winning_cells(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// Columns that can still take a piece. Empty once the game is over.
    pub fn playable_columns(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        (0..self.grid.width())
            .filter(|&column| !self.grid.column_full(column))
            .collect()
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }
}

impl Default for GameEngine {
    /// A new game on the standard 6x7 board.
    fn default() -> Self {
        Self::from_parts(
            GridState::blank(DEFAULT_HEIGHT, DEFAULT_WIDTH),
            Player::One,
        )
    }
}
