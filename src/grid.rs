use std::fmt;

use crate::{Error, MIN_DIMENSION};

/// One of the two players. Player one always moves first.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opponent.
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1 or 2
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// The contents of one cell: a piece of either player, or nothing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// The contents of a `height` x `width` board.
///
/// Row 0 is the top of the board and row `height - 1` the bottom. Pieces only
/// ever enter a column at its landing row, so no occupied cell has an empty
/// cell below it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GridState {
    cells: Vec<Cell>, // cells are stored row-major, top-to-bottom
    heights: Vec<usize>, // number of pieces stacked in each column
    height: usize,
    width: usize,
    occupied: usize,
}

impl GridState {
    /// Create an empty grid. Both dimensions must be at least four, otherwise
    /// no line of four could ever fit.
    pub fn new(height: usize, width: usize) -> Result<Self, Error> {
        if height < MIN_DIMENSION || width < MIN_DIMENSION {
            return Err(Error::InvalidDimensions { height, width });
        }
        Ok(Self::blank(height, width))
    }

    // callers guarantee the dimensions are valid
    pub(crate) fn blank(height: usize, width: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; height * width],
            heights: vec![0; width],
            height,
            width,
            occupied: 0,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The row a piece dropped into `column` would come to rest on, or `None`
    /// if the column is full.
    pub fn find_landing_row(&self, column: usize) -> Result<Option<usize>, Error> {
        if column >= self.width {
            return Err(Error::InvalidColumn {
                column,
                width: self.width,
            });
        }
        let stacked = self.heights[column];
        if stacked == self.height {
            Ok(None)
        } else {
            Ok(Some(self.height - 1 - stacked))
        }
    }

    /// Put `player`'s piece at `(row, column)`.
    ///
    /// `row` must be the landing row of `column` in the current state, as
    /// returned by [`GridState::find_landing_row`]. Anything else is rejected
    /// and the grid is left as it was.
    pub fn place(&mut self, row: usize, column: usize, player: Player) -> Result<(), Error> {
        match self.find_landing_row(column)? {
            None => return Err(Error::ColumnFull { column }),
            Some(landing) if landing != row => {
                return Err(Error::NotLandingRow {
                    row,
                    column,
                    landing,
                })
            }
            Some(_) => (),
        }
        self.cells[row * self.width + column] = player.into();
        self.heights[column] += 1;
        self.occupied += 1;
        Ok(())
    }

    /// The occupant of a cell. Anything outside the board reads as empty.
    pub fn owner(&self, row: usize, column: usize) -> Cell {
        if row < self.height && column < self.width {
            self.cells[row * self.width + column]
        } else {
            Cell::Empty
        }
    }

    // signed lookup for walking lines off the edge of the board
    pub(crate) fn cell_at(&self, row: isize, column: isize) -> Cell {
        if row < 0 || column < 0 {
            return Cell::Empty;
        }
        self.owner(row as usize, column as usize)
    }

    /// True once every cell holds a piece.
    pub fn is_full(&self) -> bool {
        self.occupied == self.height * self.width
    }

    /// Out of range columns count as full.
    pub fn column_full(&self, column: usize) -> bool {
        self.heights.get(column).map_or(true, |&h| h == self.height)
    }

    /// Number of pieces on the board.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Whether every occupied cell sits on the bottom row or on another
    /// occupied cell.
    pub fn gravity_holds(&self) -> bool {
        (0..self.width).all(|column| {
            let mut seen_empty = false;
            for row in (0..self.height).rev() {
                match (self.owner(row, column).is_empty(), seen_empty) {
                    (true, _) => seen_empty = true,
                    (false, true) => return false,
                    (false, false) => (),
                }
            }
            true
        })
    }
}
