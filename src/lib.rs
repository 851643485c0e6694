//! A rules engine for the two-player board game 'Connect 4'
//!
//! Pieces are dropped into the columns of a grid and stack up from the
//! bottom. A player wins by lining up four of their pieces horizontally,
//! vertically or diagonally; a full board with no such line is a tie.
//!
//! The engine only tracks the game. Drawing the board and reading input is
//! left to the caller, which feeds columns to [`GameEngine::drop_piece`] and
//! renders the [`MoveResult`] it gets back.
//!
//! # Basic Usage
//!
//! ```
//! use connect4::{GameEngine, GameStatus, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut game = GameEngine::new(6, 7)?;
//! for column in [0, 0, 1, 1, 2, 2].iter() {
//!     game.drop_piece(*column)?;
//! }
//! let result = game.drop_piece(3)?;
//!
//! assert_eq!(result.status, GameStatus::Won(Player::One));
//! assert_eq!(result.winning_cells, Some([(5, 0), (5, 1), (5, 2), (5, 3)]));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod grid;

pub mod engine;

pub mod verify;


pub use engine::{GameEngine, GameStatus, MoveResult, WinningLine};
pub use error::Error;
pub use grid::{Cell, GridState, Player};

/// The width of the standard game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The height of the standard game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

/// The number of aligned pieces needed to win
pub const WIN_LENGTH: usize = 4;

/// The smallest allowed board height or width
pub const MIN_DIMENSION: usize = WIN_LENGTH;

// the standard board is built without going through dimension checks
const_assert!(DEFAULT_WIDTH >= MIN_DIMENSION && DEFAULT_HEIGHT >= MIN_DIMENSION);
// move strings use one digit per column
const_assert!(DEFAULT_WIDTH <= 9);
