use crate::engine::GameStatus;

/// Errors reported by the grid and the game engine.
///
/// None of these leave the game in a different state than before the call
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid board dimensions {height}x{width}, both must be at least {}", crate::MIN_DIMENSION)]
    InvalidDimensions { height: usize, width: usize },

    #[error("Invalid move, column {column} out of range. Columns must be below {width}")]
    InvalidColumn { column: usize, width: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },

    #[error("Invalid move, row {row} in column {column} is not the landing row {landing}")]
    NotLandingRow {
        row: usize,
        column: usize,
        landing: usize,
    },

    #[error("Invalid move, game is over ({status})")]
    GameOver { status: GameStatus },
}
