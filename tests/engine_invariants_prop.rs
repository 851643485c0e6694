//! Property tests for the game engine over arbitrary column sequences.
//!
//! Invariants covered:
//! - No occupied cell ever sits above an empty one.
//! - Rejected moves (full column, bad column, finished game) change nothing.
//! - The turn passes to the other player after every non-terminal move and
//!   stays with the mover on a win.
//! - Won results carry exactly the line the full scan reports, and that line
//!   is also found by the local check around the placed piece.

use connect4::engine::{find_winning_line, winning_line_through};
use connect4::{Error, GameEngine, GameStatus};
use proptest::prelude::*;

fn dims() -> impl Strategy<Value = (usize, usize)> {
    (4usize..=8, 4usize..=9)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn drops_keep_invariants(
        (height, width) in dims(),
        columns in prop::collection::vec(0usize..12, 0..120),
    ) {
        let mut game = GameEngine::new(height, width).unwrap();

        for column in columns {
            let grid_before = game.grid().clone();
            let player = game.current_player();
            let status = game.status();

            match game.drop_piece(column) {
                Ok(result) => {
                    prop_assert_eq!(status, GameStatus::InProgress);
                    prop_assert_eq!(result.player, player);
                    prop_assert_eq!(game.grid().occupied(), grid_before.occupied() + 1);

                    match result.status {
                        GameStatus::InProgress => {
                            prop_assert_eq!(game.current_player(), player.other());
                            prop_assert!(result.winning_cells.is_none());
                        }
                        GameStatus::Won(winner) => {
                            prop_assert_eq!(winner, player);
                            prop_assert_eq!(game.current_player(), player);
                            let line = find_winning_line(game.grid(), player);
                            prop_assert_eq!(result.winning_cells, line);
                            prop_assert!(
                                winning_line_through(game.grid(), result.row, result.column, player)
                                    .is_some()
                            );
                        }
                        GameStatus::Tied => {
                            prop_assert!(game.grid().is_full());
                            prop_assert!(find_winning_line(game.grid(), player).is_none());
                        }
                    }
                }
                Err(err) => {
                    prop_assert_eq!(game.grid(), &grid_before);
                    prop_assert_eq!(game.current_player(), player);
                    prop_assert_eq!(game.status(), status);
                    match err {
                        Error::GameOver { .. } => prop_assert!(status.is_terminal()),
                        Error::InvalidColumn { .. } => prop_assert!(column >= width),
                        Error::ColumnFull { .. } => prop_assert!(grid_before.column_full(column)),
                        Error::InvalidDimensions { .. } | Error::NotLandingRow { .. } => {
                            prop_assert!(false, "unexpected error {}", err)
                        }
                    }
                }
            }
            prop_assert!(game.grid().gravity_holds());
        }
    }

    #[test]
    fn landing_row_is_lowest_empty_cell(
        (height, width) in dims(),
        columns in prop::collection::vec(0usize..9, 0..60),
    ) {
        let mut game = GameEngine::new(height, width).unwrap();
        for column in columns {
            if column >= width || game.is_over() {
                continue;
            }
            let expected = (0..height).rev().find(|&row| game.cell_owner(row, column).is_empty());
            match game.drop_piece(column) {
                Ok(result) => prop_assert_eq!(Some(result.row), expected),
                Err(err) => {
                    prop_assert_eq!(err, Error::ColumnFull { column });
                    prop_assert_eq!(expected, None);
                }
            }
        }
    }
}
