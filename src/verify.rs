//! Exhaustive cross-check of win detection.
//!
//! Every legal sequence of moves up to a given depth is played out and each
//! placement is checked against the board invariants, the full-board scan and
//! the local check around the placed piece.

use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;

use crate::engine::{find_winning_line, winning_line_through, DIRECTIONS};
use crate::{Cell, Error, GameEngine, GameStatus, MoveResult, Player, WinningLine};

#[derive(Clone, Default, Debug)]
pub struct VerifyReport {
    /// number of placements checked
    pub positions: u64,
    pub wins: u64,
    pub ties: u64,
    /// one line per failed check, naming the 0-indexed moves that led there
    pub mismatches: Vec<String>,
}

impl VerifyReport {
    fn merge(mut self, mut other: Self) -> Self {
        self.positions += other.positions;
        self.wins += other.wins;
        self.ties += other.ties;
        self.mismatches.append(&mut other.mismatches);
        self
    }

    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Check every game of up to `depth` moves on a `height` x `width` board.
///
/// Each opening column is searched on its own rayon task, and `progress` (if
/// given) advances once per finished opening column.
pub fn verify(
    height: usize,
    width: usize,
    depth: usize,
    progress: Option<&ProgressBar>,
) -> Result<VerifyReport, Error> {
    let root = GameEngine::new(height, width)?;
    if depth == 0 {
        return Ok(VerifyReport::default());
    }

    let report = (0..width)
        .into_par_iter()
        .map(|column| {
            let mut report = VerifyReport::default();
            let mut moves = Vec::with_capacity(depth);
            visit(&root, column, depth, &mut moves, &mut report);
            if let Some(progress) = progress {
                progress.inc(1);
            }
            debug!(
                "opening column {} done, {} positions",
                column, report.positions
            );
            report
        })
        .reduce(VerifyReport::default, VerifyReport::merge);

    if !report.is_clean() {
        warn!("{} win detection mismatches", report.mismatches.len());
    }
    Ok(report)
}

// play `column` from `before`, check the result, then recurse while moves remain
fn visit(
    before: &GameEngine,
    column: usize,
    depth: usize,
    moves: &mut Vec<usize>,
    report: &mut VerifyReport,
) {
    let mut after = before.clone();
    moves.push(column);
    match after.drop_piece(column) {
        Ok(result) => {
            check_placement(before, &after, &result, moves, report);
            if !result.status.is_terminal() && depth > 1 {
                for next in 0..after.width() {
                    visit(&after, next, depth - 1, moves, report);
                }
            }
        }
        Err(Error::ColumnFull { .. }) => (),
        Err(err) => report
            .mismatches
            .push(format!("moves {:?}: unexpected error: {}", moves, err)),
    }
    moves.pop();
}

fn check_placement(
    before: &GameEngine,
    after: &GameEngine,
    result: &MoveResult,
    moves: &[usize],
    report: &mut VerifyReport,
) {
    report.positions += 1;
    let mut fail = |reason: String| report.mismatches.push(format!("moves {:?}: {}", moves, reason));

    let grid = after.grid();
    let player = before.current_player();

    if result.player != player {
        fail(format!("{} moved out of turn", result.player));
    }
    if !grid.gravity_holds() {
        fail("piece floating above an empty cell".to_string());
    }
    if grid.occupied() != before.grid().occupied() + 1 {
        fail("placement changed more than one cell".to_string());
    }

    let scanned = find_winning_line(grid, player);
    let local = winning_line_through(grid, result.row, result.column, player);
    if scanned.is_some() != local.is_some() {
        fail(format!(
            "full scan found {:?} but local check found {:?}",
            scanned, local
        ));
    }
    if let Some(line) = local {
        if !line.contains(&(result.row, result.column)) {
            fail(format!("local line {:?} misses the placed piece", line));
        }
    }

    match scanned {
        Some(line) => {
            if !is_line_of(after, &line, player) {
                fail(format!("{:?} is not a line of {}", line, player));
            }
            if result.status != GameStatus::Won(player) || result.winning_cells != Some(line) {
                fail(format!("winning move reported as {:?}", result));
            }
        }
        None if grid.is_full() => {
            if result.status != GameStatus::Tied {
                fail(format!("full board reported as {}", result.status));
            }
        }
        None => {
            if result.status != GameStatus::InProgress || result.winning_cells.is_some() {
                fail(format!("ordinary move reported as {:?}", result));
            }
            if after.current_player() != player.other() {
                fail("turn did not pass to the other player".to_string());
            }
        }
    }

    match result.status {
        GameStatus::Won(_) => report.wins += 1,
        GameStatus::Tied => report.ties += 1,
        GameStatus::InProgress => (),
    }
}

// consecutive cells along one direction, all owned by `player`
fn is_line_of(game: &GameEngine, line: &WinningLine, player: Player) -> bool {
    let owned = line
        .iter()
        .all(|&(row, column)| game.cell_owner(row, column) == Cell::from(player));

    let steps: Vec<(isize, isize)> = line
        .windows(2)
        .map(|pair| {
            (
                pair[1].0 as isize - pair[0].0 as isize,
                pair[1].1 as isize - pair[0].1 as isize,
            )
        })
        .collect();
    let straight = DIRECTIONS
        .iter()
        .any(|&(dr, dc)| steps.iter().all(|&step| step == (dr, dc) || step == (-dr, -dc)))
        && steps.windows(2).all(|pair| pair[0] == pair[1]);

    owned && straight
}
