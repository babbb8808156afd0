/*
minesweeper.rs

Copyright 2025 Hervé Quatremain

This file is part of CoffeePause.

CoffeePause is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

CoffeePause is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
CoffeePause. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Minesweeper engine.

use log::debug;
use rand::Rng;
use rand::seq::index;
use std::time::{Duration, Instant};

use crate::settings::MinesweeperSettings;

/// Points for a cleared board.
pub const WON_SCORE: i64 = 1000;

/// Status of the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Board cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,

    /// Number of mines in the eight neighbour cells.
    pub adjacent: u8,
}

/// Minesweeper board.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    mine_count: usize,

    /// Cells, row by row.
    cells: Vec<Cell>,

    /// Number of revealed cells that are not mines.
    revealed: usize,
    flags: usize,
    outcome: Outcome,
    start_time: Instant,

    /// Game duration, set when the game ends.
    end_duration: Option<Duration>,
}

impl Board {
    /// Create a board with mines at random positions.
    pub fn new(settings: &MinesweeperSettings) -> Self {
        Self::new_with(settings, &mut rand::rng())
    }

    /// Create a board with mines at random positions, by using the given random number
    /// generator.
    pub fn new_with<R: Rng + ?Sized>(settings: &MinesweeperSettings, rng: &mut R) -> Self {
        let settings: MinesweeperSettings = settings.sanitized();
        let width: usize = settings.grid_width;
        let num_cells: usize = width * settings.grid_height;

        let mines: Vec<(usize, usize)> = index::sample(rng, num_cells, settings.mine_count)
            .into_iter()
            .map(|i| (i % width, i / width))
            .collect();
        Self::with_mines(width, settings.grid_height, &mines)
    }

    /// Create a board with mines at the given positions.
    ///
    /// Positions outside the board are ignored, and so are duplicated positions.
    pub fn with_mines(width: usize, height: usize, mines: &[(usize, usize)]) -> Self {
        let mut board: Board = Self {
            width,
            height,
            mine_count: 0,
            cells: vec![Cell::default(); width * height],
            revealed: 0,
            flags: 0,
            outcome: Outcome::Playing,
            start_time: Instant::now(),
            end_duration: None,
        };

        for &(x, y) in mines {
            if let Some(i) = board.index(x, y)
                && !board.cells[i].mine
            {
                board.cells[i].mine = true;
                board.mine_count += 1;
            }
        }
        for y in 0..height {
            for x in 0..width {
                let count: usize = board
                    .neighbours(x, y)
                    .into_iter()
                    .filter(|&(nx, ny)| board.cells[ny * width + nx].mine)
                    .count();
                board.cells[y * width + x].adjacent = count as u8;
            }
        }
        debug!(
            "Minesweeper board {width}x{height} with {} mines",
            board.mine_count
        );
        board
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Return the coordinates of the neighbour cells (up to eight).
    fn neighbours(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut ret: Vec<(usize, usize)> = Vec::with_capacity(8);
        for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(self.width - 1) {
                if (nx, ny) != (x, y) {
                    ret.push((nx, ny));
                }
            }
        }
        ret
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Number of mines minus the number of flags. Negative when the player put too many flags.
    pub fn mines_remaining(&self) -> i64 {
        self.mine_count as i64 - self.flags as i64
    }

    /// Points for the scoreboard: [`WON_SCORE`] for a cleared board, 0 otherwise.
    pub fn score(&self) -> i64 {
        match self.outcome {
            Outcome::Won => WON_SCORE,
            _ => 0,
        }
    }

    /// Return the game duration. The timer stops when the game ends.
    pub fn get_duration(&self) -> Duration {
        self.end_duration.unwrap_or_else(|| self.start_time.elapsed())
    }

    fn end(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        self.end_duration = Some(self.start_time.elapsed());
        debug!("Minesweeper game over: {outcome:?}");
    }

    /// Reveal a cell.
    ///
    /// Flagged and already revealed cells are ignored, as well as any cell after the game
    /// ended. Revealing a mine loses the game and reveals all the mines. Revealing a cell
    /// without adjacent mines also reveals its neighbours, recursively.
    pub fn reveal(&mut self, x: usize, y: usize) -> Outcome {
        let Some(i) = self.index(x, y) else {
            return self.outcome;
        };
        if self.outcome != Outcome::Playing || self.cells[i].revealed || self.cells[i].flagged {
            return self.outcome;
        }

        if self.cells[i].mine {
            for cell in self.cells.iter_mut().filter(|c| c.mine) {
                cell.revealed = true;
            }
            self.end(Outcome::Lost);
            return self.outcome;
        }

        let mut work: Vec<(usize, usize)> = vec![(x, y)];
        while let Some((cx, cy)) = work.pop() {
            let i: usize = cy * self.width + cx;
            let cell: &mut Cell = &mut self.cells[i];
            if cell.revealed || cell.flagged || cell.mine {
                continue;
            }
            cell.revealed = true;
            self.revealed += 1;
            if cell.adjacent == 0 {
                work.extend(self.neighbours(cx, cy));
            }
        }

        if self.revealed == self.cells.len() - self.mine_count {
            self.end(Outcome::Won);
        }
        self.outcome
    }

    /// Put or remove a flag on an unrevealed cell.
    ///
    /// Return whether the cell is now flagged.
    pub fn toggle_flag(&mut self, x: usize, y: usize) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        let cell: &mut Cell = &mut self.cells[i];
        if self.outcome != Outcome::Playing || cell.revealed {
            return cell.flagged;
        }
        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flags += 1;
        } else {
            self.flags -= 1;
        }
        cell.flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Difficulty, MAX_GRID_SIZE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn revealed_count(board: &Board) -> usize {
        let mut n = 0;
        for y in 0..board.height() {
            for x in 0..board.width() {
                if board.cell(x, y).unwrap().revealed {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn random_boards_have_the_requested_mines() {
        for difficulty in Difficulty::levels() {
            let settings = MinesweeperSettings::for_difficulty(difficulty);
            let board = Board::new_with(&settings, &mut StdRng::seed_from_u64(4));
            assert_eq!(board.width(), settings.grid_width);
            assert_eq!(board.height(), settings.grid_height);
            assert_eq!(board.mine_count(), settings.mine_count);
            assert_eq!(board.mines_remaining(), settings.mine_count as i64);
        }
    }

    #[test]
    fn too_many_mines_leave_a_safe_cell() {
        let settings = MinesweeperSettings {
            grid_width: 2,
            grid_height: 2,
            mine_count: 9,
        };
        let board = Board::new_with(&settings, &mut StdRng::seed_from_u64(1));
        assert_eq!(board.mine_count(), 3);
    }

    #[test]
    fn oversized_settings_give_a_bounded_board() {
        let settings = MinesweeperSettings {
            grid_width: 100_000,
            grid_height: 100_000,
            mine_count: 15,
        };
        let board = Board::new_with(&settings, &mut StdRng::seed_from_u64(2));
        assert_eq!((board.width(), board.height()), (MAX_GRID_SIZE, MAX_GRID_SIZE));
        assert_eq!(board.mine_count(), 15);
    }

    #[test]
    fn adjacent_counts() {
        // * 2 *
        // 1 2 1
        // 0 0 0
        let board = Board::with_mines(3, 3, &[(0, 0), (2, 0), (2, 0), (7, 7)]);
        assert_eq!(board.mine_count(), 2);
        let counts: Vec<u8> = (0..3)
            .flat_map(|y| (0..3).map(move |x| (x, y)))
            .map(|(x, y)| board.cell(x, y).unwrap().adjacent)
            .collect();
        assert_eq!(counts, vec![0, 2, 0, 1, 2, 1, 0, 0, 0]);
    }

    #[test]
    fn flood_fill_stops_at_numbers() {
        // Mine in the bottom right corner of a 5x5 board
        let mut board = Board::with_mines(5, 5, &[(4, 4)]);
        assert_eq!(board.reveal(0, 0), Outcome::Won);
        assert_eq!(revealed_count(&board), 24);
        assert!(!board.cell(4, 4).unwrap().revealed);
        assert_eq!(board.score(), WON_SCORE);
    }

    #[test]
    fn flood_fill_does_not_cross_a_wall_of_mines() {
        // Column of mines at x = 2
        let mut board = Board::with_mines(5, 3, &[(2, 0), (2, 1), (2, 2)]);
        assert_eq!(board.reveal(0, 1), Outcome::Playing);
        assert_eq!(revealed_count(&board), 6);
        assert!(board.cell(1, 2).unwrap().revealed);
        assert!(!board.cell(3, 0).unwrap().revealed);

        assert_eq!(board.reveal(4, 0), Outcome::Won);
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut board = Board::with_mines(3, 3, &[(0, 0)]);
        board.reveal(1, 1);
        assert_eq!(revealed_count(&board), 1);
    }

    #[test]
    fn revealing_a_mine_loses() {
        let mut board = Board::with_mines(4, 4, &[(0, 0), (3, 3)]);
        assert_eq!(board.reveal(3, 3), Outcome::Lost);
        assert!(board.cell(0, 0).unwrap().revealed);
        assert!(board.cell(3, 3).unwrap().revealed);
        assert_eq!(board.score(), 0);

        // The game is over
        assert_eq!(board.reveal(1, 2), Outcome::Lost);
        assert!(!board.cell(1, 2).unwrap().revealed);
        assert!(!board.toggle_flag(1, 2));
    }

    #[test]
    fn flags() {
        let mut board = Board::with_mines(3, 3, &[(0, 0)]);
        assert!(board.toggle_flag(0, 0));
        assert!(board.toggle_flag(2, 2));
        assert_eq!(board.mines_remaining(), -1);

        // Flagged cells cannot be revealed
        assert_eq!(board.reveal(0, 0), Outcome::Playing);
        assert!(!board.cell(0, 0).unwrap().revealed);

        assert!(!board.toggle_flag(2, 2));
        assert_eq!(board.mines_remaining(), 0);

        // Revealed cells cannot be flagged
        board.reveal(1, 1);
        assert!(!board.toggle_flag(1, 1));
        assert_eq!(board.mines_remaining(), 0);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = Board::with_mines(4, 1, &[(3, 0)]);
        board.toggle_flag(1, 0);
        board.reveal(0, 0);
        assert!(!board.cell(1, 0).unwrap().revealed);
        assert_eq!(board.outcome(), Outcome::Playing);

        board.toggle_flag(1, 0);
        assert_eq!(board.reveal(1, 0), Outcome::Won);
        assert!(board.cell(2, 0).unwrap().revealed);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut board = Board::with_mines(2, 2, &[(0, 0)]);
        assert_eq!(board.reveal(5, 5), Outcome::Playing);
        assert!(!board.toggle_flag(2, 0));
        assert!(board.cell(2, 0).is_none());
    }
}
