/*
game.rs

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

//! Manage the status of a Sudoku game in progress.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use super::generator::Puzzle;
use super::grid::{EMPTY, Grid, SIZE};
use super::player_input::PlayerInput;
use crate::saver::game::instant;
use crate::settings::Difficulty;

/// Points for a solved puzzle.
pub const SOLVED_SCORE: i64 = 1000;

/// Type of errors when the player sets a cell.
#[derive(Debug, PartialEq)]
pub enum PlaceError {
    /// The coordinates are outside the grid.
    OutOfRange,

    /// The value is not between 0 and 9.
    InvalidValue,

    /// The cell is a given cell.
    FixedCell,

    /// No cell is selected.
    NoSelection,
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlaceError::OutOfRange => write!(f, "the cell is outside the grid"),
            PlaceError::InvalidValue => write!(f, "the value must be between 0 and 9"),
            PlaceError::FixedCell => write!(f, "the cell is a given cell"),
            PlaceError::NoSelection => write!(f, "no cell is selected"),
        }
    }
}

impl Error for PlaceError {}

/// Manage the status of the game in progress.
#[derive(Serialize, Deserialize, Debug)]
pub struct SudokuGame {
    /// Puzzle being played.
    pub puzzle: Puzzle,

    /// Cells that the player completed.
    pub player_input: PlayerInput,

    /// Selected cell.
    selected_cell: Option<(usize, usize)>,

    /// Whether the player paused the game.
    pub paused: bool,

    /// Whether the puzzle is solved.
    pub solved: bool,

    /// Time when the game started. Used to compute game duration.
    #[serde(with = "instant")]
    start_time: Instant,

    /// The elapsed time when the player paused the game.
    pause_duration: Option<Duration>,
}

impl SudokuGame {
    /// Create a [`SudokuGame`] object for the given puzzle.
    pub fn new(puzzle: Puzzle) -> Self {
        let mut game: SudokuGame = Self {
            puzzle,
            player_input: PlayerInput::new(),
            selected_cell: None,
            paused: false,
            solved: false,
            start_time: Instant::now(),
            pause_duration: None,
        };
        game.init_cells();
        game
    }

    /// Create a game with a random puzzle for the given difficulty level.
    pub fn random(difficulty: Difficulty) -> Self {
        Self::new(Puzzle::generate(difficulty))
    }

    /// Copy the given cells to the player input, and select the first empty cell.
    fn init_cells(&mut self) {
        self.selected_cell = None;
        for y in 0..SIZE {
            for x in 0..SIZE {
                let v: u8 = self.puzzle.givens.get(x, y);
                self.player_input.set_no_undo(x, y, v);
                if v == EMPTY && self.selected_cell.is_none() {
                    self.selected_cell = Some((x, y));
                }
            }
        }
    }

    /// Restart the game: remove the player values, but keep the puzzle and the timer.
    pub fn reset(&mut self) {
        self.player_input.clear();
        self.init_cells();
        self.paused = false;
        if self.solved {
            self.start_time = Instant::now();
            self.solved = false;
        }
    }

    /// Return the current board (given cells and player values).
    pub fn board(&self) -> &Grid {
        self.player_input.values()
    }

    /// Whether the cell is a given cell.
    pub fn is_fixed(&self, x: usize, y: usize) -> bool {
        self.puzzle.is_fixed(x, y)
    }

    /// Change the currently selected cell.
    pub fn set_selected_cell(&mut self, cell: Option<(usize, usize)>) {
        self.selected_cell = cell.filter(|(x, y)| *x < SIZE && *y < SIZE);
    }

    /// Get the coordinates of the selected cell.
    pub fn get_selected_cell(&self) -> Option<(usize, usize)> {
        self.selected_cell
    }

    /// Verify the coordinates of a cell that the player wants to modify.
    fn check_cell(&self, x: usize, y: usize) -> Result<(), PlaceError> {
        if x >= SIZE || y >= SIZE {
            return Err(PlaceError::OutOfRange);
        }
        if self.is_fixed(x, y) {
            return Err(PlaceError::FixedCell);
        }
        Ok(())
    }

    /// Set the value of a cell. A value of 0 clears the cell.
    ///
    /// # Errors
    ///
    /// Given cells cannot be modified. Nothing is changed on error.
    pub fn place(&mut self, x: usize, y: usize, value: u8) -> Result<(), PlaceError> {
        self.check_cell(x, y)?;
        if usize::from(value) > SIZE {
            return Err(PlaceError::InvalidValue);
        }
        self.player_input.set(x, y, value);
        debug!("Cell ({x}, {y}) = {value}");
        Ok(())
    }

    /// Set the value of the selected cell.
    pub fn place_selected(&mut self, value: u8) -> Result<(), PlaceError> {
        let (x, y) = self.selected_cell.ok_or(PlaceError::NoSelection)?;
        self.place(x, y, value)
    }

    /// Set or remove the draft value of a cell.
    ///
    /// Draft values are annotations. They are not used for verifying the solution.
    pub fn set_draft(&mut self, x: usize, y: usize, draft: Option<u8>) -> Result<(), PlaceError> {
        self.check_cell(x, y)?;
        if draft.is_some_and(|v| v == EMPTY || usize::from(v) > SIZE) {
            return Err(PlaceError::InvalidValue);
        }
        self.player_input.set_draft(x, y, draft);
        Ok(())
    }

    /// Return the draft value of a cell.
    pub fn get_draft(&self, x: usize, y: usize) -> Option<u8> {
        self.player_input.get_draft(x, y)
    }

    /// Undo the last cell modification.
    pub fn undo(&mut self) -> Option<(usize, usize)> {
        self.player_input.undo()
    }

    /// Redo the last undone cell modification.
    pub fn redo(&mut self) -> Option<(usize, usize)> {
        self.player_input.redo()
    }

    /// Whether the player entered a value that differs from the solution in the cell.
    pub fn is_cell_error(&self, x: usize, y: usize) -> bool {
        let v: u8 = self.player_input.get_value(x, y);
        v != EMPTY && v != self.puzzle.solution.get(x, y)
    }

    /// Whether the puzzle is successfully solved.
    ///
    /// Any valid grid is accepted, even if it is not the grid that the puzzle has been built
    /// from: carved puzzles might have several solutions.
    pub fn is_solved(&mut self) -> bool {
        // A previous call already established that the puzzle was solved
        if self.solved {
            return true;
        }
        if !self.board().is_complete() || !self.board().is_valid() {
            return false;
        }
        self.solved = true;
        true
    }

    /// Points for the scoreboard.
    pub fn score(&self) -> i64 {
        SOLVED_SCORE
    }

    /// Pause the game.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        // Store the played time so far, so that the pause time can be deduced when the
        // player resumes the game.
        self.pause_duration = Some(self.start_time.elapsed());
        self.paused = true;
    }

    /// Resume the game.
    pub fn resume(&mut self) {
        // Refresh the game elapsed time by removing the pause time.
        if let Some(d) = self.pause_duration {
            self.start_time += self.start_time.elapsed() - d;
            self.pause_duration = None;
        }
        self.paused = false;
    }

    /// Return the game duration.
    pub fn get_duration(&self) -> Duration {
        match self.pause_duration {
            Some(d) => d,
            None => self.start_time.elapsed(),
        }
    }

    /// Return the game duration in hours, minutes, and seconds
    pub fn get_duration_hms(&self) -> (u64, u64, u64) {
        let duration: u64 = self.get_duration().as_secs();
        (
            duration / 3600,
            (duration % 3600) / 60,
            (duration % 3600) % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fill every empty cell with the solution, except the cell at (x, y).
    fn fill_except(game: &mut SudokuGame, skip: (usize, usize)) {
        for y in 0..SIZE {
            for x in 0..SIZE {
                if !game.is_fixed(x, y) && (x, y) != skip {
                    let v = game.puzzle.solution.get(x, y);
                    game.place(x, y, v).unwrap();
                }
            }
        }
    }

    #[test]
    fn fixed_cells_cannot_change() {
        let mut game = SudokuGame::new(Puzzle::sample());
        assert!(game.is_fixed(0, 0));
        assert_eq!(game.place(0, 0, 1), Err(PlaceError::FixedCell));
        assert_eq!(game.board().get(0, 0), 5);
        assert_eq!(game.set_draft(0, 0, Some(1)), Err(PlaceError::FixedCell));
    }

    #[test]
    fn place_and_clear() {
        let mut game = SudokuGame::new(Puzzle::sample());
        game.place(2, 0, 9).unwrap();
        assert_eq!(game.board().get(2, 0), 9);
        assert!(game.is_cell_error(2, 0));

        game.place(2, 0, 0).unwrap();
        assert_eq!(game.board().get(2, 0), EMPTY);
        assert!(!game.is_cell_error(2, 0));
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let mut game = SudokuGame::new(Puzzle::sample());
        assert_eq!(game.place(9, 0, 1), Err(PlaceError::OutOfRange));
        assert_eq!(game.place(2, 0, 10), Err(PlaceError::InvalidValue));
        assert_eq!(game.set_draft(2, 0, Some(0)), Err(PlaceError::InvalidValue));
    }

    #[test]
    fn first_empty_cell_is_selected() {
        let mut game = SudokuGame::new(Puzzle::sample());
        assert_eq!(game.get_selected_cell(), Some((2, 0)));
        game.place_selected(4).unwrap();
        assert_eq!(game.board().get(2, 0), 4);

        game.set_selected_cell(Some((12, 0)));
        assert_eq!(game.place_selected(4), Err(PlaceError::NoSelection));
    }

    #[test]
    fn solving_the_puzzle() {
        let mut game = SudokuGame::new(Puzzle::sample());
        fill_except(&mut game, (2, 0));
        assert!(!game.is_solved());
        game.place(2, 0, 4).unwrap();
        assert!(game.is_solved());
        assert_eq!(game.score(), SOLVED_SCORE);
    }

    #[test]
    fn wrong_values_do_not_solve() {
        let mut game = SudokuGame::new(Puzzle::sample());
        fill_except(&mut game, (2, 0));
        game.place(2, 0, 1).unwrap();
        assert!(game.board().is_complete());
        assert!(!game.is_solved());
    }

    #[test]
    fn drafts_do_not_count() {
        let mut game = SudokuGame::new(Puzzle::sample());
        fill_except(&mut game, (2, 0));
        game.set_draft(2, 0, Some(4)).unwrap();
        assert_eq!(game.get_draft(2, 0), Some(4));
        assert!(!game.is_solved());
    }

    #[test]
    fn undo_restores_the_previous_value() {
        let mut game = SudokuGame::new(Puzzle::sample());
        game.place(2, 0, 4).unwrap();
        game.place(2, 0, 6).unwrap();

        assert_eq!(game.undo(), Some((2, 0)));
        assert_eq!(game.board().get(2, 0), 4);
        assert_eq!(game.undo(), Some((2, 0)));
        assert_eq!(game.board().get(2, 0), EMPTY);
        // Given cells are not in the undo list
        assert_eq!(game.undo(), None);
        assert_eq!(game.board().get(0, 0), 5);

        assert_eq!(game.redo(), Some((2, 0)));
        assert_eq!(game.board().get(2, 0), 4);
    }

    #[test]
    fn reset_keeps_the_puzzle() {
        let mut game = SudokuGame::new(Puzzle::sample());
        game.place(2, 0, 4).unwrap();
        game.reset();
        assert_eq!(game.board(), &game.puzzle.givens);
        assert_eq!(game.player_input.undo_len(), 0);
    }

    #[test]
    fn pause_freezes_the_duration() {
        let mut game = SudokuGame::new(Puzzle::sample());
        game.pause();
        assert!(game.paused);
        let d1 = game.get_duration();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(game.get_duration(), d1);
        game.resume();
        assert!(!game.paused);
        assert!(game.get_duration() < d1 + Duration::from_millis(20));
    }
}
