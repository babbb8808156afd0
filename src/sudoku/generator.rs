/*
generator.rs

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

//! Generate random Sudoku puzzles.
//!
//! A solved grid is built first: the three boxes on the diagonal are independent, so they are
//! filled with random permutations of 1 to 9. The other cells are then completed by a
//! backtracking search that tries the values in a random order for each cell.
//!
//! The puzzle is obtained by clearing random cells from the solved grid. The number of cleared
//! cells depends on the difficulty level. The uniqueness of the solution is not verified.

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::grid::{BOX_SIZE, EMPTY, Grid, NUM_CELLS, SIZE};
use crate::settings::Difficulty;

/// Cell values.
const DIGITS: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Puzzle that is used when generating a random puzzle fails.
const SAMPLE_PUZZLE: [[u8; SIZE]; SIZE] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// Solution of [`SAMPLE_PUZZLE`].
const SAMPLE_SOLUTION: [[u8; SIZE]; SIZE] = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GenerateError {
    /// The backtracking search exhausted all the candidates.
    DeadEnd,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerateError::DeadEnd => write!(f, "no value fits the grid"),
        }
    }
}

impl Error for GenerateError {}

/// Number of cells to clear from the solved grid.
pub fn removal_budget(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 35,
        Difficulty::Medium => 40,
        Difficulty::Hard => 50,
    }
}

/// Generate a solved grid.
///
/// # Errors
///
/// The method returns [`GenerateError::DeadEnd`] if the search fails, which cannot happen for a
/// 9x9 grid once the diagonal boxes are filled.
pub fn generate_solution<R: Rng + ?Sized>(rng: &mut R) -> Result<Grid, GenerateError> {
    let start: Instant = Instant::now();
    let mut grid: Grid = Grid::new();

    // The diagonal boxes do not share rows or columns
    for b in 0..BOX_SIZE {
        let mut values: [u8; SIZE] = DIGITS;
        values.shuffle(rng);
        for (i, v) in values.iter().enumerate() {
            grid.set(
                b * BOX_SIZE + i % BOX_SIZE,
                b * BOX_SIZE + i / BOX_SIZE,
                *v,
            );
        }
    }

    // Work list of the remaining cells. For each cell, `tried[pos]` is the number of
    // candidates from `candidates[pos]` that have already been tried.
    let empties: Vec<(usize, usize)> = grid.empty_cells();
    let mut candidates: Vec<[u8; SIZE]> = Vec::with_capacity(empties.len());
    for _ in 0..empties.len() {
        let mut values: [u8; SIZE] = DIGITS;
        values.shuffle(rng);
        candidates.push(values);
    }
    let mut tried: Vec<usize> = vec![0; empties.len()];
    let mut iteration: usize = 0;
    let mut pos: usize = 0;

    while pos < empties.len() {
        iteration += 1;
        let (x, y) = empties[pos];
        grid.set(x, y, EMPTY);

        let next = candidates[pos][tried[pos]..]
            .iter()
            .position(|v| grid.can_place(x, y, *v));
        match next {
            Some(offset) => {
                let value: u8 = candidates[pos][tried[pos] + offset];
                tried[pos] += offset + 1;
                grid.set(x, y, value);
                pos += 1;
            }
            None => {
                // Back to the previous cell, which tries its next candidate
                tried[pos] = 0;
                if pos == 0 {
                    return Err(GenerateError::DeadEnd);
                }
                pos -= 1;
            }
        }
    }

    debug!(
        "Iterations = {iteration}  Duration = {}",
        start.elapsed().as_secs_f32()
    );
    Ok(grid)
}

/// Clear `budget` distinct random cells from the given grid.
pub fn carve<R: Rng + ?Sized>(solution: &Grid, budget: usize, rng: &mut R) -> Grid {
    let mut indices: Vec<usize> = (0..NUM_CELLS).collect();
    indices.shuffle(rng);

    let mut puzzle: Grid = *solution;
    for i in indices.into_iter().take(budget) {
        puzzle.set(i % SIZE, i / SIZE, EMPTY);
    }
    puzzle
}

/// Sudoku puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Cells provided at the beginning of the game. The other cells are empty.
    pub givens: Grid,

    /// Solved grid that the puzzle has been built from.
    pub solution: Grid,
}

impl Puzzle {
    /// Built-in puzzle.
    pub fn sample() -> Self {
        Self {
            givens: Grid::from_rows(SAMPLE_PUZZLE),
            solution: Grid::from_rows(SAMPLE_SOLUTION),
        }
    }

    /// Generate a random puzzle for the given difficulty level with the provided random number
    /// generator.
    pub fn generate_with<R: Rng + ?Sized>(
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Self, GenerateError> {
        let solution: Grid = generate_solution(rng)?;
        let givens: Grid = carve(&solution, removal_budget(difficulty), rng);
        Ok(Self { givens, solution })
    }

    /// Generate a random puzzle for the given difficulty level.
    ///
    /// If generating the puzzle fails, then the built-in puzzle is returned.
    pub fn generate(difficulty: Difficulty) -> Self {
        match Self::generate_with(difficulty, &mut rand::rng()) {
            Ok(p) => p,
            Err(error) => {
                warn!("Cannot generate a Sudoku puzzle ({error}): using the built-in puzzle");
                Self::sample()
            }
        }
    }

    /// Whether the cell is a given (fixed) cell.
    pub fn is_fixed(&self, x: usize, y: usize) -> bool {
        self.givens.get(x, y) != EMPTY
    }
}
