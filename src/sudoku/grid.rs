/*
grid.rs

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

//! 9x9 Sudoku grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows and columns.
pub const SIZE: usize = 9;

/// Width and height of a box.
pub const BOX_SIZE: usize = 3;

/// Number of cells in the grid.
pub const NUM_CELLS: usize = SIZE * SIZE;

/// Value of an empty cell.
pub const EMPTY: u8 = 0;

/// Sudoku grid.
///
/// Cells are addressed by their column (`x`) and row (`y`), from 0 to 8. A cell value is 0 for
/// an empty cell, or 1 to 9.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    /// Rows of the grid.
    cells: [[u8; SIZE]; SIZE],
}

impl Grid {
    /// Create an empty [`Grid`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`Grid`] object from its rows.
    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> Self {
        Self { cells: rows }
    }

    /// Return the rows of the grid.
    pub fn rows(&self) -> &[[u8; SIZE]; SIZE] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.cells[y][x] = value;
    }

    /// Whether the value can be set in the cell without duplicating it in the row, the column,
    /// or the box of the cell. The current value of the cell itself is ignored.
    pub fn can_place(&self, x: usize, y: usize, value: u8) -> bool {
        for i in 0..SIZE {
            if i != x && self.cells[y][i] == value {
                return false;
            }
            if i != y && self.cells[i][x] == value {
                return false;
            }
        }
        let bx: usize = x - x % BOX_SIZE;
        let by: usize = y - y % BOX_SIZE;
        for cy in by..by + BOX_SIZE {
            for cx in bx..bx + BOX_SIZE {
                if (cx, cy) != (x, y) && self.cells[cy][cx] == value {
                    return false;
                }
            }
        }
        true
    }

    /// Return the coordinates of the empty cells, row by row.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut ret: Vec<(usize, usize)> = Vec::new();
        for y in 0..SIZE {
            for x in 0..SIZE {
                if self.cells[y][x] == EMPTY {
                    ret.push((x, y));
                }
            }
        }
        ret
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|v| **v == EMPTY).count()
    }

    /// Whether all the cells have a value.
    pub fn is_complete(&self) -> bool {
        self.empty_count() == 0
    }

    /// Whether the grid is a solved Sudoku: every row, column, and box contains the values 1 to
    /// 9 exactly once.
    pub fn is_valid(&self) -> bool {
        for i in 0..SIZE {
            if !is_permutation(self.row(i)) || !is_permutation(self.column(i)) {
                return false;
            }
        }
        for by in (0..SIZE).step_by(BOX_SIZE) {
            for bx in (0..SIZE).step_by(BOX_SIZE) {
                if !is_permutation(self.box_values(bx, by)) {
                    return false;
                }
            }
        }
        true
    }

    fn row(&self, y: usize) -> impl Iterator<Item = u8> + '_ {
        self.cells[y].iter().copied()
    }

    fn column(&self, x: usize) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().map(move |r| r[x])
    }

    /// Values of the box which top-left cell is (`bx`, `by`).
    fn box_values(&self, bx: usize, by: usize) -> impl Iterator<Item = u8> + '_ {
        self.cells[by..by + BOX_SIZE]
            .iter()
            .flat_map(move |r| r[bx..bx + BOX_SIZE].iter().copied())
    }
}

/// Whether the nine values are 1 to 9, each exactly once.
fn is_permutation(values: impl Iterator<Item = u8>) -> bool {
    let mut seen: [bool; SIZE + 1] = [false; SIZE + 1];
    let mut count: usize = 0;

    for v in values {
        let i: usize = usize::from(v);
        if v == EMPTY || i > SIZE || seen[i] {
            return false;
        }
        seen[i] = true;
        count += 1;
    }
    count == SIZE
}

impl fmt::Display for Grid {
    /// Print the grid, with a dot for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 && y % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for (x, v) in row.iter().enumerate() {
                if x > 0 && x % BOX_SIZE == 0 {
                    write!(f, "| ")?;
                }
                if *v == EMPTY {
                    write!(f, ".")?;
                } else {
                    write!(f, "{v}")?;
                }
                if x + 1 < SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: [[u8; SIZE]; SIZE] = [
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

    #[test]
    fn solved_grid_is_valid() {
        assert!(Grid::from_rows(SOLVED).is_valid());
    }

    #[test]
    fn empty_cell_is_not_valid() {
        let mut grid = Grid::from_rows(SOLVED);
        grid.set(4, 4, EMPTY);
        assert!(!grid.is_complete());
        assert!(!grid.is_valid());
    }

    #[test]
    fn swapped_cells_break_the_columns() {
        let mut grid = Grid::from_rows(SOLVED);
        // Swapping two values in a row keeps the row valid but breaks two columns
        grid.set(0, 0, 3);
        grid.set(1, 0, 5);
        assert!(grid.is_complete());
        assert!(!grid.is_valid());
    }

    #[test]
    fn latin_square_with_bad_boxes_is_not_valid() {
        // Each row is the previous one shifted by one: rows and columns are fine, boxes are not
        let mut rows = [[0u8; SIZE]; SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = ((x + y) % SIZE) as u8 + 1;
            }
        }
        assert!(!Grid::from_rows(rows).is_valid());
    }

    #[test]
    fn can_place_checks_row_column_and_box() {
        let mut grid = Grid::new();
        grid.set(0, 0, 5);
        assert!(!grid.can_place(8, 0, 5));
        assert!(!grid.can_place(0, 8, 5));
        assert!(!grid.can_place(2, 2, 5));
        assert!(grid.can_place(3, 3, 5));
        // The value of the cell itself does not count
        assert!(grid.can_place(0, 0, 5));
    }

    #[test]
    fn empty_cells_are_listed_row_by_row() {
        let mut grid = Grid::from_rows(SOLVED);
        grid.set(7, 0, EMPTY);
        grid.set(2, 1, EMPTY);
        assert_eq!(grid.empty_cells(), vec![(7, 0), (2, 1)]);
        assert_eq!(grid.empty_count(), 2);
    }
}
