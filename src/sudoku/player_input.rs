/*
player_input.rs

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

//! Manage the player's cell input.
//!
//! The module manages the cell values and the draft values that the player entered, as well as
//! the undo and redo lists. Draft values are annotations: they are not part of the undo list.

use serde::{Deserialize, Serialize};

use super::grid::{EMPTY, Grid, SIZE};

/// Cell parameters for an undo and redo operation.
/// The object stores the operation that was performed by the player.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
struct DoOperation {
    x: usize,
    y: usize,

    /// Value of the cell before the operation.
    previous: u8,

    /// Value of the cell after the operation.
    value: u8,
}

/// Manage the Sudoku cells that the player completed.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Cell values, including the given cells.
    values: Grid,

    /// Draft values. 0 means no draft.
    drafts: Grid,

    /// List of undo operations.
    undo_op: Vec<DoOperation>,

    /// List of redo operations.
    redo_op: Vec<DoOperation>,
}

impl PlayerInput {
    /// Create a [`PlayerInput`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the object.
    pub fn clear(&mut self) {
        self.values = Grid::new();
        self.drafts = Grid::new();
        self.undo_op.clear();
        self.redo_op.clear();
    }

    /// Return the cell values.
    pub fn values(&self) -> &Grid {
        &self.values
    }

    /// Return the draft values.
    pub fn drafts(&self) -> &Grid {
        &self.drafts
    }

    /// Return a cell's value, 0 for an empty cell.
    pub fn get_value(&self, x: usize, y: usize) -> u8 {
        self.values.get(x, y)
    }

    /// Return a cell's draft value, or None if the cell has no draft.
    pub fn get_draft(&self, x: usize, y: usize) -> Option<u8> {
        match self.drafts.get(x, y) {
            EMPTY => None,
            v => Some(v),
        }
    }

    /// Set a value in a cell, but do not store the operation in the undo list.
    pub fn set_no_undo(&mut self, x: usize, y: usize, value: u8) {
        self.values.set(x, y, value);
    }

    /// Set a value in a cell (0 clears the cell) and add the operation to the undo list.
    ///
    /// The draft value of the cell is removed.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        let previous: u8 = self.values.get(x, y);
        self.drafts.set(x, y, EMPTY);
        if previous == value {
            return;
        }
        self.values.set(x, y, value);
        self.undo_op.push(DoOperation {
            x,
            y,
            previous,
            value,
        });
        self.redo_op.clear();
    }

    /// Set or remove the draft value of a cell.
    pub fn set_draft(&mut self, x: usize, y: usize, draft: Option<u8>) {
        self.drafts.set(x, y, draft.unwrap_or(EMPTY));
    }

    /// Remove all the draft values.
    pub fn clear_drafts(&mut self) {
        self.drafts = Grid::new();
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        SIZE * SIZE - self.values.empty_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Undo the last operation and return the coordinates of the modified cell.
    pub fn undo(&mut self) -> Option<(usize, usize)> {
        let op: DoOperation = self.undo_op.pop()?;
        self.values.set(op.x, op.y, op.previous);
        self.redo_op.push(op);
        Some((op.x, op.y))
    }

    /// Redo the last undo operation and return the coordinates of the modified cell.
    pub fn redo(&mut self) -> Option<(usize, usize)> {
        let op: DoOperation = self.redo_op.pop()?;
        self.values.set(op.x, op.y, op.value);
        self.undo_op.push(op);
        Some((op.x, op.y))
    }

    /// Return the length of the undo list.
    pub fn undo_len(&self) -> usize {
        self.undo_op.len()
    }

    /// Return the length of the redo list.
    pub fn redo_len(&self) -> usize {
        self.redo_op.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_and_redo() {
        let mut input = PlayerInput::new();
        input.set(0, 0, 4);
        input.set(0, 0, 7);
        input.set(3, 2, 1);

        assert_eq!(input.undo(), Some((3, 2)));
        assert_eq!(input.get_value(3, 2), EMPTY);
        assert_eq!(input.undo(), Some((0, 0)));
        assert_eq!(input.get_value(0, 0), 4);
        assert_eq!(input.redo_len(), 2);

        assert_eq!(input.redo(), Some((0, 0)));
        assert_eq!(input.get_value(0, 0), 7);
        assert_eq!(input.undo_len(), 2);
    }

    #[test]
    fn new_operation_clears_redo() {
        let mut input = PlayerInput::new();
        input.set(1, 1, 2);
        input.undo();
        assert_eq!(input.redo_len(), 1);

        input.set(1, 1, 3);
        assert_eq!(input.redo_len(), 0);
        assert_eq!(input.redo(), None);
    }

    #[test]
    fn setting_the_same_value_is_not_recorded() {
        let mut input = PlayerInput::new();
        input.set(5, 5, 9);
        input.set(5, 5, 9);
        assert_eq!(input.undo_len(), 1);
    }

    #[test]
    fn untracked_values_cannot_be_undone() {
        let mut input = PlayerInput::new();
        input.set_no_undo(2, 2, 5);
        assert_eq!(input.undo(), None);
        assert_eq!(input.get_value(2, 2), 5);
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn drafts_are_independent_from_values() {
        let mut input = PlayerInput::new();
        input.set_draft(4, 4, Some(6));
        assert_eq!(input.get_draft(4, 4), Some(6));
        assert_eq!(input.get_value(4, 4), EMPTY);
        assert_eq!(input.undo_len(), 0);

        input.set(4, 4, 3);
        assert_eq!(input.get_draft(4, 4), None);

        input.set_draft(0, 1, Some(2));
        input.set_draft(0, 1, None);
        assert_eq!(input.get_draft(0, 1), None);
    }
}
