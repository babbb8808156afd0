/*
settings.rs

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

//! Global settings shared by the games.
//!
//! The [`Settings`] object is loaded once when the launcher starts, and is then passed to the
//! games that need it. See [`crate::saver::settings`] for saving and restoring the object.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(u8)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Return all the difficulty levels, from the easiest.
    pub fn levels() -> Vec<Difficulty> {
        (0..).map_while(Difficulty::from_repr).collect()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Largest width or height of a Minesweeper board.
pub const MAX_GRID_SIZE: usize = 64;

/// Minesweeper board dimensions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MinesweeperSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    pub mine_count: usize,
}

impl Default for MinesweeperSettings {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

impl MinesweeperSettings {
    /// Return the preset board for the given difficulty level.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                grid_width: 8,
                grid_height: 8,
                mine_count: 10,
            },
            Difficulty::Medium => Self {
                grid_width: 10,
                grid_height: 10,
                mine_count: 15,
            },
            Difficulty::Hard => Self {
                grid_width: 16,
                grid_height: 16,
                mine_count: 40,
            },
        }
    }

    /// Return a copy with usable dimensions.
    ///
    /// A file edited by hand could declare a board that does not fit in memory, or more mines
    /// than cells. The width and height are clamped to `1..=MAX_GRID_SIZE`, and the mine count
    /// is reduced so that at least one cell is safe.
    pub fn sanitized(&self) -> Self {
        let width: usize = self.grid_width.clamp(1, MAX_GRID_SIZE);
        let height: usize = self.grid_height.clamp(1, MAX_GRID_SIZE);
        Self {
            grid_width: width,
            grid_height: height,
            mine_count: self.mine_count.min(width * height - 1),
        }
    }
}

/// Settings object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Whether the games play sounds.
    pub sound_enabled: bool,

    /// Difficulty level, which also selects the Minesweeper board and the number of cells that
    /// are cleared in the Sudoku puzzles.
    pub difficulty: Difficulty,

    /// Minesweeper board dimensions.
    pub minesweeper: MinesweeperSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            difficulty: Difficulty::Medium,
            minesweeper: MinesweeperSettings::default(),
        }
    }
}

impl Settings {
    /// Change the difficulty level and select the matching Minesweeper board.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.minesweeper = MinesweeperSettings::for_difficulty(difficulty);
    }
}
