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

//! Save and restore the Sudoku game in progress.
//!
//! When a Sudoku game is in progress and the player leaves it, the game status is saved in the
//! `savegame.json` file. The next time the player opens Sudoku, the saved game is loaded, and
//! the player can continue the puzzle.
//!
//! The saved object is a serialization of the [`SudokuGame`] object in JSON format by using
//! [`serde`].

use log::debug;
use std::error::Error;
use std::fs::{self, remove_file};
use std::path::PathBuf;

use super::{read_json, write_atomic};
use crate::sudoku::game::SudokuGame;

/// Serialize and deserialize [`std::time::Instant`] objects with Serde.
///
/// The elapsed time is stored, so that the game timer continues from where it was when the game
/// is restored.
pub mod instant {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
    use std::time::{Duration, Instant};

    /// Serialize an [`std::time::Instant`] object.
    pub fn serialize<S>(instant: &Instant, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration: Duration = instant.elapsed();
        duration.serialize(serializer)
    }

    /// Deserialize an [`std::time::Instant`] object.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Instant, D::Error>
    where
        D: Deserializer<'de>,
    {
        let duration: Duration = Duration::deserialize(deserializer)?;
        Instant::now()
            .checked_sub(duration)
            .ok_or_else(|| Error::custom("Cannot compute the saved game duration"))
    }
}

/// Object to save and restore a Sudoku game in progress.
pub struct SaverGame {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverGame {
    /// Create a [`SaverGame`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the game must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("savegame.json");
        debug!("Save game file: {data_dir:?}");
        SaverGame {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`SudokuGame`] object for the saved game.
    ///
    /// Return the [`SudokuGame`] object or None if there is no saved game.
    pub fn get_game(&self) -> Result<Option<SudokuGame>, Box<dyn Error>> {
        read_json(&self.save_file)
    }

    /// Save the provided [`SudokuGame`] object.
    pub fn save_game(&self, game: &SudokuGame) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.save_file.parent() {
            fs::create_dir_all(dir)?;
        }
        write_atomic(&self.save_file, game)
    }

    /// Delete the saved game.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
