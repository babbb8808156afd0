/*
highscores.rs

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

//! Save and restore the high scores for the games.
//!
//! Each game has its own `<game>-highscores.json` file in the data directory.
//! The file is the JSON array of the [`Score`] objects of the scoreboard, best first.

use log::{debug, warn};
use std::error::Error;
use std::fs::{self, remove_file};
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{read_json, write_atomic};
use crate::highscores::{HighScores, Score, ScoreBoard, board_key};

/// Suffix of the high score files.
const FILE_SUFFIX: &str = "-highscores.json";

/// Object to save and restore the high scores.
pub struct SaverHighScores {
    /// Absolute path to the directory that stores the high score files.
    data_dir: PathBuf,
}

impl SaverHighScores {
    /// Create a [`SaverHighScores`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the high scores must be saved.
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("High scores directory: {data_dir:?}");
        Self { data_dir }
    }

    /// Return the path to the high score file of the given game.
    ///
    /// The file name is built from [`board_key`].
    pub fn board_file(&self, game_name: &str) -> PathBuf {
        self.data_dir.join(format!("{}{FILE_SUFFIX}", board_key(game_name)))
    }

    /// Retrieve the scoreboard of one game.
    ///
    /// Return None if the game has no high score file.
    pub fn get_board(&self, game_name: &str) -> Result<Option<ScoreBoard>, Box<dyn Error>> {
        let scores: Option<Vec<Score>> = read_json(&self.board_file(game_name))?;
        Ok(scores.map(ScoreBoard::from_scores))
    }

    /// Retrieve the scoreboards of all the games that have a high score file.
    ///
    /// A file that cannot be parsed is deleted, for trying to resolve the issue for the next
    /// start, and the corresponding scoreboard starts empty.
    pub fn get_highscores(&self) -> Result<HighScores, Box<dyn Error>> {
        let mut highscores: HighScores = HighScores::new();

        let entries = match fs::read_dir(&self.data_dir) {
            Ok(e) => e,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(highscores),
                _ => return Err(Box::new(error)),
            },
        };

        for entry in entries {
            let path: PathBuf = entry?.path();
            let game_name: String = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) => match n.strip_suffix(FILE_SUFFIX) {
                    Some(g) if !g.is_empty() => g.to_string(),
                    _ => continue,
                },
                None => continue,
            };

            match self.get_board(&game_name) {
                Ok(Some(board)) => {
                    debug!("Loaded {} scores for {game_name}", board.len());
                    highscores.set_board(&game_name, board);
                }
                Ok(None) => (),
                Err(error) => {
                    warn!("Cannot read the high scores file {path:?}: {error}");
                    let _ = remove_file(&path);
                }
            }
        }
        Ok(highscores)
    }

    /// Save the scoreboard of the given game.
    pub fn save_board(&self, game_name: &str, board: &ScoreBoard) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(&self.data_dir)?;
        write_atomic(&self.board_file(game_name), board.scores())
    }

    /// Delete the high score file of the given game.
    pub fn delete_save(&self, game_name: &str) {
        let _ = remove_file(self.board_file(game_name));
    }
}
