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

//! Manage high scores for the games.
//!
//! The [`HighScores`] object maintains a scoreboard for each game.
//! The [`HighScoreManager`] object wraps it with the [`SaverHighScores`] object: every score that
//! makes it to a scoreboard is saved right away, and all the scoreboards are restored when the
//! manager is created.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::saver::highscores::SaverHighScores;

/// Number of entries per scoreboard (number of top scores to keep).
pub const BOARD_SIZE: usize = 10;

/// Player name used when none is given.
pub const DEFAULT_PLAYER: &str = "Player";

/// Games that have a scoreboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum GameKind {
    PacMan,
    Sudoku,
    Minesweeper,
    SpiderSolitaire,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::PacMan,
        GameKind::Sudoku,
        GameKind::Minesweeper,
        GameKind::SpiderSolitaire,
    ];

    /// Name of the scoreboard, which is also used to build the file name.
    pub fn board_name(&self) -> &'static str {
        match self {
            GameKind::PacMan => "PacMan",
            GameKind::Sudoku => "Sudoku",
            GameKind::Minesweeper => "Minesweeper",
            GameKind::SpiderSolitaire => "SpiderSolitaire",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameKind::PacMan => write!(f, "Pac-Man"),
            GameKind::Sudoku => write!(f, "Sudoku"),
            GameKind::Minesweeper => write!(f, "Minesweeper"),
            GameKind::SpiderSolitaire => write!(f, "Spider Solitaire"),
        }
    }
}

/// Object that represent a score.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Name of the player.
    #[serde(default = "default_player")]
    pub player_name: String,

    /// Points.
    pub score: i64,

    /// How long did it take for completing the game.
    #[serde(default)]
    pub time: Duration,

    /// Completion timestamp.
    pub date: SystemTime,
}

/// Return the key of the scoreboard for the given game name, which is also the stem of its
/// high score file.
///
/// Characters that are not letters, digits, `-`, or `_` are removed, so that "Spider Solitaire"
/// and "SpiderSolitaire" share the same scoreboard.
pub fn board_key(game_name: &str) -> String {
    game_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

fn default_player() -> String {
    DEFAULT_PLAYER.to_string()
}

impl Score {
    /// Whether this score ranks before the `other` score.
    ///
    /// Higher points rank first. For the same points, the shorter time ranks first.
    fn ranks_before(&self, other: &Score) -> bool {
        self.score > other.score || (self.score == other.score && self.time < other.time)
    }
}

/// Sorted list of the top scores for a game.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    /// Sorted list of the top scores.
    /// The number of scores in this list is controlled by the [`BOARD_SIZE`] constant.
    top: Vec<Score>,
}

impl ScoreBoard {
    /// Create a [`ScoreBoard`] object.
    pub fn new() -> Self {
        Self {
            top: Vec::with_capacity(BOARD_SIZE),
        }
    }

    /// Create a scoreboard from a list of scores that might not be sorted (from a file that the
    /// user edited, for example).
    pub fn from_scores(mut scores: Vec<Score>) -> Self {
        scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.time.cmp(&b.time)));
        scores.truncate(BOARD_SIZE);
        Self { top: scores }
    }

    /// Add a score to the scoreboard and return the position in the board, or None if the
    /// score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score).
    pub fn add_score(&mut self, new_score: Score) -> Option<usize> {
        let position: usize = self
            .top
            .iter()
            .position(|s| new_score.ranks_before(s))
            .unwrap_or(self.top.len());

        if position >= BOARD_SIZE {
            return None;
        }
        self.top.insert(position, new_score);
        self.top.truncate(BOARD_SIZE);
        Some(position + 1)
    }

    /// Return the scores, best first.
    pub fn scores(&self) -> &[Score] {
        &self.top
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }
}

/// List of the scoreboards for the games.
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    /// Map of the [`ScoreBoard`] scoreboards indexed by the game name.
    board: HashMap<String, ScoreBoard>,
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        Self {
            board: HashMap::new(),
        }
    }

    /// Replace the scoreboard of the given game.
    pub fn set_board(&mut self, game_name: &str, board: ScoreBoard) {
        self.board.insert(board_key(game_name), board);
    }

    /// Add a score to the scoreboard of the given game and return the position in the
    /// scoreboard, or None if the score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score).
    pub fn add_score(&mut self, game_name: &str, score: Score) -> Option<usize> {
        let scoreboard: &mut ScoreBoard = self.board.entry(board_key(game_name)).or_default();

        scoreboard.add_score(score)
    }

    /// Return the scoreboard of the given game, or None when the game has no scoreboard yet.
    pub fn get_board(&self, game_name: &str) -> Option<&ScoreBoard> {
        self.board.get(&board_key(game_name))
    }

    /// Return the list of [`Score`] for the given game, best first.
    ///
    /// The list is empty when the game has no scores.
    pub fn get_scores(&self, game_name: &str) -> &[Score] {
        match self.get_board(game_name) {
            Some(b) => b.scores(),
            None => &[],
        }
    }

    /// Return whether the list of scoreboard is empty (no scoreboard for any game)
    pub fn is_empty(&self) -> bool {
        self.board.values().all(|b| b.is_empty())
    }
}

/// High score boards backed by files in a data directory.
pub struct HighScoreManager {
    scores: HighScores,
    saver: SaverHighScores,
}

impl HighScoreManager {
    /// Create a [`HighScoreManager`] object and load the scoreboards from the given directory.
    ///
    /// Errors are logged, and the scoreboards that cannot be loaded start empty.
    pub fn new(data_dir: PathBuf) -> Self {
        let saver: SaverHighScores = SaverHighScores::new(data_dir);
        let scores: HighScores = match saver.get_highscores() {
            Ok(h) => h,
            Err(error) => {
                warn!("Cannot load the high scores: {error}");
                HighScores::new()
            }
        };
        Self { scores, saver }
    }

    /// Add a score for the given game, save the scoreboard, and return the position in the
    /// scoreboard (starting at 1) or None if the score does not make it to the board.
    ///
    /// A blank player name is replaced by [`DEFAULT_PLAYER`].
    ///
    /// A failure to save the scoreboard is logged but does not prevent the score from being
    /// added to the in-memory board.
    pub fn add_score(
        &mut self,
        game_name: &str,
        player_name: &str,
        score: i64,
        time: Duration,
    ) -> Option<usize> {
        let player_name: &str = match player_name.trim() {
            "" => DEFAULT_PLAYER,
            name => name,
        };
        let entry: Score = Score {
            player_name: player_name.to_string(),
            score,
            time,
            date: SystemTime::now(),
        };
        let position: Option<usize> = self.scores.add_score(game_name, entry);

        debug!("New score {score} for {game_name}: position {position:?}");
        if let Some(p) = position {
            info!("{player_name} enters the {game_name} scoreboard at position {p}");
        }
        if position.is_some()
            && let Some(board) = self.scores.get_board(game_name)
            && let Err(error) = self.saver.save_board(game_name, board)
        {
            warn!("Error saving high scores for {game_name}: {error}");
        }
        position
    }

    /// Return the scores of the given game, best first.
    pub fn get_scores(&self, game_name: &str) -> &[Score] {
        self.scores.get_scores(game_name)
    }

    /// Return the in-memory scoreboards.
    pub fn highscores(&self) -> &HighScores {
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(points: i64, minutes: u64) -> Score {
        Score {
            player_name: format!("Player{points}"),
            score: points,
            time: Duration::from_secs(minutes * 60),
            date: SystemTime::now(),
        }
    }

    #[test]
    fn board_keeps_the_top_ten() {
        let mut board = ScoreBoard::new();
        for i in 0..15 {
            board.add_score(score(i * 10, i as u64));
        }
        assert_eq!(board.len(), BOARD_SIZE);
        assert_eq!(board.scores()[0].score, 140);
        assert_eq!(board.scores()[9].score, 50);
    }

    #[test]
    fn board_position_starts_at_one() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.add_score(score(50, 5)), Some(1));
        assert_eq!(board.add_score(score(100, 3)), Some(1));
        assert_eq!(board.add_score(score(75, 4)), Some(2));
        assert_eq!(board.add_score(score(10, 4)), Some(4));
    }

    #[test]
    fn full_board_rejects_low_scores() {
        let mut board = ScoreBoard::new();
        for i in 1..=10 {
            board.add_score(score(i * 100, 1));
        }
        assert_eq!(board.add_score(score(5, 1)), None);
        assert_eq!(board.len(), BOARD_SIZE);
    }

    #[test]
    fn ties_are_broken_by_time() {
        let mut board = ScoreBoard::new();
        board.add_score(score(100, 9));
        board.add_score(score(100, 2));
        board.add_score(score(100, 5));

        let minutes: Vec<u64> = board.scores().iter().map(|s| s.time.as_secs() / 60).collect();
        assert_eq!(minutes, vec![2, 5, 9]);
    }

    #[test]
    fn unsorted_scores_are_sorted_and_truncated() {
        let scores: Vec<Score> = (0..12).map(|i| score(i, 12 - i as u64)).collect();
        let board = ScoreBoard::from_scores(scores);
        assert_eq!(board.len(), BOARD_SIZE);
        assert_eq!(board.scores()[0].score, 11);
    }

    #[test]
    fn unknown_game_has_no_scores() {
        let highscores = HighScores::new();
        assert!(highscores.get_scores("NonExistentGame").is_empty());
        assert!(highscores.is_empty());
    }

    #[test]
    fn manager_adds_and_sorts_scores() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = HighScoreManager::new(dir.path().to_path_buf());

        manager.add_score("TestGame", "Player1", 50, Duration::from_secs(300));
        manager.add_score("TestGame", "Player2", 100, Duration::from_secs(180));
        manager.add_score("TestGame", "Player3", 75, Duration::from_secs(240));

        let points: Vec<i64> = manager.get_scores("TestGame").iter().map(|s| s.score).collect();
        assert_eq!(points, vec![100, 75, 50]);
        assert_eq!(manager.get_scores("TestGame")[0].player_name, "Player2");
    }

    #[test]
    fn manager_limits_scores_to_top_ten() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = HighScoreManager::new(dir.path().to_path_buf());

        for i in 0..15 {
            manager.add_score(
                "TestGame",
                &format!("Player{i}"),
                i * 10,
                Duration::from_secs(i as u64 * 60),
            );
        }

        let scores = manager.get_scores("TestGame");
        assert_eq!(scores.len(), 10);
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn scores_survive_a_new_manager() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = HighScoreManager::new(dir.path().to_path_buf());
        first.add_score(
            "RoundtripTest",
            "RoundtripPlayer",
            200,
            Duration::from_secs(600),
        );

        let second = HighScoreManager::new(dir.path().to_path_buf());
        let scores = second.get_scores("RoundtripTest");
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 200);
        assert_eq!(scores[0].player_name, "RoundtripPlayer");
        assert_eq!(scores[0].time, Duration::from_secs(600));
    }

    #[test]
    fn game_names_with_spaces_survive_a_new_manager() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = HighScoreManager::new(dir.path().to_path_buf());
        first.add_score("Spider Solitaire", "Ann", 640, Duration::from_secs(900));
        first.add_score("Pac-Man", "Bob", 120, Duration::from_secs(60));

        let second = HighScoreManager::new(dir.path().to_path_buf());
        assert_eq!(second.get_scores("Spider Solitaire").len(), 1);
        assert_eq!(second.get_scores("Spider Solitaire")[0].score, 640);
        assert_eq!(second.get_scores("SpiderSolitaire").len(), 1);
        assert_eq!(second.get_scores("Pac-Man")[0].player_name, "Bob");
    }

    #[test]
    fn blank_player_name_becomes_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = HighScoreManager::new(dir.path().to_path_buf());

        manager.add_score("Sudoku", "  ", 1000, Duration::from_secs(300));
        manager.add_score("Sudoku", "", 900, Duration::from_secs(300));
        manager.add_score("Sudoku", " Eve ", 800, Duration::from_secs(300));

        let names: Vec<&str> = manager
            .get_scores("Sudoku")
            .iter()
            .map(|s| s.player_name.as_str())
            .collect();
        assert_eq!(names, vec![DEFAULT_PLAYER, DEFAULT_PLAYER, "Eve"]);
    }

    #[test]
    fn board_key_drops_unsafe_characters() {
        assert_eq!(board_key("Spider Solitaire"), "SpiderSolitaire");
        assert_eq!(board_key("Pac-Man"), "Pac-Man");
        assert_eq!(board_key("../mine_sweeper"), "mine_sweeper");
    }
}
