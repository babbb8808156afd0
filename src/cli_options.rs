/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers and for inspecting the files in the user data
//! directory.
//!
//! # Examples
//!
//! List the games:
//!
//! ```text
//! $ coffeepause --ls
//! pac-man            Pac-Man
//! sudoku             Sudoku
//! minesweeper        Minesweeper
//! spider-solitaire   Spider Solitaire
//! ```
//!
//! Generate two Sudoku puzzles at the hard difficulty level and print some statistics:
//!
//! ```text
//! $ coffeepause --sudoku -c 2 -f hard --summary
//! ```
//!
//! Print the Minesweeper scoreboard:
//!
//! ```text
//! $ coffeepause --scores minesweeper
//! ```

use chrono::{DateTime, Local};
use clap::{Parser, ValueEnum};
use log::debug;
use std::env;
use std::time::Instant;

use crate::config::{COPYRIGHT_NOTICE, user_data_dir};
use crate::highscores::{GameKind, HighScoreManager, Score};
use crate::saver::settings::SaverSettings;
use crate::settings::{Difficulty, Settings};
use crate::sudoku::generator::{Puzzle, removal_budget};

/// CoffeePause developer options.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE, ignore_errors = true)]
struct Args {
    /// List the games
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Print the scoreboard of a game
    #[arg(value_enum, long)]
    scores: Option<GameKind>,

    /// Generate random Sudoku puzzles
    #[arg(long, group = "generate", default_value_t = false)]
    sudoku: bool,

    /// Difficulty level for the puzzles
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium, requires = "generate")]
    difficulty: Difficulty,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    count: usize,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false, requires = "generate")]
    summary: bool,

    /// Print the settings
    #[arg(long, default_value_t = false)]
    settings: bool,

    /// Change the difficulty level in the settings
    #[arg(value_enum, long)]
    set_difficulty: Option<Difficulty>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options.
///
/// Return the exit code when an option has been processed, or None when there is nothing to do.
pub fn parse() -> Option<u8> {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // List the games
    //
    if args.ls {
        for game in GameKind::ALL {
            let name: String = game
                .to_possible_value()
                .map_or_else(|| game.board_name().to_string(), |v| v.get_name().to_string());
            println!("{name:<18} {game}");
        }
        return Some(0);
    }

    if let Some(game) = args.scores {
        print_scores(game);
        return Some(0);
    }

    if args.settings || args.set_difficulty.is_some() {
        return Some(process_settings(args.set_difficulty));
    }

    if args.sudoku {
        generate_sudoku(args.difficulty, args.count, args.summary);
        return Some(0);
    }
    None
}

/// Print the scoreboard of the given game.
fn print_scores(game: GameKind) {
    let manager: HighScoreManager = HighScoreManager::new(user_data_dir());
    let scores: &[Score] = manager.get_scores(game.board_name());

    println!("{game}");
    if scores.is_empty() {
        println!("No scores yet");
        return;
    }
    for (i, s) in scores.iter().enumerate() {
        let secs: u64 = s.time.as_secs();
        let date: DateTime<Local> = DateTime::from(s.date);
        println!(
            "{:>2}. {:<20} {:>6}  {:02}:{:02}:{:02}  {}",
            i + 1,
            s.player_name,
            s.score,
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60,
            date.format("%c")
        );
    }
}

/// Print the settings, after changing the difficulty level if requested.
fn process_settings(difficulty: Option<Difficulty>) -> u8 {
    let saver: SaverSettings = SaverSettings::new(user_data_dir());
    let mut settings: Settings = saver.load_or_default();

    if let Some(d) = difficulty {
        settings.set_difficulty(d);
        if let Err(error) = saver.save_settings(&settings) {
            eprintln!("Cannot save the settings: {error}");
            return 1;
        }
    }
    match serde_json::to_string_pretty(&settings) {
        Ok(s) => {
            println!("{s}");
            0
        }
        Err(error) => {
            eprintln!("Cannot display the settings: {error}");
            1
        }
    }
}

/// Generate and print random Sudoku puzzles.
fn generate_sudoku(difficulty: Difficulty, count: usize, summary: bool) {
    let mut rng = rand::rng();
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: usize = 0;

    for i in 0..count {
        debug!("Iteration {i}");
        let start: Instant = Instant::now();

        match Puzzle::generate_with(difficulty, &mut rng) {
            Ok(puzzle) => {
                let duration: f32 = start.elapsed().as_secs_f32();
                total += duration;
                if duration > max {
                    max = duration;
                }

                // Verify the generated puzzle
                if !puzzle.solution.is_valid() {
                    eprintln!("Invalid solution:\n{}", puzzle.solution);
                    errors += 1;
                    continue;
                }
                println!("{}", puzzle.givens);
            }
            Err(error) => {
                errors += 1;
                debug!("ERROR generating the puzzle: {error}");
            }
        }
    }

    // Print some stats
    if summary {
        let generated: usize = count - errors;
        println!(
            "
        difficulty = {} ({} empty cells)
   total puzzles = {}
      total time = {}s
    average time = {}s
        max time = {}s
          errors = {}",
            difficulty,
            removal_budget(difficulty),
            generated,
            total,
            if count > 0 { total / count as f32 } else { 0.0 },
            max,
            errors
        );
    }
}
