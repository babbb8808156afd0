/*
main.rs

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

use coffeepause::cli_options;
use coffeepause::config::{APPLICATION_NAME, VERSION, user_data_dir};
use coffeepause::highscores::{GameKind, HighScoreManager, Score};
use coffeepause::saver::settings::SaverSettings;
use coffeepause::settings::Settings;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(ret) = cli_options::parse() {
        return ExitCode::from(ret);
    }

    // Without option, print the games with their best score
    let data_dir: PathBuf = user_data_dir();
    let settings: Settings = SaverSettings::new(data_dir.clone()).load_or_default();
    let manager: HighScoreManager = HighScoreManager::new(data_dir);

    println!("{APPLICATION_NAME} {VERSION} (difficulty: {})", settings.difficulty);
    for game in GameKind::ALL {
        let name: String = game.to_string();
        match manager.get_scores(game.board_name()).first() {
            Some(Score {
                player_name, score, ..
            }) => println!("  {name:<18} best: {score} ({player_name})"),
            None => println!("  {name:<18} no scores yet"),
        }
    }
    println!("Use --help to list the options.");
    ExitCode::SUCCESS
}
