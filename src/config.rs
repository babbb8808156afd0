/*
config.rs

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

//! Application constants and location of the user data directory.

use directories::ProjectDirs;
use log::{debug, warn};
use std::fs;
use std::path::PathBuf;

/// Application name, also used for the data directory.
pub const APPLICATION_NAME: &str = "CoffeePause";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text displayed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>"
);

/// Project directories of the application for the current user.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "coffeepause", APPLICATION_NAME)
}

/// Return the directory where the high scores, the settings, and the saved game are stored.
///
/// The directory is created if it does not exist yet. When the platform does not provide a
/// data directory, the current directory is used.
pub fn user_data_dir() -> PathBuf {
    let dir: PathBuf = match project_dirs() {
        Some(p) => p.data_dir().to_path_buf(),
        None => {
            warn!("Cannot find the user data directory: using the current directory");
            PathBuf::from(".")
        }
    };
    if let Err(error) = fs::create_dir_all(&dir) {
        warn!("Cannot create the data directory {dir:?}: {error}");
    }
    debug!("Data directory: {dir:?}");
    dir
}
