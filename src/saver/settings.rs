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

//! Save and restore the global settings.
//!
//! The saved object is a serialization of the [`Settings`] object in JSON format by using
//! [`serde`].

use log::{debug, warn};
use std::error::Error;
use std::fs::{self, remove_file};
use std::path::PathBuf;

use super::{read_json, write_atomic};
use crate::settings::Settings;

/// Object to save and restore the settings.
pub struct SaverSettings {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverSettings {
    /// Create a [`SaverSettings`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the settings must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("settings.json");
        debug!("Settings file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`Settings`] object from the settings file.
    ///
    /// Return None if the settings file does not exist.
    pub fn get_settings(&self) -> Result<Option<Settings>, Box<dyn Error>> {
        read_json(&self.save_file)
    }

    /// Retrieve the settings, or the default settings if the file does not exist or cannot be
    /// read. An unreadable file is deleted.
    pub fn load_or_default(&self) -> Settings {
        match self.get_settings() {
            Ok(Some(s)) => s,
            Ok(None) => {
                debug!("No settings file: using the default settings");
                Settings::default()
            }
            Err(error) => {
                warn!("Failed to load settings: {error}");
                self.delete_save();
                Settings::default()
            }
        }
    }

    /// Save the provided [`Settings`] object.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.save_file.parent() {
            fs::create_dir_all(dir)?;
        }
        write_atomic(&self.save_file, settings)
    }

    /// Delete the settings file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;

    #[test]
    fn settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let saver = SaverSettings::new(dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.sound_enabled = false;
        settings.set_difficulty(Difficulty::Hard);
        saver.save_settings(&settings).unwrap();

        let loaded = SaverSettings::new(dir.path().to_path_buf()).load_or_default();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn unreadable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "not json").unwrap();

        let saver = SaverSettings::new(dir.path().to_path_buf());
        assert!(saver.get_settings().is_err());
        assert_eq!(saver.load_or_default(), Settings::default());
        assert!(!dir.path().join("settings.json").exists());
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let saver = SaverSettings::new(dir.path().to_path_buf());
        saver.save_settings(&Settings::default()).unwrap();

        saver.delete_save();
        assert!(saver.get_settings().unwrap().is_none());
    }
}
