/*
saver.rs

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

//! Save and restore objects in JSON files.
//!
//! Each sub-module manages one kind of file: the high score boards, the global settings, and the
//! Sudoku game in progress.
//! All the files are written with [`write_atomic`]: the object is serialized to a temporary file
//! first, which then replaces the target file.

pub mod game;
pub mod highscores;
pub mod settings;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Return the path of the temporary file used when writing `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Read and deserialize a JSON file.
///
/// Return None if the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, Box<dyn Error>> {
    let file: File = match File::open(path) {
        Ok(f) => f,
        Err(error) => match error.kind() {
            ErrorKind::NotFound => return Ok(None),
            _ => return Err(Box::new(error)),
        },
    };
    let reader: BufReader<File> = BufReader::new(file);
    let value: T = serde_json::from_reader(reader)?;
    Ok(Some(value))
}

/// Serialize the object into the given file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let file: File = File::create(path)?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// Serialize the object to a temporary file and then rename that file over `path`.
///
/// On error, the temporary file is removed and the target file is left untouched.
pub fn write_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let tmp: PathBuf = temp_path(path);

    if let Err(error) = write_json(&tmp, value) {
        let _ = fs::remove_file(&tmp);
        return Err(error);
    }
    if let Err(error) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(Box::new(error));
    }
    Ok(())
}
