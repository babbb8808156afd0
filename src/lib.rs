/*
lib.rs

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

//! CoffeePause game engines.
//!
//! The crate provides the engines of the four games of the CoffeePause launcher (Sudoku, Spider
//! Solitaire, Minesweeper, and Pac-Man), and the files where the high scores, the settings, and
//! the Sudoku game in progress are saved. The engines do not draw anything: a presentation layer
//! maps the player input to engine operations and redraws from the engine state.

pub mod cards;
pub mod cli_options;
pub mod config;
pub mod highscores;
pub mod minesweeper;
pub mod pacman;
pub mod saver;
pub mod settings;
pub mod solitaire;
pub mod sudoku;
