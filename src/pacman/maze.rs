/*
maze.rs

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

//! Parse an "ASCII art" representation of a Pac-Man maze.
//!
//! Each line is a row of the maze, and each character is a cell:
//!
//! - `#` is a wall.
//! - `.` is a pellet.
//! - `o` is a power-up.
//! - `P` is the starting position of Pac-Man (no pellet).
//! - `G` is the starting position of a ghost, on a pellet.
//! - A space is an empty cell.
//!
//! All the lines must have the same length. Empty lines at the beginning and at the end of the
//! text are ignored.

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::error::Error;
use std::fmt;

/// Width of the built-in maze.
pub const BUILTIN_WIDTH: usize = 20;

/// Height of the built-in maze.
pub const BUILTIN_HEIGHT: usize = 10;

/// ASCII representation of [`Maze::builtin`]. The power-up is added at a random position when
/// the game starts.
pub const BUILTIN_MAZE: &str = "
####################
#..................#
#..................#
#..G.#.........#G..#
#....#.........#...#
#....#....P....#...#
#..G.#.........#...#
#..................#
#..................#
####################
";

/// Content of a maze cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    PowerUp,
}

/// Type of errors when parsing a maze.
#[derive(Debug, PartialEq)]
pub enum MazeError {
    /// The text has no rows.
    Empty,

    /// The row does not have the same length as the first row.
    RaggedRow(usize),

    /// The character at the given position is not a maze character.
    UnknownCharacter { ch: char, x: usize, y: usize },

    /// The maze has no starting position for Pac-Man.
    NoStart,

    /// The maze has several starting positions for Pac-Man.
    SeveralStarts,
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeError::Empty => write!(f, "the maze is empty"),
            MazeError::RaggedRow(y) => write!(f, "row {y} does not have the same length"),
            MazeError::UnknownCharacter { ch, x, y } => {
                write!(f, "unknown character '{ch}' at ({x}, {y})")
            }
            MazeError::NoStart => write!(f, "no starting position for Pac-Man"),
            MazeError::SeveralStarts => write!(f, "several starting positions for Pac-Man"),
        }
    }
}

impl Error for MazeError {}

/// Pac-Man maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,

    /// Cells, row by row.
    tiles: Vec<Tile>,

    /// Starting position of Pac-Man.
    pub pacman_start: (usize, usize),

    /// Starting positions of the ghosts.
    pub ghost_spawns: Vec<(usize, usize)>,
}

impl Maze {
    /// Parse the ASCII representation of a maze.
    ///
    /// # Errors
    ///
    /// The method returns an error when the rows do not have the same length, when a character
    /// is unknown, or when there is not exactly one starting position for Pac-Man.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text
            .trim_matches(|c: char| c == '\n' || c == '\r')
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        let width: usize = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles: Vec<Tile> = Vec::with_capacity(width * rows.len());
        let mut pacman_start: Option<(usize, usize)> = None;
        let mut ghost_spawns: Vec<(usize, usize)> = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(MazeError::RaggedRow(y));
            }
            for (x, ch) in row.chars().enumerate() {
                let tile: Tile = match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Pellet,
                    'o' => Tile::PowerUp,
                    ' ' => Tile::Empty,
                    'P' => {
                        if pacman_start.is_some() {
                            return Err(MazeError::SeveralStarts);
                        }
                        pacman_start = Some((x, y));
                        Tile::Empty
                    }
                    'G' => {
                        ghost_spawns.push((x, y));
                        Tile::Pellet
                    }
                    _ => return Err(MazeError::UnknownCharacter { ch, x, y }),
                };
                tiles.push(tile);
            }
        }

        let maze: Maze = Self {
            width,
            height: rows.len(),
            tiles,
            pacman_start: pacman_start.ok_or(MazeError::NoStart)?,
            ghost_spawns,
        };
        if log_enabled!(Level::Debug) {
            debug!("Maze {}x{}:\n{maze}", maze.width, maze.height);
        }
        Ok(maze)
    }

    /// Return the built-in 20x10 maze, without power-up.
    pub fn builtin() -> Self {
        let mut tiles: Vec<Tile> = Vec::with_capacity(BUILTIN_WIDTH * BUILTIN_HEIGHT);
        for y in 0..BUILTIN_HEIGHT {
            for x in 0..BUILTIN_WIDTH {
                let border: bool =
                    x == 0 || y == 0 || x == BUILTIN_WIDTH - 1 || y == BUILTIN_HEIGHT - 1;
                let inner: bool = (x == 5 || x == 15) && (3..7).contains(&y);
                tiles.push(if border || inner {
                    Tile::Wall
                } else {
                    Tile::Pellet
                });
            }
        }
        let pacman_start: (usize, usize) = (10, 5);
        tiles[pacman_start.1 * BUILTIN_WIDTH + pacman_start.0] = Tile::Empty;

        Self {
            width: BUILTIN_WIDTH,
            height: BUILTIN_HEIGHT,
            tiles,
            pacman_start,
            ghost_spawns: vec![(3, 3), (16, 3), (3, 6)],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Return the cell content. Cells outside the maze are walls.
    pub fn get(&self, x: usize, y: usize) -> Tile {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x]
        } else {
            Tile::Wall
        }
    }

    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Tile::Wall
    }

    /// Number of cells with the given content.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Replace a random pellet with a power-up, and return its position.
    pub fn place_power_up<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(usize, usize)> {
        let pellets: Vec<usize> = (0..self.tiles.len())
            .filter(|i| self.tiles[*i] == Tile::Pellet)
            .collect();
        let i: usize = *pellets.choose(rng)?;
        self.tiles[i] = Tile::PowerUp;
        Some((i % self.width, i / self.width))
    }
}

impl fmt::Display for Maze {
    /// Print the maze in the format that [`Maze::parse`] reads.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let ch: char = if (x, y) == self.pacman_start {
                    'P'
                } else if self.ghost_spawns.contains(&(x, y)) {
                    'G'
                } else {
                    match self.get(x, y) {
                        Tile::Wall => '#',
                        Tile::Empty => ' ',
                        Tile::Pellet => '.',
                        Tile::PowerUp => 'o',
                    }
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn builtin_maze_matches_its_ascii_art() {
        let maze = Maze::builtin();
        assert_eq!(Maze::parse(BUILTIN_MAZE), Ok(maze.clone()));
        assert_eq!(maze.to_string().trim(), BUILTIN_MAZE.trim());
    }

    #[test]
    fn builtin_maze_layout() {
        let maze = Maze::builtin();
        assert_eq!((maze.width(), maze.height()), (20, 10));
        assert_eq!(maze.pacman_start, (10, 5));
        assert_eq!(maze.ghost_spawns, vec![(3, 3), (16, 3), (3, 6)]);
        for y in 3..7 {
            assert!(maze.is_wall(5, y));
            assert!(maze.is_wall(15, y));
        }
        assert!(!maze.is_wall(5, 2));
        assert!(!maze.is_wall(5, 7));
        assert_eq!(maze.get(10, 5), Tile::Empty);
        // 18x8 inner cells, minus 8 walls and the starting cell
        assert_eq!(maze.count(Tile::Pellet), 135);
        assert_eq!(maze.count(Tile::PowerUp), 0);
    }

    #[test]
    fn outside_cells_are_walls() {
        let maze = Maze::builtin();
        assert!(maze.is_wall(20, 1));
        assert!(maze.is_wall(1, 10));
    }

    #[test]
    fn power_up_replaces_a_pellet() {
        let mut maze = Maze::builtin();
        let (x, y) = maze.place_power_up(&mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(maze.get(x, y), Tile::PowerUp);
        assert_eq!(maze.count(Tile::Pellet), 134);
        assert_eq!(maze.count(Tile::PowerUp), 1);
    }

    #[test]
    fn no_pellet_no_power_up() {
        let mut maze = Maze::parse("###\n#P#\n###").unwrap();
        assert_eq!(maze.place_power_up(&mut StdRng::seed_from_u64(8)), None);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Maze::parse("\n\n"), Err(MazeError::Empty));
        assert_eq!(Maze::parse("####\n#P#\n####"), Err(MazeError::RaggedRow(1)));
        assert_eq!(
            Maze::parse("####\n#Px#\n####"),
            Err(MazeError::UnknownCharacter { ch: 'x', x: 2, y: 1 })
        );
        assert_eq!(Maze::parse("####\n#..#\n####"), Err(MazeError::NoStart));
        assert_eq!(Maze::parse("####\n#PP#\n####"), Err(MazeError::SeveralStarts));
    }

    #[test]
    fn parse_small_maze() {
        let maze = Maze::parse("\n#####\n#Po.#\n#G  #\n#####\n").unwrap();
        assert_eq!((maze.width(), maze.height()), (5, 4));
        assert_eq!(maze.pacman_start, (1, 1));
        assert_eq!(maze.ghost_spawns, vec![(1, 2)]);
        assert_eq!(maze.get(2, 1), Tile::PowerUp);
        assert_eq!(maze.get(1, 2), Tile::Pellet);
        assert_eq!(maze.get(2, 2), Tile::Empty);
        assert_eq!(maze.count(Tile::Pellet), 2);
    }
}
