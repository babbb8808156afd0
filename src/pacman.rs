/*
pacman.rs

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

//! Pac-Man engine.
//!
//! Pac-Man moves one cell each time the player presses a direction key. The ghosts move on a
//! timer: the caller invokes [`PacManGame::tick`] every [`TICK_INTERVAL`], and the ghosts move
//! every other tick.
//!
//! Eating the power-up makes the ghosts vulnerable for a while. Pac-Man can then eat them, and
//! they go back to their starting position. Touching a ghost that is not vulnerable ends the
//! game. The game is won when all the pellets are eaten.

pub mod maze;

use log::debug;
use rand::Rng;
use std::time::{Duration, Instant};

use maze::{Maze, Tile};

/// Interval between two calls to [`PacManGame::tick`].
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Points for a pellet.
pub const PELLET_POINTS: i64 = 1;

/// Points for the power-up.
pub const POWER_UP_POINTS: i64 = 5;

/// Points for eating a vulnerable ghost.
pub const GHOST_POINTS: i64 = 10;

/// Number of ticks during which the ghosts stay vulnerable after Pac-Man eats the power-up.
pub const POWER_DURATION: u32 = 30;

/// The ghosts move every `GHOST_MOVE_INTERVAL` ticks.
pub const GHOST_MOVE_INTERVAL: u32 = 2;

/// Chance, in percent, that a ghost chases Pac-Man instead of moving at random.
const CHASE_PERCENT: u32 = 60;

/// Chance, in percent, that a vulnerable ghost moves at random instead of fleeing.
const FLEE_RANDOM_PERCENT: u32 = 30;

/// Movement direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Return the position one cell away in this direction, or None when leaving the grid on
    /// the top or the left.
    pub fn step(self, (x, y): (usize, usize)) -> Option<(usize, usize)> {
        let (dx, dy) = self.delta();
        Some((x.checked_add_signed(dx)?, y.checked_add_signed(dy)?))
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Return the direction that brings `from` closer to `target`.
///
/// The ghost moves along the axis where the distance is the largest. When both distances are
/// equal, the ghost moves vertically.
pub fn chase_direction(from: (usize, usize), target: (usize, usize)) -> Direction {
    if from.0.abs_diff(target.0) > from.1.abs_diff(target.1) {
        if target.0 > from.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if target.1 > from.1 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Return the direction that brings `from` away from `target`, along the same axis as
/// [`chase_direction`].
pub fn flee_direction(from: (usize, usize), target: (usize, usize)) -> Direction {
    if from.0.abs_diff(target.0) > from.1.abs_diff(target.1) {
        if target.0 > from.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if target.1 > from.1 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Status of the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Ghost object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ghost {
    pub x: usize,
    pub y: usize,

    /// Starting position. The ghost goes back there when Pac-Man eats it.
    spawn: (usize, usize),

    /// Whether Pac-Man can eat the ghost.
    pub vulnerable: bool,
}

impl Ghost {
    fn new((x, y): (usize, usize)) -> Self {
        Self {
            x,
            y,
            spawn: (x, y),
            vulnerable: false,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Select the next direction of the ghost.
    fn next_direction<R: Rng + ?Sized>(&self, pacman: (usize, usize), rng: &mut R) -> Direction {
        if self.vulnerable {
            if rng.random_range(0..100) < FLEE_RANDOM_PERCENT {
                Direction::random(rng)
            } else {
                flee_direction(self.position(), pacman)
            }
        } else if rng.random_range(0..100) < CHASE_PERCENT {
            chase_direction(self.position(), pacman)
        } else {
            Direction::random(rng)
        }
    }
}

/// Manage the status of a Pac-Man game.
#[derive(Debug, Clone)]
pub struct PacManGame {
    maze: Maze,
    pacman: (usize, usize),
    ghosts: Vec<Ghost>,
    score: i64,

    /// Number of pellets left in the maze. The power-up does not count.
    pellets: usize,

    /// Number of ticks before the ghosts stop being vulnerable.
    power_ticks: u32,

    /// Number of ticks since the ghosts last moved.
    ghost_ticks: u32,

    paused: bool,
    outcome: Outcome,
    start_time: Instant,

    /// The elapsed time when the player paused the game or when the game ended.
    pause_duration: Option<Duration>,
}

impl PacManGame {
    /// Start a game in the built-in maze.
    pub fn new() -> Self {
        Self::new_with(&mut rand::rng())
    }

    /// Start a game in the built-in maze. The random number generator places the power-up.
    pub fn new_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut maze: Maze = Maze::builtin();
        if let Some((x, y)) = maze.place_power_up(rng) {
            debug!("Power-up at ({x}, {y})");
        }
        Self::from_maze(maze)
    }

    /// Start a game in the given maze.
    pub fn from_maze(maze: Maze) -> Self {
        let ghosts: Vec<Ghost> = maze.ghost_spawns.iter().map(|s| Ghost::new(*s)).collect();
        Self {
            pacman: maze.pacman_start,
            pellets: maze.count(Tile::Pellet),
            maze,
            ghosts,
            score: 0,
            power_ticks: 0,
            ghost_ticks: 0,
            paused: false,
            outcome: Outcome::Playing,
            start_time: Instant::now(),
            pause_duration: None,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Position of Pac-Man.
    pub fn pacman(&self) -> (usize, usize) {
        self.pacman
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets
    }

    /// Whether the ghosts are vulnerable.
    pub fn is_powered(&self) -> bool {
        self.power_ticks > 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn is_running(&self) -> bool {
        !self.paused && self.outcome == Outcome::Playing
    }

    /// Move Pac-Man one cell in the given direction.
    ///
    /// Return whether Pac-Man moved. Walls block the move, and nothing happens when the game is
    /// paused or over.
    pub fn move_pacman(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some((x, y)) = direction.step(self.pacman) else {
            return false;
        };
        if self.maze.is_wall(x, y) {
            return false;
        }
        self.pacman = (x, y);

        match self.maze.get(x, y) {
            Tile::Pellet => {
                self.maze.set(x, y, Tile::Empty);
                self.pellets -= 1;
                self.score += PELLET_POINTS;
            }
            Tile::PowerUp => {
                self.maze.set(x, y, Tile::Empty);
                self.score += POWER_UP_POINTS;
                self.power_ticks = POWER_DURATION;
                for ghost in self.ghosts.iter_mut() {
                    ghost.vulnerable = true;
                }
                debug!("Power-up eaten: the ghosts are vulnerable");
            }
            _ => (),
        }
        self.check_collisions();
        true
    }

    /// Advance the game by one tick.
    ///
    /// The caller must invoke the method every [`TICK_INTERVAL`].
    pub fn tick(&mut self) -> Outcome {
        self.tick_with(&mut rand::rng())
    }

    /// Advance the game by one tick, by using the given random number generator for moving the
    /// ghosts.
    pub fn tick_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome {
        if !self.is_running() {
            return self.outcome;
        }

        self.ghost_ticks += 1;
        if self.ghost_ticks >= GHOST_MOVE_INTERVAL {
            self.ghost_ticks = 0;
            self.move_ghosts(rng);
            self.check_collisions();
        }

        if self.power_ticks > 0 {
            self.power_ticks -= 1;
            if self.power_ticks == 0 {
                for ghost in self.ghosts.iter_mut() {
                    ghost.vulnerable = false;
                }
            }
        }

        if self.outcome == Outcome::Playing && self.pellets == 0 {
            self.end(Outcome::Won);
        }
        self.outcome
    }

    fn move_ghosts<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for ghost in self.ghosts.iter_mut() {
            let direction: Direction = ghost.next_direction(self.pacman, rng);
            if let Some((x, y)) = direction.step(ghost.position())
                && !self.maze.is_wall(x, y)
            {
                ghost.x = x;
                ghost.y = y;
            }
        }
    }

    /// Process the ghosts at the position of Pac-Man.
    fn check_collisions(&mut self) {
        let mut caught: bool = false;
        for ghost in self.ghosts.iter_mut() {
            if ghost.position() != self.pacman {
                continue;
            }
            if ghost.vulnerable {
                self.score += GHOST_POINTS;
                (ghost.x, ghost.y) = ghost.spawn;
                ghost.vulnerable = false;
            } else {
                caught = true;
                break;
            }
        }
        if caught {
            self.end(Outcome::Lost);
        }
    }

    fn end(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        if self.pause_duration.is_none() {
            self.pause_duration = Some(self.start_time.elapsed());
        }
        debug!("Pac-Man game over: {outcome:?} with {} points", self.score);
    }

    /// Pause or resume the game.
    pub fn toggle_pause(&mut self) {
        if self.outcome != Outcome::Playing {
            return;
        }
        if self.paused {
            // Refresh the game elapsed time by removing the pause time.
            if let Some(d) = self.pause_duration {
                self.start_time += self.start_time.elapsed() - d;
                self.pause_duration = None;
            }
            self.paused = false;
        } else {
            self.pause_duration = Some(self.start_time.elapsed());
            self.paused = true;
        }
    }

    /// Return the game duration. The timer stops during pauses and when the game ends.
    pub fn get_duration(&self) -> Duration {
        match self.pause_duration {
            Some(d) => d,
            None => self.start_time.elapsed(),
        }
    }
}

impl Default for PacManGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(ascii: &str) -> PacManGame {
        PacManGame::from_maze(Maze::parse(ascii).unwrap())
    }

    #[test]
    fn new_game() {
        let g = PacManGame::new_with(&mut StdRng::seed_from_u64(2));
        assert_eq!(g.pacman(), (10, 5));
        assert_eq!(g.ghosts().len(), 3);
        assert_eq!(g.pellets_left(), 134);
        assert_eq!(g.maze().count(Tile::PowerUp), 1);
        assert_eq!(g.score(), 0);
        assert_eq!(g.outcome(), Outcome::Playing);
    }

    #[test]
    fn walls_block_pacman() {
        let mut g = game("####\n#P.#\n####");
        assert!(!g.move_pacman(Direction::Up));
        assert!(!g.move_pacman(Direction::Left));
        assert_eq!(g.pacman(), (1, 1));
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn pellets_score_once() {
        let mut g = game("#####\n#P..#\n#####");
        assert!(g.move_pacman(Direction::Right));
        assert_eq!(g.score(), PELLET_POINTS);
        assert_eq!(g.pellets_left(), 1);

        g.move_pacman(Direction::Left);
        g.move_pacman(Direction::Right);
        assert_eq!(g.score(), PELLET_POINTS);
    }

    #[test]
    fn power_up_makes_ghosts_vulnerable() {
        // The ghost is walled in so that it cannot move
        let mut g = game("#######\n#Po.#G#\n#######");
        g.move_pacman(Direction::Right);
        assert_eq!(g.score(), POWER_UP_POINTS);
        assert!(g.is_powered());
        assert!(g.ghosts()[0].vulnerable);

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..POWER_DURATION - 1 {
            g.tick_with(&mut rng);
        }
        assert!(g.ghosts()[0].vulnerable);
        g.tick_with(&mut rng);
        assert!(!g.is_powered());
        assert!(!g.ghosts()[0].vulnerable);
    }

    #[test]
    fn touching_a_ghost_loses() {
        let mut g = game("#####\n#PG.#\n#####");
        assert!(g.move_pacman(Direction::Right));
        assert_eq!(g.outcome(), Outcome::Lost);

        // Nothing happens after the end of the game
        assert!(!g.move_pacman(Direction::Right));
        assert_eq!(g.tick_with(&mut StdRng::seed_from_u64(0)), Outcome::Lost);
    }

    #[test]
    fn eating_a_vulnerable_ghost() {
        let mut g = game("######\n#oPG.#\n######");
        g.move_pacman(Direction::Left);
        assert!(g.ghosts()[0].vulnerable);

        // Put the ghost next to Pac-Man, away from its spawn
        g.ghosts[0].x = 2;
        g.move_pacman(Direction::Right);
        assert_eq!(g.outcome(), Outcome::Playing);
        assert_eq!(g.score(), POWER_UP_POINTS + GHOST_POINTS);
        assert_eq!(g.ghosts()[0].position(), (3, 1));
        assert!(!g.ghosts()[0].vulnerable);
    }

    #[test]
    fn ghosts_move_every_other_tick() {
        // The only free cell for the ghost is on its right
        let mut g = game("########\n#P###G #\n########");
        let mut rng = StdRng::seed_from_u64(5);
        let start = g.ghosts()[0].position();

        g.tick_with(&mut rng);
        assert_eq!(g.ghosts()[0].position(), start);

        let mut moved = false;
        for _ in 0..400 {
            g.tick_with(&mut rng);
            let pos = g.ghosts()[0].position();
            assert!(pos == start || pos == (6, 1));
            moved |= pos != start;
        }
        assert!(moved);
    }

    #[test]
    fn ghosts_never_enter_walls() {
        let mut g = PacManGame::new_with(&mut StdRng::seed_from_u64(3));
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..500 {
            if g.tick_with(&mut rng) != Outcome::Playing {
                break;
            }
            for ghost in g.ghosts() {
                assert!(!g.maze().is_wall(ghost.x, ghost.y));
            }
        }
    }

    #[test]
    fn eating_the_last_pellet_wins_on_the_next_tick() {
        let mut g = game("####\n#P.#\n####");
        g.move_pacman(Direction::Right);
        assert_eq!(g.pellets_left(), 0);
        assert_eq!(g.tick_with(&mut StdRng::seed_from_u64(0)), Outcome::Won);
    }

    #[test]
    fn pause_freezes_the_game() {
        let mut g = game("#####\n#P..#\n#####");
        g.toggle_pause();
        assert!(g.is_paused());
        assert!(!g.move_pacman(Direction::Right));
        let d = g.get_duration();
        assert_eq!(g.tick_with(&mut StdRng::seed_from_u64(0)), Outcome::Playing);
        assert_eq!(g.get_duration(), d);

        g.toggle_pause();
        assert!(!g.is_paused());
        assert!(g.move_pacman(Direction::Right));
    }

    #[test]
    fn chase_and_flee() {
        assert_eq!(chase_direction((1, 1), (5, 2)), Direction::Right);
        assert_eq!(chase_direction((5, 1), (1, 2)), Direction::Left);
        assert_eq!(chase_direction((1, 1), (2, 5)), Direction::Down);
        assert_eq!(chase_direction((1, 5), (2, 1)), Direction::Up);
        // Same distance on both axes: vertical move
        assert_eq!(chase_direction((1, 1), (3, 3)), Direction::Down);

        assert_eq!(flee_direction((1, 1), (5, 2)), Direction::Left);
        assert_eq!(flee_direction((5, 1), (1, 2)), Direction::Right);
        assert_eq!(flee_direction((1, 1), (2, 5)), Direction::Up);
        assert_eq!(flee_direction((1, 5), (2, 1)), Direction::Down);
    }

    #[test]
    fn step_stops_at_the_grid_origin() {
        assert_eq!(Direction::Up.step((0, 0)), None);
        assert_eq!(Direction::Left.step((0, 3)), None);
        assert_eq!(Direction::Right.step((0, 3)), Some((1, 3)));
    }
}
