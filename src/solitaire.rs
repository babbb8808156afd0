/*
solitaire.rs

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

//! Spider Solitaire engine.
//!
//! The game uses two decks (104 cards) dealt over ten columns. The player moves runs of cards
//! in descending order from one column to another. A column that ends with a complete run from
//! King to Ace of the same suit is cleared, and the game is won when all the cards are cleared.
//!
//! All the cards are face up.
//!
//! Scoring:
//!
//! - The game starts with 500 points.
//! - Each move costs one point, and dealing from the stock costs five points.
//! - A completed run earns 100 points.
//! - Undoing a move refunds its point.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

use crate::cards::{ACE, Card, KING, SuitCount};

/// Number of tableau columns.
pub const NUM_COLUMNS: usize = 10;

/// Number of cards in the game (two decks).
pub const DECK_SIZE: usize = 104;

/// Number of cards in a completed run (King to Ace).
pub const RUN_LENGTH: usize = 13;

/// The first columns receive one more card than the others when the game starts.
const LONG_COLUMNS: usize = 4;
const LONG_COLUMN_CARDS: usize = 6;
const SHORT_COLUMN_CARDS: usize = 5;

/// Score at the beginning of the game.
pub const INITIAL_SCORE: i64 = 500;

/// Cost of a move.
pub const MOVE_COST: i64 = 1;

/// Cost of dealing a row of cards from the stock.
pub const DEAL_COST: i64 = 5;

/// Bonus for a completed run.
pub const RUN_BONUS: i64 = 100;

/// Number of moves that can be undone.
pub const HISTORY_SIZE: usize = 5;

/// Whether the cards form a run that can be moved as a unit.
///
/// The ranks must decrease by exactly one from each card to the next. Suits are ignored. A
/// single card is always a run, an empty slice never is.
pub fn can_move_run(cards: &[Card]) -> bool {
    !cards.is_empty() && cards.windows(2).all(|w| w[0].rank == w[1].rank + 1)
}

/// Whether the cards are a complete run, from King to Ace, of the same suit.
pub fn is_complete_run(cards: &[Card]) -> bool {
    let Some(first) = cards.first() else {
        return false;
    };
    cards.len() == RUN_LENGTH
        && first.rank == KING
        && can_move_run(cards)
        && cards.iter().all(|c| c.suit == first.suit)
}

/// Build and shuffle the 104 cards for the given number of suits.
pub fn new_deck<R: Rng + ?Sized>(suit_count: SuitCount, rng: &mut R) -> Vec<Card> {
    let suits = suit_count.suits();
    let copies: usize = DECK_SIZE / RUN_LENGTH / suits.len();
    let mut deck: Vec<Card> = Vec::with_capacity(DECK_SIZE);

    for suit in suits {
        for _ in 0..copies {
            for rank in ACE..=KING {
                deck.push(Card::new(suit, rank));
            }
        }
    }
    deck.shuffle(rng);
    deck
}

/// Type of errors when moving cards.
#[derive(Debug, PartialEq)]
pub enum MoveError {
    /// The column index is out of range.
    InvalidColumn,

    /// The source and destination columns are the same.
    SameColumn,

    /// The start index is beyond the end of the source column.
    InvalidStart,

    /// The cards from the start index are not in descending order.
    NotARun,

    /// The last card of the destination column is not one rank above the moved card.
    RankMismatch,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::InvalidColumn => write!(f, "no such column"),
            MoveError::SameColumn => write!(f, "the cards are already in that column"),
            MoveError::InvalidStart => write!(f, "no card at that position"),
            MoveError::NotARun => write!(f, "the cards are not in descending order"),
            MoveError::RankMismatch => write!(f, "the cards do not fit on that column"),
        }
    }
}

impl Error for MoveError {}

/// Type of errors when dealing from the stock.
#[derive(Debug, PartialEq)]
pub enum DealError {
    /// The stock is empty.
    EmptyStock,

    /// The stock does not have a card for every column.
    NotEnoughCards,
}

impl fmt::Display for DealError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DealError::EmptyStock => write!(f, "the stock is empty"),
            DealError::NotEnoughCards => write!(f, "not enough cards in the stock"),
        }
    }
}

impl Error for DealError {}

/// Move of the cards from index `start` in column `from` to the end of column `to`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub start: usize,
    pub to: usize,
}

/// Undo record.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryEntry {
    mv: Move,

    /// Moved cards.
    cards: Vec<Card>,
}

/// Spider Solitaire game.
#[derive(Debug, Clone)]
pub struct SpiderGame {
    /// Tableau columns. The last card of a column is the card on top.
    columns: Vec<Vec<Card>>,

    /// Cards not dealt yet. Cards are dealt from the end.
    stock: Vec<Card>,

    score: i64,
    moves: u32,

    /// Number of completed runs that have been removed.
    completed: u32,

    /// Last moves, the most recent at the back.
    history: VecDeque<HistoryEntry>,

    start_time: Instant,

    /// Game duration, set when the game is won.
    end_duration: Option<Duration>,
}

impl SpiderGame {
    /// Start a game with the given number of suits.
    pub fn deal(suit_count: SuitCount) -> Self {
        Self::deal_with(suit_count, &mut rand::rng())
    }

    /// Start a game with the given number of suits and random number generator.
    pub fn deal_with<R: Rng + ?Sized>(suit_count: SuitCount, rng: &mut R) -> Self {
        let mut deck: Vec<Card> = new_deck(suit_count, rng);
        let mut columns: Vec<Vec<Card>> = Vec::with_capacity(NUM_COLUMNS);

        for col in 0..NUM_COLUMNS {
            let n: usize = if col < LONG_COLUMNS {
                LONG_COLUMN_CARDS
            } else {
                SHORT_COLUMN_CARDS
            };
            columns.push(deck.split_off(deck.len() - n));
        }
        debug!(
            "Spider Solitaire dealt with {:?} suits: {} cards in stock",
            suit_count,
            deck.len()
        );
        Self::from_layout(columns, deck)
    }

    /// Create a game from the given columns and stock.
    ///
    /// The stock is dealt from its end.
    pub fn from_layout(columns: Vec<Vec<Card>>, stock: Vec<Card>) -> Self {
        Self {
            columns,
            stock,
            score: INITIAL_SCORE,
            moves: 0,
            completed: 0,
            history: VecDeque::with_capacity(HISTORY_SIZE),
            start_time: Instant::now(),
            end_duration: None,
        }
    }

    pub fn columns(&self) -> &[Vec<Card>] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&[Card]> {
        self.columns.get(index).map(|c| c.as_slice())
    }

    /// Number of cards left in the stock.
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Number of completed runs that have been removed from the tableau.
    pub fn completed_runs(&self) -> u32 {
        self.completed
    }

    /// Number of moves that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Return the game duration. The timer stops when the game is won.
    pub fn get_duration(&self) -> Duration {
        self.end_duration.unwrap_or_else(|| self.start_time.elapsed())
    }

    /// Whether the run can be put at the end of the given column.
    fn fits(&self, run: &[Card], to: usize) -> bool {
        match (self.columns[to].last(), run.first()) {
            (None, Some(_)) => true,
            (Some(top), Some(first)) => top.rank == first.rank + 1,
            _ => false,
        }
    }

    /// Verify that the cards from `start` in column `from` can be moved to column `to`.
    pub fn check_move(&self, from: usize, start: usize, to: usize) -> Result<(), MoveError> {
        if from >= self.columns.len() || to >= self.columns.len() {
            return Err(MoveError::InvalidColumn);
        }
        if from == to {
            return Err(MoveError::SameColumn);
        }
        let run: &[Card] = self.columns[from]
            .get(start..)
            .filter(|r| !r.is_empty())
            .ok_or(MoveError::InvalidStart)?;
        if !can_move_run(run) {
            return Err(MoveError::NotARun);
        }
        if !self.fits(run, to) {
            return Err(MoveError::RankMismatch);
        }
        Ok(())
    }

    /// Move the cards from index `start` in column `from` to the end of column `to`.
    ///
    /// # Errors
    ///
    /// The game is not modified when the move is not allowed.
    pub fn move_run(&mut self, from: usize, start: usize, to: usize) -> Result<(), MoveError> {
        self.check_move(from, start, to)?;

        let cards: Vec<Card> = self.columns[from].split_off(start);
        self.columns[to].extend_from_slice(&cards);
        self.moves += 1;
        self.score -= MOVE_COST;

        if self.history.len() == HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            mv: Move { from, start, to },
            cards,
        });

        self.detect_completed_run(to);
        Ok(())
    }

    /// Deal one card from the stock to every column.
    ///
    /// # Errors
    ///
    /// The game is not modified when the stock is empty or does not have enough cards.
    pub fn deal_from_stock(&mut self) -> Result<(), DealError> {
        if self.stock.is_empty() {
            return Err(DealError::EmptyStock);
        }
        if self.stock.len() < self.columns.len() {
            return Err(DealError::NotEnoughCards);
        }
        for column in self.columns.iter_mut() {
            if let Some(card) = self.stock.pop() {
                column.push(card);
            }
        }
        self.score -= DEAL_COST;
        self.moves += 1;
        self.history.clear();

        for col in 0..self.columns.len() {
            self.detect_completed_run(col);
        }
        debug!("Dealt from the stock: {} cards left", self.stock.len());
        Ok(())
    }

    /// Remove the last 13 cards of the column if they form a complete run.
    ///
    /// Return whether a run was removed.
    pub fn detect_completed_run(&mut self, col: usize) -> bool {
        let Some(column) = self.columns.get_mut(col) else {
            return false;
        };
        if column.len() < RUN_LENGTH || !is_complete_run(&column[column.len() - RUN_LENGTH..]) {
            return false;
        }
        column.truncate(column.len() - RUN_LENGTH);
        self.score += RUN_BONUS;
        self.completed += 1;
        // The removed cards cannot come back
        self.history.clear();
        debug!("Completed run in column {col}");

        if self.is_won() && self.end_duration.is_none() {
            self.end_duration = Some(self.start_time.elapsed());
        }
        true
    }

    /// Undo the last move.
    ///
    /// The move cost is refunded, and undoing counts as a move. Return the undone move, or None
    /// if there is nothing to undo.
    pub fn undo(&mut self) -> Option<Move> {
        let entry: HistoryEntry = self.history.pop_back()?;
        let Move { from, start, to } = entry.mv;

        let dest: &mut Vec<Card> = &mut self.columns[to];
        dest.truncate(dest.len().saturating_sub(entry.cards.len()));

        let src: &mut Vec<Card> = &mut self.columns[from];
        let at: usize = start.min(src.len());
        src.splice(at..at, entry.cards);

        self.score += MOVE_COST;
        self.moves += 1;
        Some(entry.mv)
    }

    /// Return the first allowed move, or None if no card can move.
    ///
    /// Source columns are scanned from left to right, and in each column the runs are tried
    /// from the deepest card. Destination columns are then scanned from left to right.
    pub fn hint(&self) -> Option<Move> {
        for from in 0..self.columns.len() {
            for start in 0..self.columns[from].len() {
                if !can_move_run(&self.columns[from][start..]) {
                    continue;
                }
                for to in 0..self.columns.len() {
                    if to != from && self.fits(&self.columns[from][start..], to) {
                        return Some(Move { from, start, to });
                    }
                }
            }
        }
        None
    }

    /// Whether all the cards have been cleared.
    pub fn is_won(&self) -> bool {
        self.stock.is_empty() && self.columns.iter().all(|c| c.is_empty())
    }
}
