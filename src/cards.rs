/*
cards.rs

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

//! Playing cards.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Lowest rank (Ace).
pub const ACE: u8 = 1;

/// Highest rank (King).
pub const KING: u8 = 13;

/// Rank labels, indexed by `rank - 1`.
const LABELS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Return the rank (1 to 13) of a card label, or None for an unknown label.
///
/// `"A"` is 1, `"2"` to `"10"` are their number, `"J"` is 11, `"Q"` is 12, and `"K"` is 13.
pub fn card_value(label: &str) -> Option<u8> {
    LABELS
        .iter()
        .position(|l| *l == label)
        .map(|i| i as u8 + ACE)
}

/// Card suit.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// Symbol of the suit.
    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// Number of suits in a Spider Solitaire deck.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SuitCount {
    #[default]
    One,
    Two,
    Four,
}

impl SuitCount {
    /// Return the suits in use, in the order spades, hearts, diamonds, clubs.
    pub fn suits(&self) -> Vec<Suit> {
        let n: u8 = match self {
            SuitCount::One => 1,
            SuitCount::Two => 2,
            SuitCount::Four => 4,
        };
        (0..n).filter_map(Suit::from_repr).collect()
    }

    /// Build a suit count from the number of suits (1, 2, or 4).
    pub fn from_number(n: usize) -> Option<Self> {
        match n {
            1 => Some(SuitCount::One),
            2 => Some(SuitCount::Two),
            4 => Some(SuitCount::Four),
            _ => None,
        }
    }
}

/// Card object.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,

    /// Rank, from 1 (Ace) to 13 (King).
    pub rank: u8,
}

impl Card {
    pub fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }

    /// Label of the card rank ("A", "2", ..., "10", "J", "Q", "K").
    pub fn label(&self) -> &'static str {
        LABELS
            .get(usize::from(self.rank.saturating_sub(ACE)))
            .copied()
            .unwrap_or("?")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.label(), self.suit.symbol())
    }
}
