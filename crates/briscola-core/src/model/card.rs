use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Decodes the two-digit `VS` form: value digit first, suit digit second.
    pub fn from_code(code: u32) -> Option<Self> {
        if code > 99 {
            return None;
        }
        let rank = Rank::from_value((code / 10) as u8)?;
        let suit = Suit::from_index((code % 10) as usize)?;
        Some(Self::new(rank, suit))
    }

    pub const fn code(self) -> u32 {
        self.rank.value() as u32 * 10 + self.suit as u32
    }

    /// Dense index into the ordered deck, where `card[i] = (i % 10, i / 10)`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= DECK_SIZE {
            return None;
        }
        let rank = Rank::from_value((index % 10) as u8)?;
        let suit = Suit::from_index(index / 10)?;
        Some(Self::new(rank, suit))
    }

    pub const fn index(self) -> usize {
        self.suit as usize * 10 + self.rank as usize
    }

    pub const fn points(self) -> u32 {
        self.rank.points()
    }

    /// Whether this card takes `other` when both are of the same suit.
    pub fn outranks(self, other: Card) -> bool {
        self.suit == other.suit && self.rank > other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.value(), self.suit as u8)
    }
}
