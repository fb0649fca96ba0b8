//! Queries over ordered card collections: hands, piles, the unseen pool and
//! the tabled buffer all share these.

use crate::model::card::Card;
use crate::model::suit::Suit;

/// Total points held in `cards`.
pub fn score(cards: &[Card]) -> u32 {
    cards.iter().map(|card| card.points()).sum()
}

/// Index of the first occurrence of `card`.
pub fn contains(cards: &[Card], card: Card) -> Option<usize> {
    cards.iter().position(|&c| c == card)
}

/// Index of the strongest card of `suit`; the earliest wins among equals.
pub fn highest_of_suit(cards: &[Card], suit: Suit) -> Option<usize> {
    let mut best: Option<(usize, Card)> = None;
    for (index, &card) in cards.iter().enumerate() {
        if card.suit != suit {
            continue;
        }
        match best {
            Some((_, current)) if !card.outranks(current) => {}
            _ => best = Some((index, card)),
        }
    }
    best.map(|(index, _)| index)
}

pub fn count_of_suit(cards: &[Card], suit: Suit) -> usize {
    cards.iter().filter(|card| card.suit == suit).count()
}
