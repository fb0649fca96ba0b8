use crate::model::card::Card;
use crate::model::set;
use crate::model::suit::Suit;
use arrayvec::ArrayVec;

pub const HAND_SIZE: usize = 8;

/// Cards held by one player in deal order. Slot indices are stable apart from
/// shifting down when an earlier card leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: ArrayVec<Card, HAND_SIZE>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: ArrayVec::new(),
        }
    }

    /// Builds a hand from at most [`HAND_SIZE`] cards; extra cards are ignored.
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().take(HAND_SIZE).collect(),
        }
    }

    pub fn add(&mut self, card: Card) -> bool {
        self.cards.try_push(card).is_ok()
    }

    pub fn insert(&mut self, index: usize, card: Card) {
        self.cards.insert(index, card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        match self.position(card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Card {
        self.cards.remove(index)
    }

    pub fn position(&self, card: Card) -> Option<usize> {
        set::contains(&self.cards, card)
    }

    pub fn contains(&self, card: Card) -> bool {
        self.position(card).is_some()
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn points(&self) -> u32 {
        set::score(&self.cards)
    }

    pub fn count_of_suit(&self, suit: Suit) -> usize {
        set::count_of_suit(&self.cards, suit)
    }

    /// Cards ordered by suit then rank, for display.
    pub fn sorted(&self) -> Vec<Card> {
        let mut cards = self.cards.to_vec();
        cards.sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
        cards
    }
}
