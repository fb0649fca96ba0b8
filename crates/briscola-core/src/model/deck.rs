use crate::model::card::{Card, DECK_SIZE};
use crate::model::hand::{HAND_SIZE, Hand};
use crate::model::player::PLAYER_COUNT;
use crate::model::set;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Every card once, `card[i] = (i % 10, i / 10)`.
    pub fn ordered() -> Self {
        let cards = (0..DECK_SIZE).filter_map(Card::from_index).collect();
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn total_points(&self) -> u32 {
        set::score(&self.cards)
    }

    /// First eight cards to seat 0, the next eight to seat 1, and so on.
    pub fn deal(&self) -> [Hand; PLAYER_COUNT] {
        std::array::from_fn(|seat| {
            let start = seat * HAND_SIZE;
            Hand::with_cards(self.cards.iter().skip(start).take(HAND_SIZE).copied())
        })
    }
}
