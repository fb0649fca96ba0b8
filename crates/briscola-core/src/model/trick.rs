use crate::model::card::Card;
use crate::model::player::{PLAYER_COUNT, PlayerPosition};
use crate::model::set;
use crate::model::suit::Suit;
use arrayvec::ArrayVec;
use std::fmt;

/// The tabled buffer: cards of the trick in progress, indexed by turn order
/// starting from the leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    leader: PlayerPosition,
    cards: ArrayVec<Card, PLAYER_COUNT>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            cards: ArrayVec::new(),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards already tabled, which is also the turn index of the
    /// next player.
    pub fn turn(&self) -> usize {
        self.cards.len()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == PLAYER_COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.cards.first().map(|card| card.suit)
    }

    pub fn seat_to_play(&self) -> PlayerPosition {
        self.leader.offset(self.turn())
    }

    pub fn play(&mut self, card: Card) -> Result<(), TrickError> {
        self.cards
            .try_push(card)
            .map_err(|_| TrickError::TrickComplete)
    }

    /// Drops the most recently tabled card.
    pub fn unplay(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Relative slot holding the winning card: the highest trump if any trump
    /// was tabled, otherwise the highest card of the led suit.
    pub fn winning_slot(&self, trump: Suit) -> Option<usize> {
        set::highest_of_suit(&self.cards, trump)
            .or_else(|| set::highest_of_suit(&self.cards, self.lead_suit()?))
    }

    pub fn winner(&self, trump: Suit) -> Option<PlayerPosition> {
        let slot = self.winning_slot(trump)?;
        Some(self.leader.offset(slot))
    }

    pub fn points(&self) -> u32 {
        set::score(&self.cards)
    }

    /// Empties the buffer and hands the next trick's lead to `next_leader`.
    pub fn reset(&mut self, next_leader: PlayerPosition) -> Trick {
        std::mem::replace(self, Trick::new(next_leader))
    }
}
