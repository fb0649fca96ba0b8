use crate::calling::{Bid, BidContext, BidRejection};
use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use std::fmt;

/// Feedback sent back to a policy whose choice was refused. The same question
/// is asked again afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Bid(BidRejection),
    CardNotHeld(Card),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Bid(reason) => write!(f, "invalid call: {reason}"),
            Rejection::CardNotHeld(card) => write!(f, "card {card} is not in hand"),
        }
    }
}

#[derive(Debug)]
pub enum PolicyError {
    /// The input source ended before an answer was given.
    InputClosed,
    /// Asked to play with nothing left in hand.
    EmptyHand,
    Io(std::io::Error),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::InputClosed => write!(f, "input closed before a choice was made"),
            PolicyError::EmptyHand => write!(f, "no card left to play"),
            PolicyError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for PolicyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PolicyError::Io(err) => Some(err),
            PolicyError::InputClosed | PolicyError::EmptyHand => None,
        }
    }
}

impl From<std::io::Error> for PolicyError {
    fn from(value: std::io::Error) -> Self {
        PolicyError::Io(value)
    }
}

/// Decision maker for one seat: automated search or a person at a console.
pub trait Policy {
    /// Next bid during calling.
    fn choose_bid(&mut self, ctx: &BidContext<'_>) -> Result<Bid, PolicyError>;

    /// Trump suit for a winning call that was made without one.
    fn choose_trump(&mut self, ctx: &BidContext<'_>, rank: Rank) -> Result<Suit, PolicyError>;

    /// Card to play; `state` is seen from this seat.
    fn choose_play(&mut self, state: &GameState) -> Result<Card, PolicyError>;

    fn rejected(&mut self, _rejection: &Rejection) {}
}
