use super::state::GameState;
use crate::model::card::Card;
use crate::model::player::{PLAYER_COUNT, PlayerPosition};
use crate::model::suit::Suit;
use crate::model::team::Team;
use serde::{Deserialize, Serialize};

/// Read-only dump of a [`GameState`] with cards in their two-digit code form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateSnapshot {
    pub pov: PlayerPosition,
    pub trump: Suit,
    pub starting: PlayerPosition,
    pub turn: usize,
    pub cards_played: usize,
    pub hand: Vec<u32>,
    pub tabled: Vec<u32>,
    pub remaining: Vec<u32>,
    pub teams: [Team; PLAYER_COUNT],
    pub taken_points: [u32; PLAYER_COUNT],
}

fn codes(cards: &[Card]) -> Vec<u32> {
    cards.iter().map(|card| card.code()).collect()
}

impl StateSnapshot {
    pub fn capture(state: &GameState) -> Self {
        StateSnapshot {
            pov: state.pov(),
            trump: state.trump(),
            starting: state.starting(),
            turn: state.turn(),
            cards_played: state.num_cards_played(),
            hand: codes(state.hand().cards()),
            tabled: codes(state.trick().cards()),
            remaining: codes(state.remaining()),
            teams: *state.teams(),
            taken_points: std::array::from_fn(|i| state.taken_points(PlayerPosition::LOOP[i])),
        }
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
