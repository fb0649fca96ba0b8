use super::state::{GameState, Move};
use crate::calling::Call;
use crate::model::card::{Card, DECK_SIZE};
use crate::model::hand::Hand;
use crate::model::player::{PLAYER_COUNT, Player, PlayerPosition};
use crate::model::set;
use crate::model::trick::{Trick, TrickError};
use std::fmt;

/// The authoritative table after calling: the real hands plus a
/// [`GameState`] whose point of view always follows the seat on move.
#[derive(Debug, Clone)]
pub struct Round {
    players: [Player; PLAYER_COUNT],
    state: GameState,
    call: Call,
    caller: PlayerPosition,
    trick_history: Vec<CompletedTrick>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub winner: PlayerPosition,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: PlayerPosition, points: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    GameOver,
    CardNotInHand(Card),
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::GameOver => write!(f, "all cards have been played"),
            PlayError::CardNotInHand(card) => write!(f, "card {card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "{actual} played out of turn, {expected} is on move")
            }
            PlayError::Trick(err) => write!(f, "trick rejected the card: {err}"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Trick(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TrickError> for PlayError {
    fn from(err: TrickError) -> Self {
        PlayError::Trick(err)
    }
}

/// A broken card-accounting rule, reported by [`Round::verify_conservation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationError {
    /// A card is not in exactly one of pool, table or taken piles.
    Misplaced { card: Card, copies: usize },
    HandsDisagreeWithPool,
    PlayedLogMismatch,
    StaleCache,
    PovHandMismatch,
}

impl fmt::Display for ConservationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConservationError::Misplaced { card, copies } => {
                write!(f, "card {card} is held {copies} times")
            }
            ConservationError::HandsDisagreeWithPool => {
                write!(f, "hands are not a partition of the remaining pool")
            }
            ConservationError::PlayedLogMismatch => {
                write!(f, "played log differs from tabled and taken cards")
            }
            ConservationError::StaleCache => write!(f, "cached point totals are stale"),
            ConservationError::PovHandMismatch => {
                write!(f, "point-of-view hand differs from the player's hand")
            }
        }
    }
}

impl std::error::Error for ConservationError {}

impl Round {
    /// Starts play with the caller on lead and as the first point of view.
    /// `players` must already carry their teams.
    pub fn new(players: [Player; PLAYER_COUNT], call: Call, caller: PlayerPosition) -> Self {
        let teams = std::array::from_fn(|i| players[i].team);
        let remaining: Vec<Card> = players
            .iter()
            .flat_map(|player| player.hand.iter().copied())
            .collect();
        let state = GameState::new(
            caller,
            players[caller.index()].hand.clone(),
            teams,
            remaining,
            call.suit,
            caller,
        );
        Self {
            players,
            state,
            call,
            caller,
            trick_history: Vec::new(),
        }
    }

    pub fn players(&self) -> &[Player; PLAYER_COUNT] {
        &self.players
    }

    pub fn player(&self, seat: PlayerPosition) -> &Player {
        &self.players[seat.index()]
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.players[seat.index()].hand
    }

    /// The table as seen by the seat on move.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn call(&self) -> Call {
        self.call
    }

    pub fn caller(&self) -> PlayerPosition {
        self.caller
    }

    pub fn trick_history(&self) -> &[CompletedTrick] {
        &self.trick_history
    }

    pub fn seat_to_play(&self) -> PlayerPosition {
        self.state.seat_to_play()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn pile_points(&self) -> [u32; PLAYER_COUNT] {
        std::array::from_fn(|i| self.state.taken_points(PlayerPosition::LOOP[i]))
    }

    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        if self.state.is_over() {
            return Err(PlayError::GameOver);
        }
        let expected = self.state.seat_to_play();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        let slot = self
            .state
            .hand()
            .position(card)
            .ok_or(PlayError::CardNotInHand(card))?;

        // Played for real: nothing to take back.
        let _ = self.state.apply(Move::FromHand(slot))?;
        self.players[seat.index()].hand.remove(card);

        let outcome = if self.state.trick().is_complete() {
            match self.state.collect_trick() {
                Some(collected) => {
                    let outcome = PlayOutcome::TrickCompleted {
                        winner: collected.winner,
                        points: collected.points,
                    };
                    self.trick_history.push(CompletedTrick {
                        trick: collected.trick().clone(),
                        winner: collected.winner,
                        points: collected.points,
                    });
                    outcome
                }
                None => PlayOutcome::Played,
            }
        } else {
            PlayOutcome::Played
        };

        let next = self.state.seat_to_play();
        let _ = self
            .state
            .set_pov(next, self.players[next.index()].hand.clone());
        Ok(outcome)
    }

    /// Checks that every card is accounted for exactly once and that the
    /// cached totals match the containers.
    pub fn verify_conservation(&self) -> Result<(), ConservationError> {
        let state = &self.state;
        let piles = || PlayerPosition::LOOP.into_iter().map(|s| state.taken(s));

        for index in 0..DECK_SIZE {
            let Some(card) = Card::from_index(index) else {
                continue;
            };
            let copies = count(state.remaining(), card)
                + count(state.trick().cards(), card)
                + piles().map(|pile| count(pile, card)).sum::<usize>();
            if copies != 1 {
                return Err(ConservationError::Misplaced { card, copies });
            }
        }

        let mut seen = 0u64;
        let mut held = 0usize;
        for card in self.players.iter().flat_map(|p| p.hand.iter()) {
            seen |= 1 << card.index();
            held += 1;
        }
        let all_in_pool = state
            .remaining()
            .iter()
            .all(|card| seen & (1 << card.index()) != 0);
        let partition = held == state.remaining().len() && seen.count_ones() as usize == held;
        if !partition || !all_in_pool {
            return Err(ConservationError::HandsDisagreeWithPool);
        }

        let on_table = state.trick().cards().len() + piles().map(<[Card]>::len).sum::<usize>();
        let logged = state.played().iter().all(|card| {
            set::contains(state.trick().cards(), *card).is_some()
                || piles().any(|pile| set::contains(pile, *card).is_some())
        });
        if on_table != state.num_cards_played() || !logged {
            return Err(ConservationError::PlayedLogMismatch);
        }

        let piles_fresh = PlayerPosition::LOOP
            .into_iter()
            .all(|seat| state.taken_points(seat) == set::score(state.taken(seat)));
        if state.remaining_points() != set::score(state.remaining())
            || state.remaining_trumps() != set::count_of_suit(state.remaining(), state.trump())
            || !piles_fresh
        {
            return Err(ConservationError::StaleCache);
        }

        if state.hand() != self.hand(state.pov()) {
            return Err(ConservationError::PovHandMismatch);
        }
        Ok(())
    }
}

fn count(cards: &[Card], card: Card) -> usize {
    cards.iter().filter(|c| **c == card).count()
}
