use crate::model::card::{Card, DECK_SIZE};
use crate::model::hand::Hand;
use crate::model::player::{PLAYER_COUNT, PlayerPosition};
use crate::model::set;
use crate::model::suit::Suit;
use crate::model::team::Team;
use crate::model::trick::{Trick, TrickError};
use arrayvec::ArrayVec;

pub type CardList = ArrayVec<Card, DECK_SIZE>;

/// One player's view of the table: their own hand, the shared pool of cards
/// nobody has played yet, and the public trick/pile bookkeeping.
///
/// The pool still contains every unplayed card, the point-of-view hand
/// included; search treats the part of it outside that hand as the cards the
/// other players might hold.
#[derive(Debug, Clone)]
pub struct GameState {
    pov: PlayerPosition,
    hand: Hand,
    teams: [Team; PLAYER_COUNT],
    taken: [CardList; PLAYER_COUNT],
    taken_points: [u32; PLAYER_COUNT],
    remaining: CardList,
    remaining_points: u32,
    remaining_trumps: usize,
    played: CardList,
    trick: Trick,
    trump: Suit,
}

/// Source of the next card put on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Slot of the point-of-view hand.
    FromHand(usize),
    /// Slot of the remaining pool, for a card another player is assumed to hold.
    FromPool(usize),
}

/// Everything needed to take back one [`GameState::apply`].
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct Undo {
    card: Card,
    hand_slot: Option<usize>,
    pool_slot: Option<usize>,
}

impl Undo {
    pub fn card(&self) -> Card {
        self.card
    }
}

/// A trick moved onto its winner's pile, kept so it can be put back.
#[derive(Debug, Clone)]
#[must_use]
pub struct Collected {
    pub slot: usize,
    pub winner: PlayerPosition,
    pub points: u32,
    trick: Trick,
}

impl Collected {
    pub fn trick(&self) -> &Trick {
        &self.trick
    }
}

impl GameState {
    /// Fresh state before the first card: `leader` opens the first trick and
    /// `remaining` lists every card still in someone's hand.
    pub fn new(
        pov: PlayerPosition,
        hand: Hand,
        teams: [Team; PLAYER_COUNT],
        remaining: impl IntoIterator<Item = Card>,
        trump: Suit,
        leader: PlayerPosition,
    ) -> Self {
        let remaining: CardList = remaining.into_iter().take(DECK_SIZE).collect();
        let remaining_points = set::score(&remaining);
        let remaining_trumps = set::count_of_suit(&remaining, trump);
        Self {
            pov,
            hand,
            teams,
            taken: std::array::from_fn(|_| CardList::new()),
            taken_points: [0; PLAYER_COUNT],
            remaining,
            remaining_points,
            remaining_trumps,
            played: CardList::new(),
            trick: Trick::new(leader),
            trump,
        }
    }

    pub fn pov(&self) -> PlayerPosition {
        self.pov
    }

    pub fn pov_team(&self) -> Team {
        self.teams[self.pov.index()]
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn teams(&self) -> &[Team; PLAYER_COUNT] {
        &self.teams
    }

    pub fn team(&self, seat: PlayerPosition) -> Team {
        self.teams[seat.index()]
    }

    pub fn taken(&self, seat: PlayerPosition) -> &[Card] {
        &self.taken[seat.index()]
    }

    pub fn taken_points(&self, seat: PlayerPosition) -> u32 {
        self.taken_points[seat.index()]
    }

    pub fn remaining(&self) -> &[Card] {
        &self.remaining
    }

    pub fn remaining_points(&self) -> u32 {
        self.remaining_points
    }

    pub fn remaining_trumps(&self) -> usize {
        self.remaining_trumps
    }

    pub fn played(&self) -> &[Card] {
        &self.played
    }

    pub fn trick(&self) -> &Trick {
        &self.trick
    }

    pub fn starting(&self) -> PlayerPosition {
        self.trick.leader()
    }

    pub fn turn(&self) -> usize {
        self.trick.turn()
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    pub fn num_cards_played(&self) -> usize {
        self.played.len()
    }

    pub fn is_over(&self) -> bool {
        self.played.len() >= DECK_SIZE
    }

    pub fn seat_to_play(&self) -> PlayerPosition {
        self.trick.seat_to_play()
    }

    /// Pool slots holding cards outside the point-of-view hand.
    pub fn unseen_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.remaining
            .iter()
            .enumerate()
            .filter(|(_, card)| !self.hand.contains(**card))
            .map(|(slot, _)| slot)
    }

    /// Tables a card, removing it from the hand and/or the pool. A full trick
    /// must be collected first; the state is untouched when it is not.
    pub fn apply(&mut self, mv: Move) -> Result<Undo, TrickError> {
        if self.trick.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        let (card, hand_slot, pool_slot) = match mv {
            Move::FromHand(slot) => {
                let card = self.hand.remove_at(slot);
                let pool_slot = set::contains(&self.remaining, card);
                if let Some(index) = pool_slot {
                    self.remaining.remove(index);
                }
                (card, Some(slot), pool_slot)
            }
            Move::FromPool(slot) => (self.remaining.remove(slot), None, Some(slot)),
        };
        if pool_slot.is_some() {
            self.remaining_points -= card.points();
            if card.suit == self.trump {
                self.remaining_trumps -= 1;
            }
        }
        self.played.push(card);
        self.trick.play(card)?;
        Ok(Undo {
            card,
            hand_slot,
            pool_slot,
        })
    }

    pub fn undo(&mut self, undo: Undo) {
        let card = undo.card;
        self.trick.unplay();
        self.played.pop();
        if let Some(slot) = undo.pool_slot {
            self.remaining.insert(slot, card);
            self.remaining_points += card.points();
            if card.suit == self.trump {
                self.remaining_trumps += 1;
            }
        }
        if let Some(slot) = undo.hand_slot {
            self.hand.insert(slot, card);
        }
    }

    /// Awards the tabled cards to the winner of the trick and makes the winner
    /// lead the next one. Returns `None` when nothing is tabled.
    pub fn collect_trick(&mut self) -> Option<Collected> {
        let slot = self.trick.winning_slot(self.trump)?;
        let winner = self.trick.leader().offset(slot);
        let trick = self.trick.reset(winner);
        let points = trick.points();
        let pile = &mut self.taken[winner.index()];
        pile.extend(trick.cards().iter().copied());
        self.taken_points[winner.index()] += points;
        Some(Collected {
            slot,
            winner,
            points,
            trick,
        })
    }

    pub fn uncollect(&mut self, collected: Collected) {
        let seat = collected.winner.index();
        let kept = self.taken[seat].len() - collected.trick.turn();
        self.taken[seat].truncate(kept);
        self.taken_points[seat] -= collected.points;
        self.trick = collected.trick;
    }

    /// Hands the point of view to `seat`, returning the previous holder's hand.
    pub fn set_pov(&mut self, seat: PlayerPosition, hand: Hand) -> Hand {
        self.pov = seat;
        std::mem::replace(&mut self.hand, hand)
    }
}
