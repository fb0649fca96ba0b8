//! How an automated player judges its hand during calling.

use super::Call;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::set;
use crate::model::suit::Suit;

/// A challenge must exceed this to outbid an existing call.
pub const ESCALATION_THRESHOLD: u32 = 10_000;
/// Flat bonus per point of the whole hand when challenging.
pub const HAND_POINTS_BONUS: u32 = 50;

/// Sum of the relative values of the cards held in `suit`.
pub fn suit_strength(hand: &[Card], suit: Suit) -> u32 {
    hand.iter()
        .filter(|card| card.suit == suit)
        .map(|card| card.rank.relative_value())
        .sum()
}

/// Maximum of `value` over the suits, ties going to the earlier suit.
fn best_suit(mut value: impl FnMut(Suit) -> u32) -> (Suit, u32) {
    let mut best = (Suit::ALL[0], value(Suit::ALL[0]));
    for suit in Suit::ALL.into_iter().skip(1) {
        let candidate = value(suit);
        if candidate > best.1 {
            best = (suit, candidate);
        }
    }
    best
}

pub fn strongest_suit(hand: &[Card]) -> Suit {
    best_suit(|suit| suit_strength(hand, suit)).0
}

/// Value of contesting `last_called` in each suit; only a suit whose value
/// clears [`ESCALATION_THRESHOLD`] is worth a call.
pub fn challenge_value(hand: &[Card], suit: Suit, last_called: Rank) -> u32 {
    let count = set::count_of_suit(hand, suit) as u32;
    let bonus = set::score(hand) * HAND_POINTS_BONUS;
    suit_strength(hand, suit) * count * last_called.relative_value() + bonus
}

pub fn challenge_suit(hand: &[Card], last_called: Rank) -> Option<Suit> {
    let (suit, value) = best_suit(|suit| challenge_value(hand, suit, last_called));
    (value > ESCALATION_THRESHOLD).then_some(suit)
}

pub fn candidate_suit(hand: &[Card], last_called: Option<Rank>) -> Option<Suit> {
    match last_called {
        None => Some(strongest_suit(hand)),
        Some(rank) => challenge_suit(hand, rank),
    }
}

/// The call an automated player makes, or `None` for a pass.
///
/// The rank is the highest one below `last_called` (or the Ace when opening)
/// that the player does not hold in the candidate suit.
pub fn automated_call(hand: &[Card], last_called: Option<Rank>) -> Option<Call> {
    let suit = candidate_suit(hand, last_called)?;
    let mut rank = match last_called {
        None => Rank::HIGHEST,
        Some(last) => last.lower()?,
    };
    while set::contains(hand, Card::new(rank, suit)).is_some() {
        rank = rank.lower()?;
    }
    Some(Call::new(rank, suit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(codes: &[u32]) -> Vec<Card> {
        codes.iter().map(|&c| Card::from_code(c).unwrap()).collect()
    }

    #[test]
    fn strength_weights_by_relative_value() {
        // Ace and Three of hearts, Two of spades.
        let hand = cards(&[92, 82, 0]);
        assert_eq!(suit_strength(&hand, Suit::Hearts), 225);
        assert_eq!(suit_strength(&hand, Suit::Spades), 1);
        assert_eq!(strongest_suit(&hand), Suit::Hearts);
    }

    #[test]
    fn strongest_suit_ties_go_to_earlier_suit() {
        let hand = cards(&[51, 53]);
        assert_eq!(strongest_suit(&hand), Suit::Clubs);
        assert_eq!(strongest_suit(&[]), Suit::Spades);
    }

    #[test]
    fn opening_call_takes_highest_rank_not_held() {
        // Holds Ace, Three and King of clubs: the opening call drops to the Knight.
        let hand = cards(&[91, 81, 71, 0, 10, 2, 3, 13]);
        assert_eq!(
            automated_call(&hand, None),
            Some(Call::new(Rank::Knight, Suit::Clubs))
        );
    }

    #[test]
    fn weak_hand_passes_against_a_call() {
        let hand = cards(&[0, 10, 20, 1, 11, 2, 12, 3]);
        assert_eq!(challenge_suit(&hand, Rank::Ace), None);
        assert_eq!(automated_call(&hand, Some(Rank::Ace)), None);
    }

    #[test]
    fn strong_suit_challenges_below_last_call() {
        // Ace, Three, King, Knight of diamonds.
        let hand = cards(&[93, 83, 73, 63, 0, 1, 2, 10]);
        let value = challenge_value(&hand, Suit::Diamonds, Rank::Jack);
        assert!(value > ESCALATION_THRESHOLD);
        assert_eq!(
            automated_call(&hand, Some(Rank::Ace)),
            Some(Call::new(Rank::Jack, Suit::Diamonds))
        );
    }

    #[test]
    fn no_rank_left_below_two() {
        let hand = cards(&[93, 83, 73, 63, 0, 1, 2, 10]);
        assert_eq!(automated_call(&hand, Some(Rank::Two)), None);
    }
}
