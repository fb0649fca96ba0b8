//! Static evaluation of a table from the point-of-view player's knowledge.
//!
//! Positive values favour the caller's side. Once every card is played the
//! value is exact; before that, points still in play are credited through a
//! weight that shrinks as the game goes on, and trump holdings amplify the
//! point-of-view team's share of the pool.

use briscola_core::game::state::GameState;
use briscola_core::model::player::PlayerPosition;

/// Weight of unplayed points: 5 before the first card, 4 through the 30th,
/// 3 afterwards.
pub fn remaining_weight(cards_played: usize) -> i32 {
    (5.0 - cards_played as f32 / 30.0) as i32
}

/// Sum of every pile's points signed by its owner's team.
pub fn pile_balance(state: &GameState) -> i32 {
    PlayerPosition::LOOP
        .into_iter()
        .map(|seat| state.team(seat).sign() * state.taken_points(seat) as i32)
        .sum()
}

pub fn evaluate(state: &GameState) -> i32 {
    let balance = pile_balance(state);
    if state.is_over() {
        return balance;
    }

    let weight = remaining_weight(state.num_cards_played());
    let pov_sign = state.pov_team().sign();
    let pool = state.remaining_points() as i32;
    let hand_trumps = state.hand().count_of_suit(state.trump()) as i32;
    let pool_trumps = state.remaining_trumps() as i32;

    let others = (PlayerPosition::LOOP.len() - 1) as i32;
    let pov_term = state.hand().points() as i32 * weight + pov_sign * pool * hand_trumps;
    let other_term = pool * weight + pov_sign * pool * pool_trumps;
    balance + pov_term + others * other_term
}

#[cfg(test)]
mod tests {
    use super::{evaluate, pile_balance, remaining_weight};
    use briscola_core::game::state::{GameState, Move};
    use briscola_core::model::deck::Deck;
    use briscola_core::model::player::PlayerPosition;
    use briscola_core::model::suit::Suit;
    use briscola_core::model::team::Team;

    const TEAMS: [Team; 5] = [
        Team::CallerSide,
        Team::OpposingSide,
        Team::CallerSide,
        Team::OpposingSide,
        Team::OpposingSide,
    ];

    fn opening(pov: usize) -> GameState {
        let deck = Deck::ordered();
        GameState::new(
            PlayerPosition::LOOP[pov],
            deck.deal()[pov].clone(),
            TEAMS,
            deck.cards().iter().copied(),
            Suit::Hearts,
            PlayerPosition::LOOP[0],
        )
    }

    #[test]
    fn weight_truncates_toward_zero() {
        assert_eq!(remaining_weight(0), 5);
        assert_eq!(remaining_weight(1), 4);
        assert_eq!(remaining_weight(30), 4);
        assert_eq!(remaining_weight(31), 3);
        assert_eq!(remaining_weight(39), 3);
    }

    #[test]
    fn opening_position_by_hand() {
        // Seat 0 holds spades Two through King: 9 points, no hearts.
        let state = opening(0);
        let expected = 9 * 5 + 4 * (120 * 5 + 120 * 10);
        assert_eq!(evaluate(&state), expected);
    }

    #[test]
    fn opposing_pov_subtracts_trump_terms() {
        // Seat 3 holds hearts Seven through Ace plus two low diamonds:
        // 30 points and six hearts.
        let state = opening(3);
        let expected = 30 * 5 - 120 * 6 + 4 * (120 * 5 - 120 * 10);
        assert_eq!(evaluate(&state), expected);
    }

    #[test]
    fn finished_game_scores_piles_only() {
        let mut state = opening(0);
        while !state.is_over() {
            let _ = state.apply(Move::FromPool(0)).unwrap();
            if state.trick().is_complete() {
                let _ = state.collect_trick();
            }
        }
        assert_eq!(evaluate(&state), pile_balance(&state));
        let total: u32 = PlayerPosition::LOOP
            .into_iter()
            .map(|seat| state.taken_points(seat))
            .sum();
        assert_eq!(total, 120);
    }
}
