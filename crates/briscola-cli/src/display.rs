use briscola_bot::{GameReport, evaluate};
use briscola_core::calling::CallingOutcome;
use briscola_core::game::state::GameState;
use briscola_core::model::card::Card;
use briscola_core::model::player::PlayerPosition;
use std::io::{self, Write};

/// Space-separated card codes.
pub fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_calling<W: Write>(out: &mut W, outcome: &CallingOutcome) -> io::Result<()> {
    writeln!(
        out,
        "Final caller: {} calls {} (rank {} of suit {})",
        outcome.caller,
        outcome.call,
        outcome.call.rank.value(),
        outcome.call.suit.index()
    )?;
    for seat in PlayerPosition::LOOP {
        writeln!(out, "{seat} team is {}", outcome.teams[seat.index()])?;
    }
    writeln!(out)
}

/// Full table dump from the point-of-view player.
pub fn write_state<W: Write>(out: &mut W, state: &GameState) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Point of view: {}", state.pov())?;
    writeln!(out, "Leader: {}  Turn: {}", state.starting(), state.turn())?;
    writeln!(out, "Trump: {} ({})", state.trump(), state.trump().index())?;
    writeln!(out, "Hand: {}", cards(state.hand().cards()))?;
    let played = cards(state.played());
    writeln!(out, "Cards played ({}): {played}", state.num_cards_played())?;
    writeln!(out, "Tabled: {}", cards(state.trick().cards()))?;
    writeln!(out, "Remaining: {}", cards(state.remaining()))?;
    writeln!(out, "Cards taken:")?;
    for seat in PlayerPosition::LOOP {
        writeln!(
            out,
            "  {seat} ({}, {} pts): {}",
            state.team(seat),
            state.taken_points(seat),
            cards(state.taken(seat))
        )?;
    }
    writeln!(out, "Current evaluation: {}", evaluate(state))
}

pub fn write_report<W: Write>(out: &mut W, game: usize, report: &GameReport) -> io::Result<()> {
    let caller_side = report.caller_side_points();
    let opposing = report.opposing_side_points();
    writeln!(
        out,
        "Game {game}: {} called {}, caller side {caller_side} - {opposing} opposing, evaluation {}",
        report.calling.caller, report.calling.call, report.evaluation
    )
}

#[cfg(test)]
mod tests {
    use super::{cards, write_report, write_state};
    use briscola_bot::GameReport;
    use briscola_core::calling::{Call, CallingOutcome};
    use briscola_core::game::state::GameState;
    use briscola_core::model::card::Card;
    use briscola_core::model::deck::Deck;
    use briscola_core::model::player::PlayerPosition;
    use briscola_core::model::rank::Rank;
    use briscola_core::model::suit::Suit;
    use briscola_core::model::team::Team;

    #[test]
    fn cards_are_listed_by_code() {
        let list = [Card::from_code(3).unwrap(), Card::from_code(91).unwrap()];
        assert_eq!(cards(&list), "03 91");
        assert_eq!(cards(&[]), "");
    }

    #[test]
    fn state_dump_names_every_seat() {
        let deck = Deck::ordered();
        let state = GameState::new(
            PlayerPosition::LOOP[1],
            deck.deal()[1].clone(),
            [Team::OpposingSide; 5],
            deck.cards().iter().copied(),
            Suit::Clubs,
            PlayerPosition::LOOP[1],
        );
        let mut out = Vec::new();
        write_state(&mut out, &state).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Point of view: Player 1"));
        assert!(text.contains("Hand: 80 90 01 11 21 31 41 51"));
        for seat in 0..5 {
            assert!(text.contains(&format!("Player {seat} (opposing, 0 pts)")));
        }
    }

    #[test]
    fn report_splits_taken_points_between_sides() {
        let calling = CallingOutcome {
            caller: PlayerPosition::LOOP[0],
            call: Call::new(Rank::Ace, Suit::Clubs),
            partner: Some(PlayerPosition::LOOP[2]),
            teams: [
                Team::CallerSide,
                Team::OpposingSide,
                Team::CallerSide,
                Team::OpposingSide,
                Team::OpposingSide,
            ],
            visits: 5,
            bids: Vec::new(),
        };
        // Only part of the deck is in the piles.
        let report = GameReport {
            calling,
            trick_winners: Vec::new(),
            pile_points: [30, 10, 25, 5, 0],
            evaluation: 40,
        };
        let mut out = Vec::new();
        write_report(&mut out, 3, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Game 3: Player 0 called "));
        assert!(text.contains("caller side 55 - 15 opposing, evaluation 40"));
    }
}
