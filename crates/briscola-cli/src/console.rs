use crate::display;
use briscola_core::calling::{Bid, BidContext};
use briscola_core::game::state::GameState;
use briscola_core::model::card::Card;
use briscola_core::model::rank::Rank;
use briscola_core::model::suit::Suit;
use briscola_core::policy::{Policy, PolicyError, Rejection};
use std::io::{BufRead, Write};

/// A person at the terminal. Unparsable answers are re-asked here; rule
/// violations come back through [`Policy::rejected`].
pub struct ConsolePolicy<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> ConsolePolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompts until `parse` accepts the trimmed line.
    fn ask<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T, PolicyError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Err(PolicyError::InputClosed);
            }
            let answer = self.line.trim();
            match parse(answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "Error: invalid entry '{answer}'")?,
            }
        }
    }
}

fn parse_bid(answer: &str) -> Option<Bid> {
    match answer.parse::<i32>().ok()? {
        -1 => Some(Bid::Pass),
        value => {
            let rank = Rank::from_value(u8::try_from(value).ok()?)?;
            Some(Bid::Call { rank, suit: None })
        }
    }
}

fn parse_suit(answer: &str) -> Option<Suit> {
    Suit::from_index(answer.parse::<usize>().ok()?)
}

fn parse_card(answer: &str) -> Option<Card> {
    Card::from_code(answer.parse::<u32>().ok()?)
}

impl<R: BufRead, W: Write> Policy for ConsolePolicy<R, W> {
    fn choose_bid(&mut self, ctx: &BidContext<'_>) -> Result<Bid, PolicyError> {
        writeln!(self.output, "Hand: {}", display::cards(ctx.hand.cards()))?;
        match (ctx.last_called, ctx.leader) {
            (Some(rank), Some(leader)) => {
                writeln!(self.output, "Last call: {} by {leader}", rank.value())?
            }
            _ if ctx.must_call => writeln!(self.output, "Everyone else passed: you must call.")?,
            _ => writeln!(self.output, "No call yet.")?,
        }
        let prompt = format!("{} call (0-9, -1 to pass): ", ctx.seat);
        self.ask(&prompt, parse_bid)
    }

    fn choose_trump(&mut self, ctx: &BidContext<'_>, rank: Rank) -> Result<Suit, PolicyError> {
        let (seat, value) = (ctx.seat, rank.value());
        writeln!(self.output, "{seat} wins the calling with rank {value}.")?;
        self.ask("Suit (0-3)? ", parse_suit)
    }

    fn choose_play(&mut self, state: &GameState) -> Result<Card, PolicyError> {
        let tabled = display::cards(state.trick().cards());
        let hand = display::cards(state.hand().cards());
        writeln!(self.output, "Tabled: {tabled}")?;
        writeln!(self.output, "Hand: {hand}")?;
        let prompt = format!("{}? ", state.pov());
        self.ask(&prompt, parse_card)
    }

    fn rejected(&mut self, rejection: &Rejection) {
        let message = match rejection {
            Rejection::CardNotHeld(_) => "Error: please play a card from your hand.".to_string(),
            Rejection::Bid(reason) => format!("Error: invalid call, {reason}."),
        };
        // Output failures surface on the next prompt.
        let _ = writeln!(self.output, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsolePolicy, parse_bid};
    use briscola_core::calling::{Bid, BidContext};
    use briscola_core::game::state::GameState;
    use briscola_core::model::card::Card;
    use briscola_core::model::deck::Deck;
    use briscola_core::model::hand::Hand;
    use briscola_core::model::player::PlayerPosition;
    use briscola_core::model::rank::Rank;
    use briscola_core::model::suit::Suit;
    use briscola_core::model::team::Team;
    use briscola_core::policy::{Policy, PolicyError};
    use std::io::Cursor;

    fn ctx(hand: &Hand) -> BidContext<'_> {
        BidContext {
            seat: PlayerPosition::LOOP[2],
            hand,
            last_called: Some(Rank::King),
            leader: Some(PlayerPosition::LOOP[1]),
            must_call: false,
        }
    }

    #[test]
    fn bid_parsing() {
        assert_eq!(parse_bid("-1"), Some(Bid::Pass));
        assert_eq!(
            parse_bid("9"),
            Some(Bid::Call {
                rank: Rank::Ace,
                suit: None
            })
        );
        assert_eq!(parse_bid("10"), None);
        assert_eq!(parse_bid("-2"), None);
        assert_eq!(parse_bid("ace"), None);
    }

    #[test]
    fn reprompts_until_a_number_arrives() {
        let hand = Hand::new();
        let mut policy = ConsolePolicy::new(Cursor::new("x\n12\n6\n"), Vec::new());
        let bid = policy.choose_bid(&ctx(&hand)).unwrap();
        assert_eq!(
            bid,
            Bid::Call {
                rank: Rank::Knight,
                suit: None
            }
        );
        let text = String::from_utf8(policy.into_output()).unwrap();
        assert_eq!(text.matches("Error: invalid entry").count(), 2);
        assert!(text.contains("Last call: 7 by Player 1"));
    }

    #[test]
    fn closed_input_is_reported() {
        let hand = Hand::new();
        let mut policy = ConsolePolicy::new(Cursor::new(""), Vec::new());
        assert!(matches!(
            policy.choose_bid(&ctx(&hand)),
            Err(PolicyError::InputClosed)
        ));
    }

    #[test]
    fn reads_suit_and_card() {
        let hand = Hand::new();
        let mut policy = ConsolePolicy::new(Cursor::new("7\n2\n44\n83\n"), Vec::new());
        let suit = policy.choose_trump(&ctx(&hand), Rank::Ace).unwrap();
        assert_eq!(suit, Suit::Hearts);

        let deck = Deck::ordered();
        let state = GameState::new(
            PlayerPosition::LOOP[0],
            deck.deal()[0].clone(),
            [Team::OpposingSide; 5],
            deck.cards().iter().copied(),
            Suit::Hearts,
            PlayerPosition::LOOP[0],
        );
        // 44 is not a card; 83 is a card even though it is not held.
        let card = policy.choose_play(&state).unwrap();
        assert_eq!(card, Card::from_code(83).unwrap());
    }
}
