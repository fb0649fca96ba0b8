//! Manual deals typed in as five lines of card codes.

use briscola_core::model::card::Card;
use briscola_core::model::hand::{HAND_SIZE, Hand};
use briscola_core::model::player::{PLAYER_COUNT, PlayerPosition};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("input ended before every hand was dealt")]
    EndOfInput,
    #[error("failed to read deal: {0}")]
    Io(#[from] std::io::Error),
    #[error("'{token}' is not a card code")]
    InvalidToken { token: String },
    #[error("no card has code {code:02}")]
    UnknownCard { code: u32 },
    #[error("card {card} is dealt twice")]
    Duplicate { card: Card },
    #[error("expected 8 cards, got {count}")]
    WrongCount { count: usize },
}

impl DealError {
    /// Errors the player can fix by typing the line again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DealError::EndOfInput | DealError::Io(_))
    }
}

/// Parses one line of eight whitespace-separated codes, refusing cards
/// already in `dealt`.
pub fn parse_hand(line: &str, dealt: &[Card]) -> Result<Hand, DealError> {
    let mut cards = Vec::with_capacity(HAND_SIZE);
    for token in line.split_whitespace() {
        let code: u32 = token.parse().map_err(|_| DealError::InvalidToken {
            token: token.to_string(),
        })?;
        let card = Card::from_code(code).ok_or(DealError::UnknownCard { code })?;
        if dealt.contains(&card) || cards.contains(&card) {
            return Err(DealError::Duplicate { card });
        }
        cards.push(card);
    }
    if cards.len() != HAND_SIZE {
        return Err(DealError::WrongCount { count: cards.len() });
    }
    Ok(Hand::with_cards(cards))
}

/// Prompts for each seat's hand in turn. A bad line is reported and asked
/// for again; running out of input aborts the deal.
pub fn read_deal<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<[Hand; PLAYER_COUNT], DealError> {
    writeln!(
        output,
        "Please assign {HAND_SIZE} cards to each player (00 is the Two of spades)."
    )?;
    writeln!(output, "Example: \"03 43 42 81 91 72 01 00\"")?;

    let mut hands: [Hand; PLAYER_COUNT] = Default::default();
    let mut dealt: Vec<Card> = Vec::new();
    let mut line = String::new();
    for seat in PlayerPosition::LOOP {
        loop {
            writeln!(output, "Assign cards to {seat}:")?;
            output.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Err(DealError::EndOfInput);
            }
            match parse_hand(&line, &dealt) {
                Ok(hand) => {
                    dealt.extend(hand.iter().copied());
                    hands[seat.index()] = hand;
                    break;
                }
                Err(err) => writeln!(output, "Error: {err}")?,
            }
        }
    }
    Ok(hands)
}
