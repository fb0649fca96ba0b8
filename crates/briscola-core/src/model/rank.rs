use core::fmt;
use serde::{Deserialize, Serialize};

/// Card ranks in trick-taking strength order. The discriminant is the
/// two-digit code's value digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Four = 1,
    Five = 2,
    Six = 3,
    Seven = 4,
    Jack = 5,
    Knight = 6,
    King = 7,
    Three = 8,
    Ace = 9,
}

const RELATIVE_VALUE: [u32; 10] = [1, 2, 3, 5, 7, 10, 15, 20, 75, 150];
const POINTS: [u32; 10] = [0, 0, 0, 0, 0, 2, 3, 4, 10, 11];

impl Rank {
    pub const ORDERED: [Rank; 10] = [
        Rank::Two,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Jack,
        Rank::Knight,
        Rank::King,
        Rank::Three,
        Rank::Ace,
    ];

    pub const LOWEST: Rank = Rank::Two;
    pub const HIGHEST: Rank = Rank::Ace;

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Rank::Two),
            1 => Some(Rank::Four),
            2 => Some(Rank::Five),
            3 => Some(Rank::Six),
            4 => Some(Rank::Seven),
            5 => Some(Rank::Jack),
            6 => Some(Rank::Knight),
            7 => Some(Rank::King),
            8 => Some(Rank::Three),
            9 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Weight used when judging how strong a suit is for calling.
    pub const fn relative_value(self) -> u32 {
        RELATIVE_VALUE[self as usize]
    }

    /// Points the card is worth in a taken pile.
    pub const fn points(self) -> u32 {
        POINTS[self as usize]
    }

    /// The next rank down, or `None` below [`Rank::LOWEST`].
    pub const fn lower(self) -> Option<Rank> {
        match self {
            Rank::Two => None,
            other => Rank::from_value(other.value() - 1),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Two => "2",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Jack => "J",
            Rank::Knight => "N",
            Rank::King => "K",
            Rank::Three => "3",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}
