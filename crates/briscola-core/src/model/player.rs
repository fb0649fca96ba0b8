use crate::model::hand::Hand;
use crate::model::team::Team;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const PLAYER_COUNT: usize = 5;

/// Absolute seat at the table, 0..5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerPosition(u8);

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; PLAYER_COUNT] = [
        PlayerPosition(0),
        PlayerPosition(1),
        PlayerPosition(2),
        PlayerPosition(3),
        PlayerPosition(4),
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PLAYER_COUNT {
            Some(PlayerPosition(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn next(self) -> PlayerPosition {
        self.offset(1)
    }

    /// The seat `steps` places after this one, wrapping around the table.
    pub const fn offset(self, steps: usize) -> PlayerPosition {
        PlayerPosition(((self.0 as usize + steps) % PLAYER_COUNT) as u8)
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Automated,
    Human,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: PlayerPosition,
    pub controller: Controller,
    /// Cleared for good once the player passes during calling.
    pub calling: bool,
    pub team: Team,
    pub hand: Hand,
}

impl Player {
    pub fn new(position: PlayerPosition, controller: Controller, hand: Hand) -> Self {
        Self {
            position,
            controller,
            calling: true,
            team: Team::Unassigned,
            hand,
        }
    }
}
