use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Unassigned,
    CallerSide,
    OpposingSide,
}

impl Team {
    /// Multiplier applied to points taken by a member of this team. Unassigned
    /// players count against the caller, like opponents.
    pub const fn sign(self) -> i32 {
        match self {
            Team::CallerSide => 1,
            Team::OpposingSide | Team::Unassigned => -1,
        }
    }

    /// Whether a search ply chosen by this team maximizes the evaluation.
    pub const fn maximizes(self) -> bool {
        matches!(self, Team::CallerSide)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::Unassigned => "unassigned",
            Team::CallerSide => "caller",
            Team::OpposingSide => "opposing",
        };
        f.write_str(label)
    }
}
