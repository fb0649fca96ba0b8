use crate::eval::evaluate;
use arrayvec::ArrayVec;
use briscola_core::game::state::{GameState, Move};
use briscola_core::model::card::DECK_SIZE;
use briscola_core::model::team::Team;
use std::ops::AddAssign;

pub const DEFAULT_DEPTH: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies of unseen cards explored below each candidate.
    pub depth: u32,
    /// Evaluate root candidates on the rayon pool.
    pub parallel: bool,
}

impl SearchConfig {
    pub const fn new(depth: u32, parallel: bool) -> Self {
        Self { depth, parallel }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let depth = read("BRISCOLA_SEARCH_DEPTH")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|depth| *depth >= 1)
            .unwrap_or(DEFAULT_DEPTH);

        let parallel = read("BRISCOLA_SEARCH_PARALLEL")
            .map(|raw| !matches!(raw.trim(), "0" | "false" | "FALSE" | "off" | "OFF"))
            .unwrap_or(true);

        Self { depth, parallel }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.leaves += rhs.leaves;
    }
}

/// Depth-limited minimax over the point-of-view player's knowledge.
///
/// `mover` is the team of the seat whose card led to this node and decides
/// whether the node maximizes (caller side) or minimizes. Only plies from the
/// unseen pool consume depth; the point-of-view player's own replies and
/// trick collection are free. `state` is left exactly as it was found.
pub fn minimax(state: &mut GameState, mover: Team, depth: u32, stats: &mut SearchStats) -> i32 {
    stats.nodes += 1;
    if depth == 0 || state.is_over() {
        return leaf(state, stats);
    }

    if state.trick().is_complete() {
        let Some(collected) = state.collect_trick() else {
            return leaf(state, stats);
        };
        let next = state.team(state.starting());
        let value = minimax(state, next, depth, stats);
        state.uncollect(collected);
        return value;
    }

    let seat = state.seat_to_play();
    let child_mover = state.team(seat);
    let maximize = mover.maximizes();
    let mut best: Option<i32> = None;

    if seat == state.pov() {
        for slot in 0..state.hand().len() {
            let Ok(undo) = state.apply(Move::FromHand(slot)) else {
                break;
            };
            let value = minimax(state, child_mover, depth, stats);
            state.undo(undo);
            best = Some(better(best, value, maximize));
        }
    } else {
        let slots: ArrayVec<usize, DECK_SIZE> = state.unseen_slots().collect();
        for slot in slots {
            let Ok(undo) = state.apply(Move::FromPool(slot)) else {
                break;
            };
            let value = minimax(state, child_mover, depth - 1, stats);
            state.undo(undo);
            best = Some(better(best, value, maximize));
        }
    }

    // A valid table always offers a card to whoever is on move.
    best.unwrap_or_else(|| leaf(state, stats))
}

/// Resolves whatever is tabled, scores the table, then takes it back.
fn leaf(state: &mut GameState, stats: &mut SearchStats) -> i32 {
    stats.leaves += 1;
    let collected = state.collect_trick();
    let value = evaluate(state);
    if let Some(collected) = collected {
        state.uncollect(collected);
    }
    value
}

fn better(best: Option<i32>, value: i32, maximize: bool) -> i32 {
    match best {
        None => value,
        Some(best) if maximize => best.max(value),
        Some(best) => best.min(value),
    }
}
