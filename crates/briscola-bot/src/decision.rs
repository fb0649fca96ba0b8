use crate::search::{SearchConfig, SearchStats, minimax};
use briscola_core::game::state::{GameState, Move};
use briscola_core::model::card::Card;
use rayon::prelude::*;

/// Outcome of searching every card of the point-of-view hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub slot: usize,
    pub card: Card,
    /// One value per hand slot, in hand order.
    pub evaluations: Vec<i32>,
    pub stats: SearchStats,
}

/// Picks the card for the point-of-view player, who must be on move.
///
/// The caller side takes the highest evaluation, anyone else the lowest;
/// ties go to the earliest hand slot. Returns `None` for an empty hand or a
/// trick that still needs collecting.
pub fn choose_play(state: &GameState, config: &SearchConfig) -> Option<Decision> {
    let slots = state.hand().len();
    if slots == 0 {
        return None;
    }

    let results: Option<Vec<(i32, SearchStats)>> = if config.parallel {
        (0..slots)
            .into_par_iter()
            .map(|slot| search_branch(state, slot, config.depth))
            .collect()
    } else {
        (0..slots)
            .map(|slot| search_branch(state, slot, config.depth))
            .collect()
    };
    let results = results?;

    let maximize = state.pov_team().maximizes();
    let mut stats = SearchStats::default();
    let mut slot = 0;
    for (index, (value, branch)) in results.iter().enumerate() {
        stats += *branch;
        let best = results[slot].0;
        if (maximize && *value > best) || (!maximize && *value < best) {
            slot = index;
        }
    }

    let card = state.hand().get(slot)?;
    Some(Decision {
        slot,
        card,
        evaluations: results.into_iter().map(|(value, _)| value).collect(),
        stats,
    })
}

/// Each candidate gets its own copy of the table.
fn search_branch(state: &GameState, slot: usize, depth: u32) -> Option<(i32, SearchStats)> {
    let mut branch = state.clone();
    let mover = branch.pov_team();
    branch.apply(Move::FromHand(slot)).ok()?;
    let mut stats = SearchStats::default();
    let value = minimax(&mut branch, mover, depth, &mut stats);
    Some((value, stats))
}
