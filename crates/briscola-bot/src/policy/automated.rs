use crate::decision::choose_play;
use crate::search::SearchConfig;
use briscola_core::calling::{Bid, BidContext, automated_call, strongest_suit};
use briscola_core::game::state::GameState;
use briscola_core::model::card::Card;
use briscola_core::model::rank::Rank;
use briscola_core::model::suit::Suit;
use briscola_core::policy::{Policy, PolicyError, Rejection};
use tracing::{Level, event};

/// Automated seat: calls by hand strength and plays by minimax.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPolicy {
    config: SearchConfig,
}

impl SearchPolicy {
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Policy for SearchPolicy {
    fn choose_bid(&mut self, ctx: &BidContext<'_>) -> Result<Bid, PolicyError> {
        let bid = match automated_call(ctx.hand.cards(), ctx.last_called) {
            Some(call) => Bid::from(Some(call)),
            // Forced to call: open as if no call had been made.
            None if ctx.must_call => Bid::from(automated_call(ctx.hand.cards(), None)),
            None => Bid::Pass,
        };
        event!(
            target: "briscola_bot::calling",
            Level::DEBUG,
            seat = %ctx.seat,
            last_called = ?ctx.last_called,
            bid = ?bid,
        );
        Ok(bid)
    }

    fn choose_trump(&mut self, ctx: &BidContext<'_>, _rank: Rank) -> Result<Suit, PolicyError> {
        Ok(strongest_suit(ctx.hand.cards()))
    }

    fn choose_play(&mut self, state: &GameState) -> Result<Card, PolicyError> {
        let decision = choose_play(state, &self.config).ok_or(PolicyError::EmptyHand)?;
        if tracing::enabled!(Level::DEBUG) {
            let evaluations = decision
                .evaluations
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join(",");
            event!(
                target: "briscola_bot::play",
                Level::DEBUG,
                seat = %state.pov(),
                team = %state.pov_team(),
                chosen = %decision.card,
                evaluations = %evaluations,
                nodes = decision.stats.nodes,
                leaves = decision.stats.leaves,
            );
        }
        Ok(decision.card)
    }

    fn rejected(&mut self, rejection: &Rejection) {
        tracing::warn!(%rejection, "automated choice rejected");
    }
}
