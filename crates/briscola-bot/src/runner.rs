use crate::eval::evaluate;
use crate::search::SearchConfig;
use briscola_core::calling::{CallingEngine, CallingError, CallingOutcome, PartnerScan};
use briscola_core::game::round::{CompletedTrick, PlayError, PlayOutcome, Round};
use briscola_core::model::card::Card;
use briscola_core::model::hand::Hand;
use briscola_core::model::player::{Controller, PLAYER_COUNT, Player, PlayerPosition};
use briscola_core::policy::{Policy, PolicyError, Rejection};
use std::fmt;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunnerConfig {
    pub search: SearchConfig,
    pub partner_scan: PartnerScan,
}

/// Progress notifications handed to the observer of [`GameRunner::run_observed`].
#[derive(Debug)]
pub enum GameEvent<'a> {
    Called(&'a CallingOutcome),
    CardPlayed {
        seat: PlayerPosition,
        card: Card,
        round: &'a Round,
    },
    TrickCompleted {
        trick: &'a CompletedTrick,
        round: &'a Round,
    },
}

#[derive(Debug, Clone)]
pub struct GameReport {
    pub calling: CallingOutcome,
    pub trick_winners: Vec<PlayerPosition>,
    pub pile_points: [u32; PLAYER_COUNT],
    /// Terminal evaluation: positive when the caller's side won more points.
    pub evaluation: i32,
}

impl GameReport {
    pub fn caller_side_points(&self) -> u32 {
        self.calling
            .teams
            .iter()
            .zip(self.pile_points)
            .filter(|(team, _)| team.maximizes())
            .map(|(_, points)| points)
            .sum()
    }

    /// Everything taken that the caller's side did not take.
    pub fn opposing_side_points(&self) -> u32 {
        let total: u32 = self.pile_points.iter().sum();
        total - self.caller_side_points()
    }
}

#[derive(Debug)]
pub enum RunError {
    Calling(CallingError),
    Policy {
        seat: PlayerPosition,
        source: PolicyError,
    },
    Play(PlayError),
    /// Policies must cover all five seats.
    MissingPolicies(usize),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Calling(err) => write!(f, "calling failed: {err}"),
            RunError::Policy { seat, source } => write!(f, "{seat} could not play: {source}"),
            RunError::Play(err) => write!(f, "illegal play: {err}"),
            RunError::MissingPolicies(count) => {
                write!(f, "expected {PLAYER_COUNT} policies, got {count}")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Calling(err) => Some(err),
            RunError::Policy { source, .. } => Some(source),
            RunError::Play(err) => Some(err),
            RunError::MissingPolicies(_) => None,
        }
    }
}

impl From<CallingError> for RunError {
    fn from(value: CallingError) -> Self {
        RunError::Calling(value)
    }
}

/// Drives one game from the deal to the last trick.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameRunner {
    config: RunnerConfig,
}

impl GameRunner {
    pub const fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RunnerConfig {
        self.config
    }

    pub fn run(
        &self,
        hands: [Hand; PLAYER_COUNT],
        controllers: [Controller; PLAYER_COUNT],
        policies: &mut [Box<dyn Policy>],
    ) -> Result<GameReport, RunError> {
        self.run_observed(hands, controllers, policies, |_| {})
    }

    pub fn run_observed<F>(
        &self,
        hands: [Hand; PLAYER_COUNT],
        controllers: [Controller; PLAYER_COUNT],
        policies: &mut [Box<dyn Policy>],
        mut observe: F,
    ) -> Result<GameReport, RunError>
    where
        F: FnMut(GameEvent<'_>),
    {
        if policies.len() != PLAYER_COUNT {
            return Err(RunError::MissingPolicies(policies.len()));
        }

        let mut hands = hands.into_iter();
        let mut players: [Player; PLAYER_COUNT] = std::array::from_fn(|i| {
            Player::new(
                PlayerPosition::LOOP[i],
                controllers[i],
                hands.next().unwrap_or_default(),
            )
        });

        let calling = CallingEngine::new(self.config.partner_scan).run(&mut players, policies)?;
        event!(
            target: "briscola_bot::runner",
            Level::INFO,
            caller = %calling.caller,
            call = %calling.call,
            partner = ?calling.partner.map(|seat| seat.index()),
            visits = calling.visits,
        );
        observe(GameEvent::Called(&calling));

        let mut round = Round::new(players, calling.call, calling.caller);
        while !round.is_over() {
            let seat = round.seat_to_play();
            let policy = policies[seat.index()].as_mut();
            let (card, outcome) = loop {
                let card = policy
                    .choose_play(round.state())
                    .map_err(|source| RunError::Policy { seat, source })?;
                match round.play_card(seat, card) {
                    Ok(outcome) => break (card, outcome),
                    Err(PlayError::CardNotInHand(card)) => {
                        policy.rejected(&Rejection::CardNotHeld(card));
                    }
                    Err(err) => return Err(RunError::Play(err)),
                }
            };
            observe(GameEvent::CardPlayed {
                seat,
                card,
                round: &round,
            });

            if let PlayOutcome::TrickCompleted { winner, points } = outcome {
                event!(
                    target: "briscola_bot::runner",
                    Level::DEBUG,
                    trick = round.trick_history().len(),
                    winner = %winner,
                    points,
                );
                if let Some(trick) = round.trick_history().last() {
                    observe(GameEvent::TrickCompleted {
                        trick,
                        round: &round,
                    });
                }
            }
        }

        let evaluation = evaluate(round.state());
        let report = GameReport {
            calling,
            trick_winners: round.trick_history().iter().map(|t| t.winner).collect(),
            pile_points: round.pile_points(),
            evaluation,
        };
        event!(
            target: "briscola_bot::runner",
            Level::INFO,
            evaluation,
            caller_side_points = report.caller_side_points(),
            "game over"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::{GameRunner, RunError, RunnerConfig};
    use crate::policy::SearchPolicy;
    use crate::search::SearchConfig;
    use briscola_core::calling::{Bid, BidContext};
    use briscola_core::game::state::GameState;
    use briscola_core::model::card::Card;
    use briscola_core::model::deck::Deck;
    use briscola_core::model::player::{Controller, PLAYER_COUNT};
    use briscola_core::model::rank::Rank;
    use briscola_core::model::suit::Suit;
    use briscola_core::policy::{Policy, PolicyError, Rejection};

    /// Offers a card it does not hold before every real play.
    struct Fumbling {
        inner: SearchPolicy,
        offer_bad: bool,
        rejections: usize,
    }

    impl Policy for Fumbling {
        fn choose_bid(&mut self, ctx: &BidContext<'_>) -> Result<Bid, PolicyError> {
            self.inner.choose_bid(ctx)
        }

        fn choose_trump(&mut self, ctx: &BidContext<'_>, rank: Rank) -> Result<Suit, PolicyError> {
            self.inner.choose_trump(ctx, rank)
        }

        fn choose_play(&mut self, state: &GameState) -> Result<Card, PolicyError> {
            self.offer_bad = !self.offer_bad;
            if self.offer_bad {
                let hand = state.hand();
                let foreign = state.remaining().iter().find(|c| !hand.contains(**c));
                if let Some(card) = foreign {
                    return Ok(*card);
                }
            }
            self.inner.choose_play(state)
        }

        fn rejected(&mut self, rejection: &Rejection) {
            assert!(matches!(rejection, Rejection::CardNotHeld(_)));
            self.rejections += 1;
        }
    }

    fn shallow() -> RunnerConfig {
        RunnerConfig {
            search: SearchConfig::new(1, false),
            ..RunnerConfig::default()
        }
    }

    #[test]
    fn rejected_cards_are_asked_again() {
        let hands = Deck::shuffled_with_seed(7).deal();
        let mut policies: Vec<Box<dyn Policy>> = (0..PLAYER_COUNT)
            .map(|_| {
                Box::new(Fumbling {
                    inner: SearchPolicy::new(SearchConfig::new(1, false)),
                    offer_bad: false,
                    rejections: 0,
                }) as Box<dyn Policy>
            })
            .collect();
        let mut plays = 0;
        let report = GameRunner::new(shallow())
            .run_observed(hands, [Controller::Automated; PLAYER_COUNT], &mut policies, |event| {
                if let super::GameEvent::CardPlayed { .. } = event {
                    plays += 1;
                }
            })
            .unwrap();
        assert_eq!(plays, 40);
        assert_eq!(report.trick_winners.len(), 8);
        assert_eq!(report.pile_points.iter().sum::<u32>(), 120);
    }

    #[test]
    fn short_policy_list_is_an_error() {
        let hands = Deck::ordered().deal();
        let mut policies: Vec<Box<dyn Policy>> = vec![Box::new(SearchPolicy::default())];
        let controllers = [Controller::Automated; PLAYER_COUNT];
        let result = GameRunner::default().run(hands, controllers, &mut policies);
        assert!(matches!(result, Err(RunError::MissingPolicies(1))));
    }
}
