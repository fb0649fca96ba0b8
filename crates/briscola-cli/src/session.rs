use crate::config::AppConfig;
use crate::console::ConsolePolicy;
use crate::display;
use anyhow::{Context, Result};
use briscola_bot::{GameEvent, GameReport, GameRunner, SearchPolicy};
use briscola_core::game::serialization::StateSnapshot;
use briscola_core::model::deck::Deck;
use briscola_core::model::hand::Hand;
use briscola_core::model::player::{Controller, PLAYER_COUNT, PlayerPosition};
use briscola_core::policy::Policy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub evaluations: Vec<i32>,
}

impl SimulationSummary {
    pub fn games(&self) -> usize {
        self.evaluations.len()
    }

    pub fn average(&self) -> f64 {
        if self.evaluations.is_empty() {
            return 0.0;
        }
        self.evaluations.iter().map(|v| f64::from(*v)).sum::<f64>() / self.games() as f64
    }
}

/// Plays games between automated seats and reports each one to `out`.
pub struct Session<'a> {
    config: &'a AppConfig,
    verbose: bool,
    rng: StdRng,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a AppConfig, verbose: bool) -> Self {
        let rng = match config.deal.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            verbose,
            rng,
        }
    }

    pub fn next_deal(&mut self) -> [Hand; PLAYER_COUNT] {
        Deck::shuffled(&mut self.rng).deal()
    }

    /// Runs `count` automated games. `first` replaces the first shuffled deal.
    pub fn simulate<W: Write>(
        &mut self,
        count: usize,
        first: Option<[Hand; PLAYER_COUNT]>,
        out: &mut W,
    ) -> Result<SimulationSummary> {
        let search = self.config.search_config();
        let mut first = first;
        let mut evaluations = Vec::with_capacity(count);

        for game in 1..=count {
            let hands = match first.take() {
                Some(hands) => hands,
                None => self.next_deal(),
            };
            let mut policies: Vec<Box<dyn Policy>> = (0..PLAYER_COUNT)
                .map(|_| Box::new(SearchPolicy::new(search)) as Box<dyn Policy>)
                .collect();
            let report = self.play(
                hands,
                [Controller::Automated; PLAYER_COUNT],
                &mut policies,
                out,
            )?;
            display::write_report(out, game, &report)?;
            evaluations.push(report.evaluation);
        }

        let summary = SimulationSummary { evaluations };
        writeln!(
            out,
            "Average evaluation over {} simulations: {:.2}",
            summary.games(),
            summary.average()
        )?;
        Ok(summary)
    }

    /// One game with a person at `human`, answering through `input`/`prompts`.
    pub fn play_human<R, P, W>(
        &mut self,
        human: PlayerPosition,
        hands: [Hand; PLAYER_COUNT],
        input: R,
        prompts: P,
        out: &mut W,
    ) -> Result<GameReport>
    where
        R: BufRead + 'static,
        P: Write + 'static,
        W: Write,
    {
        let search = self.config.search_config();
        let mut controllers = [Controller::Automated; PLAYER_COUNT];
        controllers[human.index()] = Controller::Human;

        let mut policies: Vec<Box<dyn Policy>> = (0..PLAYER_COUNT)
            .map(|_| Box::new(SearchPolicy::new(search)) as Box<dyn Policy>)
            .collect();
        policies[human.index()] = Box::new(ConsolePolicy::new(input, prompts));

        let report = self.play(hands, controllers, &mut policies, out)?;
        writeln!(out, "Final score: {}", report.evaluation)?;
        Ok(report)
    }

    fn play<W: Write>(
        &mut self,
        hands: [Hand; PLAYER_COUNT],
        controllers: [Controller; PLAYER_COUNT],
        policies: &mut [Box<dyn Policy>],
        out: &mut W,
    ) -> Result<GameReport> {
        let verbose = self.verbose || controllers.contains(&Controller::Human);
        let runner = GameRunner::new(self.config.runner_config());
        let mut written: io::Result<()> = Ok(());

        let report = runner
            .run_observed(hands, controllers, policies, |event| {
                if written.is_err() {
                    return;
                }
                written = report_event(&mut *out, &event, verbose);
            })
            .context("game aborted")?;
        written.context("writing game output")?;
        Ok(report)
    }
}

fn report_event<W: Write>(out: &mut W, event: &GameEvent<'_>, verbose: bool) -> io::Result<()> {
    match event {
        GameEvent::Called(outcome) if verbose => display::write_calling(out, outcome),
        GameEvent::CardPlayed { seat, card, .. } if verbose => writeln!(out, "{seat} plays {card}"),
        GameEvent::TrickCompleted { trick, round } => {
            if let Ok(json) = StateSnapshot::to_json(round.state()) {
                event!(target: "briscola::session", Level::DEBUG, snapshot = %json);
            }
            if verbose {
                let (winner, points) = (trick.winner, trick.points);
                writeln!(out, "{winner} takes the trick for {points} points")?;
                display::write_state(out, round.state())?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
