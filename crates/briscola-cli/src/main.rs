use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use briscola_cli::config::AppConfig;
use briscola_cli::deal::read_deal;
use briscola_cli::logging::init_logging;
use briscola_cli::session::Session;
use briscola_core::AppInfo;
use briscola_core::model::player::PlayerPosition;

/// Five-player Briscola Chiamata with minimax-driven bots.
#[derive(Debug, Parser)]
#[command(
    name = "briscola",
    author,
    version,
    about = "Five-player Briscola Chiamata with minimax bots",
    after_help = "Without flags a single game between automated players is simulated."
)]
struct Cli {
    /// Number of automated games to simulate.
    #[arg(
        short,
        long,
        value_name = "COUNT",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    simulations: u32,

    /// Play one game as a person seated at this position (0-4).
    #[arg(
        short = 'p',
        long,
        value_name = "SEAT",
        value_parser = clap::value_parser!(u8).range(0..5),
        conflicts_with = "simulations"
    )]
    position: Option<u8>,

    /// Read the deal from standard input, one line of eight codes per player.
    #[arg(short, long)]
    manual: bool,

    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the RNG seed used for shuffling.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the search depth.
    #[arg(long, value_name = "DEPTH", value_parser = clap::value_parser!(u32).range(1..))]
    depth: Option<u32>,

    /// Print the table after every trick.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };

    if let Some(depth) = cli.depth {
        config.search.depth = Some(depth);
    }

    if let Some(seed) = cli.seed {
        config.deal.seed = Some(seed);
    }

    config.validate()?;
    let _logging_guard = init_logging(&config.logging)?;
    tracing::info!(
        app = AppInfo::name(),
        version = AppInfo::version(),
        depth = config.search_config().depth,
        "starting"
    );

    let mut stdout = io::stdout();
    let first_deal = if cli.manual {
        let deal = read_deal(&mut io::stdin().lock(), &mut stdout).context("reading manual deal")?;
        Some(deal)
    } else {
        None
    };

    let mut session = Session::new(&config, cli.verbose);
    let human = cli
        .position
        .and_then(|seat| PlayerPosition::from_index(usize::from(seat)));
    match human {
        Some(human) => {
            let hands = match first_deal {
                Some(hands) => hands,
                None => session.next_deal(),
            };
            writeln!(
                stdout,
                "Begin calling phase: enter a rank 0-9, or -1 to pass."
            )?;
            session.play_human(human, hands, io::stdin().lock(), io::stdout(), &mut stdout)?;
        }
        None => {
            session.simulate(cli.simulations as usize, first_deal, &mut stdout)?;
        }
    }

    stdout.flush()?;
    Ok(())
}
