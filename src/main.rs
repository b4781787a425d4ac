use std::io::stdout;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};

mod cli;
mod engine;
mod error;
mod session;
mod tui;
mod tui15;

use cli::Cli;
use session::GameSession;
use tui::crossterm::{Crossterm, CrosstermEvents};
use tui15::Tui15;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => {
            log::info!("seeding shuffles with {}", seed);
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(thread_rng()),
    };
    let session = GameSession::new(cli.game_config(), rng)?;

    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    let event_source = CrosstermEvents::new(cli.replay_interval());
    let tui15 = Tui15::new(session, renderer, event_source, cli.frame_delay())?;

    tui15.run()?;
    Ok(())
}

fn init_logging(cli: &Cli) -> error::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(cli.verbose.log_level_filter())
        .chain(fern::log_file(&cli.log_file)?)
        .apply()?;
    Ok(())
}
