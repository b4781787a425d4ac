use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::session::{GameConfig, ImageRef};

/// A sliding-tile puzzle in the terminal
#[derive(Parser, Debug)]
#[command(name = "tui15")]
#[command(about = "Slide the tiles back into order", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Number of rows and columns on the board
    #[arg(short, long, default_value_t = 4)]
    pub(crate) size: usize,

    /// Image painted across the tiles (sunset, forest, ocean, orchid)
    #[arg(short, long, default_value = "sunset")]
    pub(crate) image: String,

    /// Seed for reproducible shuffles
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Where log output goes
    #[arg(long, default_value = "./tui15.log")]
    pub(crate) log_file: PathBuf,

    /// Milliseconds between steps while showing the solution
    #[arg(long, default_value_t = 120)]
    pub(crate) replay_interval_ms: u64,

    /// Milliseconds between animation frames of a sliding tile; 0 disables animation
    #[arg(long, default_value_t = 12)]
    pub(crate) frame_delay_ms: u64,

    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity,
}

impl Cli {
    pub(crate) fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            image: ImageRef::new(self.image.as_str()),
        }
    }

    pub(crate) fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms)
    }

    pub(crate) fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
