//! Game session: the board, its configuration and the phase of play, owned by whoever hosts the
//! game and handed to the user interface.

use log::{debug, info};
use rand::RngCore;

use crate::engine::board::Board;
use crate::engine::grid::{Grid, Idx, MoveHint};
use crate::error::Result;

/// An opaque reference to the background image of the board. The session only stores and
/// forwards it; what it means is up to the rendering surface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ImageRef(String);

impl ImageRef {
    pub(crate) fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings consumed when a board is created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameConfig {
    pub(crate) size: usize,
    pub(crate) image: ImageRef,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// A fresh, solved board waiting for a game to start.
    Ready,
    Playing,
    /// The recorded history is being played back one move per tick.
    Replaying,
    Solved,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Replaying => "replaying",
            Self::Solved => "solved",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a move as seen by the rendering surface: the tiles that moved, and whether this
/// move is the one that solved the board. `solved` is true at most once per game.
#[derive(Debug, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) hint: MoveHint,
    pub(crate) solved: bool,
}

pub(crate) struct GameSession {
    config: GameConfig,
    board: Board,
    phase: Phase,
    rng: Box<dyn RngCore>,
}

impl GameSession {
    /// Create a session with a solved board. Fails if the configured size is invalid.
    pub(crate) fn new(config: GameConfig, rng: impl RngCore + 'static) -> Result<Self> {
        let board = Board::new(config.size)?;
        info!("new {0}x{0} session with image {1}", config.size, config.image);
        Ok(Self {
            config,
            board,
            phase: Phase::Ready,
            rng: Box::new(rng),
        })
    }

    pub(crate) fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(crate) fn image(&self) -> &ImageRef {
        &self.config.image
    }

    pub(crate) fn grid(&self) -> &Grid {
        self.board.grid()
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Shuffle the board and start accepting moves.
    pub(crate) fn start(&mut self) -> Result<MoveHint> {
        let hint = self.board.shuffle(&mut self.rng)?;
        self.set_phase(Phase::Playing);
        Ok(hint)
    }

    /// Activate the tile at the given position. Outside of play, and for tiles not aligned with
    /// the blank, this does nothing.
    pub(crate) fn activate(&mut self, idx: &Idx) -> Result<Option<Outcome>> {
        self.board.grid().check_bounds(idx)?;
        if self.phase != Phase::Playing {
            debug!("ignoring activation of {} while {}", idx, self.phase);
            return Ok(None);
        }
        if !self.board.is_aligned(idx)? {
            return Ok(None);
        }
        let hint = match self.board.shift(idx)? {
            Some(hint) => hint,
            None => return Ok(None),
        };
        let solved = self.board.is_solved();
        if solved {
            self.set_phase(Phase::Solved);
        }
        Ok(Some(Outcome { hint, solved }))
    }

    /// Positions of the tiles that would move if activated; empty outside of play.
    pub(crate) fn moveable(&self) -> Vec<Idx> {
        match self.phase {
            Phase::Playing => self.board.grid().moveable(),
            _ => Vec::new(),
        }
    }

    /// Begin playing the recorded history back. Returns whether a replay started.
    pub(crate) fn begin_replay(&mut self) -> bool {
        if self.phase != Phase::Playing || !self.board.can_replay() {
            return false;
        }
        self.set_phase(Phase::Replaying);
        true
    }

    /// Undo one recorded move. When the history runs out the replay ends; the outcome of the
    /// final step carries the solved signal.
    pub(crate) fn replay_step(&mut self) -> Result<Option<Outcome>> {
        if self.phase != Phase::Replaying {
            return Ok(None);
        }
        let hint = self.board.replay_step()?;
        if !self.board.history().is_empty() {
            return Ok(hint.map(|hint| Outcome {
                hint,
                solved: false,
            }));
        }

        let solved = self.board.is_solved();
        self.set_phase(if solved {
            Phase::Solved
        } else {
            Phase::Playing
        });
        Ok(match hint {
            Some(hint) => Some(Outcome { hint, solved }),
            None if solved => Some(Outcome {
                hint: MoveHint::new(),
                solved,
            }),
            None => None,
        })
    }

    /// Stop a running replay and hand the board back to the player.
    pub(crate) fn cancel_replay(&mut self) {
        if self.phase == Phase::Replaying {
            self.set_phase(Phase::Playing);
        }
    }

    /// Replace the board with a fresh one of the given size. Returns whether anything changed; an
    /// invalid size leaves the session as it was.
    pub(crate) fn change_size(&mut self, size: usize) -> Result<bool> {
        if size == self.config.size {
            return Ok(false);
        }
        self.board = Board::new(size)?;
        self.config.size = size;
        info!("board resized to {0}x{0}", size);
        self.set_phase(Phase::Ready);
        Ok(true)
    }

    /// Switch background image, which starts over with a fresh board.
    pub(crate) fn change_image(&mut self, image: ImageRef) -> Result<bool> {
        if image == self.config.image {
            return Ok(false);
        }
        self.board = Board::new(self.config.size)?;
        info!("board image changed to {}", image);
        self.config.image = image;
        self.set_phase(Phase::Ready);
        Ok(true)
    }
}

// private methods
impl GameSession {
    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            info!("session {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }
}
