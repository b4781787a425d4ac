use rand::Rng;

use super::grid::{Grid, Idx, MoveHint};
use super::history::ShuffleHistory;
use crate::error::{Error, Result};

/// Number of shuffle steps per board cell, so the walk grows with the board's area.
pub(crate) const SHUFFLE_STEPS_PER_CELL: usize = 25;

/// Axis of a single shuffle step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Axis {
    /// Move the blank along its column.
    Vertical,
    /// Move the blank along its row.
    Horizontal,
}

/// Board represents a sliding-tile board that keeps track of the path its blank has walked, so
/// that the shuffle (and anything played since) can be replayed backwards.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    grid: Grid,
    history: ShuffleHistory,
}

impl Board {
    /// Initialize a new solved board with the given side length.
    pub(crate) fn new(size: usize) -> Result<Self> {
        let grid = Grid::new(size)?;
        let mut history = ShuffleHistory::default();
        history.reset(grid.blank());
        Ok(Self { grid, history })
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn history(&self) -> &ShuffleHistory {
        &self.history
    }

    pub(crate) fn size(&self) -> usize {
        self.grid.size()
    }

    pub(crate) fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    pub(crate) fn is_aligned(&self, target: &Idx) -> Result<bool> {
        self.grid.is_aligned(target)
    }

    /// shift moves the target tile and the run of tiles between it and the blank, recording the
    /// blank's new position. Returns a MoveHint if anything moved.
    pub(crate) fn shift(&mut self, target: &Idx) -> Result<Option<MoveHint>> {
        let from = self.grid.blank();
        let hint = self.grid.shift(target)?;
        if hint.is_some() {
            self.history.record(from, self.grid.blank());
        }
        Ok(hint)
    }

    /// shuffle scrambles the board with a random walk of legal moves, so the result is always
    /// solvable. The walk is repeated whenever it happens to end on the solved arrangement.
    pub(crate) fn shuffle<R: Rng>(&mut self, rng: &mut R) -> Result<MoveHint> {
        if self.grid.is_solved() {
            self.history.reset(self.grid.blank());
        }
        let steps = shuffle_steps(self.size());
        let mut hint = MoveHint::new();
        loop {
            hint.extend(self.walk(rng, steps)?);
            if !self.grid.is_solved() {
                break;
            }
            log::debug!("shuffle walk ended on a solved board, walking again");
        }
        log::debug!(
            "shuffled {0}x{0} board, {1} recorded positions\n{2}",
            self.size(),
            self.history.len(),
            self.grid
        );
        Ok(hint)
    }

    /// Whether there is a recorded move left to undo.
    pub(crate) fn can_replay(&self) -> bool {
        self.history.previous().is_some()
    }

    /// replay_step undoes one recorded move, leaving the blank's new position on top of the
    /// history. Returns None once the history is exhausted; the history is empty from the moment
    /// the last move has been undone.
    pub(crate) fn replay_step(&mut self) -> Result<Option<MoveHint>> {
        let target = match self.history.previous() {
            Some(target) => target,
            None => {
                self.history.clear();
                return Ok(None);
            }
        };
        let hint = match self.grid.shift(&target)? {
            Some(hint) => hint,
            None => return Err(Error::BrokenHistory(target)),
        };
        self.history.pop();
        if self.history.previous().is_none() {
            self.history.clear();
        }
        Ok(Some(hint))
    }

    /// Replay the whole history at once.
    #[cfg(test)]
    pub(crate) fn replay_all(&mut self) -> Result<MoveHint> {
        let mut hint = MoveHint::new();
        while let Some(step) = self.replay_step()? {
            hint.extend(step);
        }
        Ok(hint)
    }
}

// private methods
impl Board {
    fn walk<R: Rng>(&mut self, rng: &mut R, steps: usize) -> Result<MoveHint> {
        let mut hint = MoveHint::new();
        for step in 0..steps {
            let axis = if step % 2 == 0 {
                Axis::Vertical
            } else {
                Axis::Horizontal
            };
            let target = shuffle_target(rng, self.grid.blank(), self.size(), axis);
            if let Some(moved) = self.shift(&target)? {
                hint.extend(moved);
            }
        }
        Ok(hint)
    }
}

pub(crate) fn shuffle_steps(size: usize) -> usize {
    SHUFFLE_STEPS_PER_CELL * size * size
}

/// Pick a position on the blank's row or column that is not the blank itself.
fn shuffle_target<R: Rng>(rng: &mut R, blank: Idx, size: usize, axis: Axis) -> Idx {
    let mut square = rng.gen_range(0..size - 1);
    match axis {
        Axis::Vertical => {
            if square == blank.row() {
                square += 1;
            }
            Idx(square, blank.col())
        }
        Axis::Horizontal => {
            if square == blank.col() {
                square += 1;
            }
            Idx(blank.row(), square)
        }
    }
}
