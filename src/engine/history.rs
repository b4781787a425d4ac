use super::grid::Idx;

/// ShuffleHistory is the path the blank has walked since the board was last shuffled away from
/// its solved arrangement. Consecutive positions always share a row or a column, so walking the
/// path backwards undoes every move. While the path is not empty its last position is where the
/// blank currently sits.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ShuffleHistory {
    positions: Vec<Idx>,
}

impl ShuffleHistory {
    /// Forget everything and start a new path at `start`.
    pub(crate) fn reset(&mut self, start: Idx) {
        self.positions.clear();
        self.positions.push(start);
    }

    /// Record that the blank moved from `from` to `to`. Returning to the previously recorded
    /// position cancels the last entry instead of growing the path.
    pub(crate) fn record(&mut self, from: Idx, to: Idx) {
        if self.positions.last() != Some(&from) {
            self.positions.push(from);
        }
        let len = self.positions.len();
        if self.positions[len - 1] == to {
            return;
        }
        if len >= 2 && self.positions[len - 2] == to {
            self.positions.pop();
            return;
        }
        self.positions.push(to);
    }

    pub(crate) fn pop(&mut self) -> Option<Idx> {
        self.positions.pop()
    }

    /// The position recorded before the current one, which replay moves the blank back to.
    pub(crate) fn previous(&self) -> Option<Idx> {
        let len = self.positions.len();
        if len < 2 {
            return None;
        }
        Some(self.positions[len - 2])
    }

    pub(crate) fn clear(&mut self) {
        self.positions.clear()
    }

    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn positions(&self) -> &[Idx] {
        &self.positions
    }
}
