use crate::error::{Error, Result};

/// Smallest board side length that still has a legal move.
pub(crate) const MIN_SIZE: usize = 2;

/// Idx is a (row, column) position on the board.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Idx(pub(crate) usize, pub(crate) usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub(crate) fn row(&self) -> usize {
        self.0
    }

    pub(crate) fn col(&self) -> usize {
        self.1
    }
}

pub(crate) type Label = u32;

/// A numbered tile. The label is the tile's 1-indexed row-major rank in the solved arrangement
/// and never changes, no matter where the tile currently sits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Tile(Label);

impl Tile {
    pub(crate) fn label(&self) -> Label {
        self.0
    }
}

/// A cell either holds a tile or is the blank.
pub(crate) type Cell = Option<Tile>;

/// TileUpdate tells the rendering surface that the tile with the given label slid from one cell
/// to an adjacent one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TileUpdate {
    pub(crate) label: Label,
    pub(crate) from: Idx,
    pub(crate) to: Idx,
}

impl std::fmt::Display for TileUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile {0}: {1} -> {2}", self.label, self.from, self.to)
    }
}

/// MoveHint is the ordered list of tile updates produced by one or more moves.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct MoveHint {
    updates: Vec<TileUpdate>,
}

impl std::fmt::Display for MoveHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.updates.is_empty() {
            writeln!(f)?;
        }
        for update in &self.updates {
            writeln!(f, "  {}", update)?;
        }
        Ok(())
    }
}

impl MoveHint {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, label: Label, from: Idx, to: Idx) {
        self.updates.push(TileUpdate { label, from, to });
    }

    pub(crate) fn updates(&self) -> &[TileUpdate] {
        &self.updates
    }

    pub(crate) fn len(&self) -> usize {
        self.updates.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub(crate) fn extend(&mut self, other: MoveHint) {
        self.updates.extend(other.updates);
    }
}

/// Grid holds a size x size board of cells, row-major, and the position of its only blank.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: usize,
    slots: Vec<Cell>,
    blank: Idx,
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.slots.chunks(self.size) {
            for cell in row {
                match cell {
                    Some(tile) => write!(f, "{:>4}", tile.label())?,
                    None => write!(f, "{:>4}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// public methods
impl Grid {
    /// Create a solved board: labels 1..size² - 1 in row-major order with the blank in the
    /// bottom-right corner.
    pub(crate) fn new(size: usize) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(Error::InvalidSize(size));
        }
        let cells = size * size;
        let mut slots: Vec<Cell> = (1..=cells).map(|label| Some(Tile(label as Label))).collect();
        slots[cells - 1] = None;
        Ok(Self {
            size,
            slots,
            blank: Idx(size - 1, size - 1),
        })
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn blank(&self) -> Idx {
        self.blank
    }

    #[cfg(test)]
    pub(crate) fn get(&self, idx: &Idx) -> Result<Cell> {
        self.check_bounds(idx)?;
        Ok(self.slots[self.offset(idx)])
    }

    pub(crate) fn check_bounds(&self, idx: &Idx) -> Result<()> {
        if idx.row() >= self.size || idx.col() >= self.size {
            return Err(Error::OutOfBounds {
                idx: *idx,
                size: self.size,
            });
        }
        Ok(())
    }

    /// Whether the given position shares a row or a column with the blank.
    pub(crate) fn is_aligned(&self, target: &Idx) -> Result<bool> {
        self.check_bounds(target)?;
        Ok(aligned(target, &self.blank))
    }

    /// Positions of every tile that would move if activated.
    pub(crate) fn moveable(&self) -> Vec<Idx> {
        let blank = self.blank;
        (0..self.size)
            .map(|col| Idx(blank.row(), col))
            .chain((0..self.size).map(|row| Idx(row, blank.col())))
            .filter(|idx| *idx != blank)
            .collect()
    }

    /// shift slides the target tile, along with every tile between it and the blank, one cell
    /// toward the blank. The blank ends up where the target was. Returns None without touching
    /// the board when the target is not aligned with the blank.
    pub(crate) fn shift(&mut self, target: &Idx) -> Result<Option<MoveHint>> {
        self.check_bounds(target)?;
        if !aligned(target, &self.blank) {
            log::trace!("ignoring {} which is not aligned with {}", target, self.blank);
            return Ok(None);
        }

        let mut hint = MoveHint::new();
        let mut current = self.blank;
        while current != *target {
            let next = if current.row() == target.row() {
                Idx(current.row(), step_toward(current.col(), target.col()))
            } else {
                Idx(step_toward(current.row(), target.row()), current.col())
            };
            self.slide(&next, &current, &mut hint);
            current = next;
        }
        log::debug!("shifted toward {}:{}", target, hint);
        Ok(Some(hint))
    }

    /// A board is solved when the blank sits in the last cell and every tile sits at its own
    /// rank.
    pub(crate) fn is_solved(&self) -> bool {
        let last = self.size - 1;
        self.blank == Idx(last, last)
            && self
                .slots
                .iter()
                .enumerate()
                .all(|(offset, cell)| match cell {
                    Some(tile) => tile.label() as usize == offset + 1,
                    None => offset == self.slots.len() - 1,
                })
    }

    /// Iterate over every cell along with its position, row by row.
    pub(crate) fn cells(&self) -> impl Iterator<Item = (Idx, Cell)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(offset, cell)| (Idx(offset / self.size, offset % self.size), *cell))
    }
}

// private methods
impl Grid {
    fn offset(&self, idx: &Idx) -> usize {
        idx.row() * self.size + idx.col()
    }

    /// Move the tile at `from` into the blank at `to`; `from` becomes the blank. A single swap,
    /// so the board never holds more than one blank.
    fn slide(&mut self, from: &Idx, to: &Idx, hint: &mut MoveHint) {
        let (from_offset, to_offset) = (self.offset(from), self.offset(to));
        self.slots.swap(from_offset, to_offset);
        self.blank = *from;
        if let Some(tile) = self.slots[to_offset] {
            hint.set(tile.label(), *from, *to);
        }
    }
}

fn aligned(target: &Idx, blank: &Idx) -> bool {
    target != blank && (target.row() == blank.row() || target.col() == blank.col())
}

fn step_toward(from: usize, to: usize) -> usize {
    if to > from {
        from + 1
    } else {
        from - 1
    }
}

#[cfg(test)]
impl Grid {
    /// Build a grid from explicit rows, 0 marking the blank.
    pub(crate) fn from_rows(rows: &[&[Label]]) -> Self {
        let size = rows.len();
        let mut blank = None;
        let mut slots = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            assert_eq!(values.len(), size, "rows must form a square");
            for (col, value) in values.iter().enumerate() {
                if *value == 0 {
                    assert!(blank.is_none(), "only one blank allowed");
                    blank = Some(Idx(row, col));
                    slots.push(None);
                } else {
                    slots.push(Some(Tile(*value)));
                }
            }
        }
        Self {
            size,
            slots,
            blank: blank.expect("rows must contain a blank"),
        }
    }

    pub(crate) fn rows(&self) -> Vec<Vec<Label>> {
        self.slots
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.map_or(0, |t| t.label())).collect())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    fn sorted_labels(grid: &Grid) -> Vec<Label> {
        let mut labels: Vec<Label> = grid
            .cells()
            .filter_map(|(_, c)| c.map(|t| t.label()))
            .collect();
        labels.sort();
        labels
    }

    fn blanks(grid: &Grid) -> usize {
        grid.cells().filter(|(_, c)| c.is_none()).count()
    }

    fn grid_of(rows: &[Vec<Label>]) -> Grid {
        let rows: Vec<&[Label]> = rows.iter().map(Vec::as_slice).collect();
        Grid::from_rows(&rows)
    }

    #[rstest]
    #[case::two(2)]
    #[case::three(3)]
    #[case::four(4)]
    #[case::seven(7)]
    fn new_is_solved(#[case] size: usize) -> Result<()> {
        let grid = Grid::new(size)?;
        assert!(grid.is_solved());
        assert_eq!(grid.blank(), Idx(size - 1, size - 1));
        assert_eq!(blanks(&grid), 1);
        for (idx, cell) in grid.cells().filter(|(idx, _)| *idx != grid.blank()) {
            let expected = (idx.row() * size + idx.col() + 1) as Label;
            assert_eq!(cell.map(|t| t.label()), Some(expected), "label at {}", idx);
        }
        Ok(())
    }

    #[rstest]
    #[case::zero(0)]
    #[case::one(1)]
    fn new_rejects_degenerate_sizes(#[case] size: usize) {
        assert!(matches!(Grid::new(size), Err(Error::InvalidSize(s)) if s == size));
    }

    #[rstest]
    #[case::same_row(Idx(2, 0), true)]
    #[case::same_col(Idx(0, 2), true)]
    #[case::adjacent(Idx(2, 1), true)]
    #[case::diagonal(Idx(1, 1), false)]
    #[case::elsewhere(Idx(0, 1), false)]
    #[case::blank_itself(Idx(2, 2), false)]
    fn is_aligned(#[case] target: Idx, #[case] expected: bool) -> Result<()> {
        let grid = Grid::new(3)?;
        assert_eq!(grid.is_aligned(&target)?, expected);
        Ok(())
    }

    #[rstest]
    #[case::row_out(Idx(3, 0))]
    #[case::col_out(Idx(0, 3))]
    #[case::both_out(Idx(9, 9))]
    fn out_of_bounds_is_rejected(#[case] target: Idx) -> Result<()> {
        let mut grid = Grid::new(3)?;
        let before = grid.clone();
        assert!(matches!(grid.is_aligned(&target), Err(Error::OutOfBounds { .. })));
        assert!(matches!(grid.shift(&target), Err(Error::OutOfBounds { .. })));
        assert_eq!(grid, before);
        Ok(())
    }

    #[test]
    fn single_step_and_back() -> Result<()> {
        let mut grid = Grid::new(3)?;
        let hint = grid.shift(&Idx(2, 1))?.expect("aligned move");
        assert_eq!(
            hint.updates(),
            &[TileUpdate {
                label: 8,
                from: Idx(2, 1),
                to: Idx(2, 2)
            }]
        );
        assert_eq!(grid.blank(), Idx(2, 1));
        assert_eq!(grid.get(&Idx(2, 2))?.map(|t| t.label()), Some(8));
        assert!(!grid.is_solved());

        grid.shift(&Idx(2, 2))?.expect("aligned move");
        assert!(grid.is_solved());
        Ok(())
    }

    #[test]
    fn shift_run_moves_every_tile_once() -> Result<()> {
        let mut grid = Grid::new(4)?;
        let hint = grid.shift(&Idx(3, 0))?.expect("aligned move");
        assert_eq!(grid.rows()[3], vec![0, 13, 14, 15]);
        assert_eq!(grid.blank(), Idx(3, 0));
        let moved: Vec<(Label, Idx)> = hint.updates().iter().map(|u| (u.label, u.to)).collect();
        assert_eq!(moved, vec![(15, Idx(3, 3)), (14, Idx(3, 2)), (13, Idx(3, 1))]);
        for update in hint.updates() {
            assert_eq!(update.from.row(), update.to.row());
            assert_eq!(update.from.col() + 1, update.to.col());
        }
        Ok(())
    }

    #[rstest]
    #[case::up_column(
        vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]],
        Idx(0, 2),
        vec![vec![1, 2, 0], vec![4, 5, 3], vec![7, 8, 6]],
    )]
    #[case::down_column(
        vec![vec![0, 2, 3], vec![1, 5, 6], vec![4, 7, 8]],
        Idx(2, 0),
        vec![vec![1, 2, 3], vec![4, 5, 6], vec![0, 7, 8]],
    )]
    #[case::right_row(
        vec![vec![1, 2, 3], vec![0, 4, 5], vec![6, 7, 8]],
        Idx(1, 2),
        vec![vec![1, 2, 3], vec![4, 5, 0], vec![6, 7, 8]],
    )]
    #[case::left_partial_row(
        vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 11, 12], vec![13, 14, 15, 0]],
        Idx(3, 1),
        vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 11, 12], vec![13, 0, 14, 15]],
    )]
    fn shift(
        #[case] initial: Vec<Vec<Label>>,
        #[case] target: Idx,
        #[case] expected: Vec<Vec<Label>>,
    ) -> Result<()> {
        let mut grid = grid_of(&initial);
        let before = sorted_labels(&grid);
        grid.shift(&target)?.expect("aligned move");
        assert_eq!(grid, grid_of(&expected));
        assert_eq!(grid.blank(), target);
        assert_eq!(sorted_labels(&grid), before);
        assert_eq!(blanks(&grid), 1);
        Ok(())
    }

    #[test]
    fn unaligned_shift_is_a_noop() -> Result<()> {
        let mut grid = Grid::from_rows(&[&[1, 2, 3], &[4, 0, 6], &[7, 8, 5]]);
        let before = grid.clone();
        assert_eq!(grid.shift(&Idx(0, 0))?, None);
        assert_eq!(grid.shift(&Idx(1, 1))?, None);
        assert_eq!(grid, before);
        Ok(())
    }

    #[test]
    fn labels_alone_do_not_make_a_solved_board() {
        // every tile is in rank order, but the blank floats in the middle
        let grid = Grid::from_rows(&[&[1, 2, 3], &[4, 0, 5], &[6, 7, 8]]);
        assert!(!grid.is_solved());
    }

    #[test]
    fn moveable_lists_row_and_column() -> Result<()> {
        let mut grid = Grid::new(3)?;
        grid.shift(&Idx(1, 2))?;
        let mut moveable = grid.moveable();
        moveable.sort_by_key(|idx| (idx.row(), idx.col()));
        assert_eq!(
            moveable,
            vec![Idx(0, 2), Idx(1, 0), Idx(1, 1), Idx(2, 2)]
        );
        Ok(())
    }
}
