use super::error::{InnerError, Result};

/// Idx is a terminal coordinate, columns first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Idx(pub usize, pub usize);

impl Idx {
    #[inline(always)]
    pub(crate) fn x(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn y(&self) -> usize {
        self.1
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Bounds2D(pub usize, pub usize);

impl Bounds2D {
    #[inline(always)]
    pub(crate) fn width(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn height(&self) -> usize {
        self.1
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Rectangle(pub Idx, pub Bounds2D);

impl Rectangle {
    #[inline(always)]
    pub(crate) fn width(&self) -> usize {
        self.1 .0
    }

    #[inline(always)]
    pub(crate) fn height(&self) -> usize {
        self.1 .1
    }

    #[inline(always)]
    pub(crate) fn x(&self) -> usize {
        self.0 .0
    }

    #[inline(always)]
    pub(crate) fn y(&self) -> usize {
        self.0 .1
    }

    #[inline(always)]
    pub(crate) fn relative_idx(&self, pos: &Position) -> (usize, usize) {
        match pos {
            Position::TopLeft => (0, 0),
            Position::TopRight => (self.width() - 1, 0),
            Position::BottomLeft => (0, self.height() - 1),
            Position::BottomRight => (self.width() - 1, self.height() - 1),
            Position::Idx(x, y) => (*x, *y),
        }
    }

    /// Move the rectangle by `mag` cells. Moving left of or above the origin fails and leaves the
    /// rectangle where it was.
    #[inline(always)]
    pub(crate) fn translate(&mut self, mag: usize, dir: &Direction) -> Result<()> {
        match dir {
            Direction::Left if self.x() >= mag => self.0 .0 -= mag,
            Direction::Right => self.0 .0 += mag,
            Direction::Up if self.y() >= mag => self.0 .1 -= mag,
            Direction::Down => self.0 .1 += mag,
            _ => return Err(InnerError::TranslationImpossible(dir.clone()).into()),
        }
        Ok(())
    }

    /// The first column and row past the rectangle.
    #[inline(always)]
    pub(crate) fn extents(&self) -> (usize, usize) {
        (self.x() + self.width(), self.y() + self.height())
    }

    #[inline(always)]
    pub(crate) fn contains(&self, idx: &Idx) -> bool {
        let (x_extent, y_extent) = self.extents();
        idx.x() >= self.x() && idx.x() < x_extent && idx.y() >= self.y() && idx.y() < y_extent
    }

    /// Shrink the rectangle by the given margins on every side.
    pub(crate) fn shrink_by(&self, x: usize, y: usize) -> Rectangle {
        Rectangle(
            Idx(self.x() + x, self.y() + y),
            Bounds2D(
                self.width().saturating_sub(2 * x),
                self.height().saturating_sub(2 * y),
            ),
        )
    }
}

pub(crate) enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Idx(usize, usize),
}

/// Direction represents the direction indicated by the player.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    fn rectangle(x: usize, y: usize, width: usize, height: usize) -> Rectangle {
        Rectangle(Idx(x, y), Bounds2D(width, height))
    }

    #[rstest]
    #[case::move_right(1, Direction::Right, rectangle(0, 0, 5, 5), rectangle(1, 0, 5, 5))]
    #[case::move_left(1, Direction::Left, rectangle(10, 0, 5, 5), rectangle(9, 0, 5, 5))]
    #[case::move_left_to_zero(1, Direction::Left, rectangle(1, 0, 5, 5), rectangle(0, 0, 5, 5))]
    #[case::move_up(3, Direction::Up, rectangle(0, 10, 5, 5), rectangle(0, 7, 5, 5))]
    #[case::move_down(1, Direction::Down, rectangle(0, 0, 5, 5), rectangle(0, 1, 5, 5))]
    fn rectangle_translate(
        #[case] magnitude: usize,
        #[case] direction: Direction,
        #[case] initial: Rectangle,
        #[case] expected: Rectangle,
    ) -> Result<()> {
        let mut updated = initial;
        updated.translate(magnitude, &direction)?;
        assert_eq!(expected, updated);
        Ok(())
    }

    #[rstest]
    #[case::left_past_zero(Direction::Left, rectangle(0, 4, 5, 5))]
    #[case::up_past_zero(Direction::Up, rectangle(4, 0, 5, 5))]
    fn rectangle_translate_impossible(#[case] direction: Direction, #[case] initial: Rectangle) {
        let mut updated = initial;
        assert!(updated.translate(1, &direction).is_err());
        assert_eq!(initial, updated);
    }

    #[rstest]
    #[case::origin(Idx(2, 3), true)]
    #[case::inside(Idx(4, 5), true)]
    #[case::last(Idx(6, 7), true)]
    #[case::past_x(Idx(7, 5), false)]
    #[case::past_y(Idx(4, 8), false)]
    #[case::before(Idx(1, 3), false)]
    fn rectangle_contains(#[case] idx: Idx, #[case] expected: bool) {
        let r = rectangle(2, 3, 5, 5);
        assert_eq!(r.contains(&idx), expected);
    }

    #[test]
    fn shrink() {
        assert_eq!(rectangle(2, 2, 10, 6).shrink_by(1, 1), rectangle(3, 3, 8, 4));
        assert_eq!(rectangle(0, 0, 1, 1).shrink_by(1, 1), rectangle(1, 1, 0, 0));
    }
}
