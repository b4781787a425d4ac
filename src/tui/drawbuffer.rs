use super::canvas::Modifier;
use super::error::Result;
use super::geometry::{Direction, Idx, Position, Rectangle};
use super::tuxel::Tuxel;

/// A rectangular patch of tuxels that is painted onto a `Canvas` as a unit: a tile, the board
/// frame, a message box.
#[derive(Clone, Debug)]
pub(crate) struct DrawBuffer {
    rectangle: Rectangle,
    border: bool,
    buf: Vec<Vec<Tuxel>>,
    modifiers: Vec<Modifier>,
}

impl DrawBuffer {
    pub(crate) fn new(rectangle: Rectangle) -> Self {
        let buf = vec![vec![Tuxel::default(); rectangle.width()]; rectangle.height()];
        Self {
            rectangle,
            border: false,
            buf,
            modifiers: Vec::new(),
        }
    }

    pub(crate) fn rectangle(&self) -> Rectangle {
        self.rectangle
    }

    pub(crate) fn has_border(&self) -> bool {
        self.border
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &Vec<Tuxel>> {
        self.buf.iter()
    }

    pub(crate) fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub(crate) fn modify(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier)
    }

    /// Move the buffer across the canvas without touching its content.
    pub(crate) fn translate(&mut self, mag: usize, dir: &Direction) -> Result<()> {
        self.rectangle.translate(mag, dir)
    }

    pub(crate) fn move_to(&mut self, idx: Idx) {
        self.rectangle.0 = idx;
    }

    pub(crate) fn get_tuxel_mut(&mut self, pos: Position) -> Option<&mut Tuxel> {
        let (x, y) = self.rectangle.relative_idx(&pos);
        self.buf.get_mut(y).and_then(|row| row.get_mut(x))
    }

    /// Fill everything inside the border (or the whole buffer, without one) with `c`.
    pub(crate) fn fill(&mut self, c: char) {
        let inner = self.inner_bounds();
        for row in self.buf.iter_mut().skip(inner.y()).take(inner.height()) {
            for tuxel in row.iter_mut().skip(inner.x()).take(inner.width()) {
                tuxel.set_content(c);
            }
        }
    }

    pub(crate) fn draw_border(&mut self) {
        let (width, height) = (self.rectangle.width(), self.rectangle.height());
        if width < 2 || height < 2 {
            // can only draw a border with at least two rows and two columns
            return;
        }
        let box_corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let box_horizontal = boxy::Char::horizontal(boxy::Weight::Doubled);
        let box_vertical = boxy::Char::vertical(boxy::Weight::Doubled);

        // draw corners
        self.set(Position::TopLeft, box_corner.clone().into());
        self.set(Position::TopRight, box_corner.clone().rotate_cw(1).into());
        self.set(
            Position::BottomRight,
            box_corner.clone().rotate_cw(2).into(),
        );
        self.set(
            Position::BottomLeft,
            box_corner.clone().rotate_ccw(1).into(),
        );

        // draw non-corner top and bottom
        for x in 1..width - 1 {
            self.set(Position::Idx(x, 0), box_horizontal.clone().into());
            self.set(Position::Idx(x, height - 1), box_horizontal.clone().into());
        }

        // draw non-corner sides
        for y in 1..height - 1 {
            self.set(Position::Idx(0, y), box_vertical.clone().into());
            self.set(Position::Idx(width - 1, y), box_vertical.clone().into());
        }

        self.border = true;
    }

    pub(crate) fn write_center(&mut self, s: &str) {
        let inner = self.inner_bounds();
        let y = self.rectangle.height() / 2;
        let len = s.chars().count();
        let x_offset = if len >= inner.width() {
            inner.x()
        } else {
            inner.x() + ((inner.width() as f32 - len as f32) / 2.0).ceil() as usize
        };
        for (offset, c) in s.chars().take(inner.width()).enumerate() {
            self.set(Position::Idx(x_offset + offset, y), c);
        }
    }
}

// private methods
impl DrawBuffer {
    fn set(&mut self, pos: Position, c: char) {
        if let Some(tuxel) = self.get_tuxel_mut(pos) {
            tuxel.set_content(c);
        }
    }

    /// The area inside the border, relative to the buffer.
    fn inner_bounds(&self) -> Rectangle {
        let local = Rectangle(Idx(0, 0), self.rectangle.1);
        if self.border {
            local.shrink_by(1, 1)
        } else {
            local
        }
    }
}
