use super::colors::Rgb;
use super::drawbuffer::DrawBuffer;
use super::geometry::{Bounds2D, Idx, Rectangle};
use super::tuxel::Tuxel;

/// A 2d grid of `Tuxel`s that draw buffers are painted onto, back to front.
pub(crate) struct Canvas {
    grid: Vec<Vec<Tuxel>>,
    rectangle: Rectangle,
}

impl Canvas {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        let rectangle = Rectangle(Idx(0, 0), Bounds2D(width, height));
        let grid = vec![vec![Tuxel::default(); width]; height];
        Self { grid, rectangle }
    }

    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (self.rectangle.width(), self.rectangle.height())
    }

    /// A blank draw buffer covering the given rectangle.
    pub(crate) fn get_draw_buffer(&self, r: Rectangle) -> DrawBuffer {
        DrawBuffer::new(r)
    }

    /// A draw buffer covering the whole canvas.
    pub(crate) fn get_layer(&self) -> DrawBuffer {
        DrawBuffer::new(self.rectangle)
    }

    pub(crate) fn clear(&mut self) {
        for row in self.grid.iter_mut() {
            for tuxel in row.iter_mut() {
                tuxel.clear();
            }
        }
    }

    /// Paint the written tuxels of a buffer over whatever is already on the canvas. Anything
    /// falling outside of the canvas is clipped.
    pub(crate) fn draw(&mut self, dbuf: &DrawBuffer) {
        let r = dbuf.rectangle();
        for (y, row) in dbuf.rows().enumerate() {
            for (x, tuxel) in row.iter().enumerate() {
                if !tuxel.active() {
                    continue;
                }
                let idx = Idx(r.x() + x, r.y() + y);
                if !self.rectangle.contains(&idx) {
                    continue;
                }
                let mut painted = Tuxel::default();
                painted.set_content(tuxel.content());
                for modifier in dbuf.modifiers() {
                    modifier.apply(&mut painted);
                }
                let (fg, bg) = tuxel.colors();
                if let Some(fg) = fg {
                    painted.set_fgcolor(fg);
                }
                if let Some(bg) = bg {
                    painted.set_bgcolor(bg);
                }
                if tuxel.bold() {
                    painted.set_bold(true);
                }
                self.grid[idx.y()][idx.x()] = painted;
            }
        }
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Tuxel]> {
        self.grid.iter().map(|row| row.as_slice())
    }

    pub(crate) fn get(&self, idx: &Idx) -> Option<&Tuxel> {
        self.grid.get(idx.y()).and_then(|row| row.get(idx.x()))
    }

    /// The characters of a single row.
    pub(crate) fn row_text(&self, y: usize) -> String {
        self.grid
            .get(y)
            .map(|row| row.iter().map(|t| t.content()).collect())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Modifier {
    SetForegroundColor(Rgb),
    SetBackgroundColor(Rgb),
    Bold,
}

impl Modifier {
    fn apply(&self, tuxel: &mut Tuxel) {
        match self {
            Self::SetForegroundColor(c) => tuxel.set_fgcolor(*c),
            Self::SetBackgroundColor(c) => tuxel.set_bgcolor(*c),
            Self::Bold => tuxel.set_bold(true),
        }
    }
}
