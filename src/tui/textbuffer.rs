use std::cmp::Ordering;

use textwrap::wrap;

use super::colors::Rgb;
use super::drawbuffer::DrawBuffer;
use super::error::{InnerError, Result};
use super::geometry::{Idx, Position, Rectangle};

#[derive(Clone, Default, PartialEq)]
pub(crate) enum HAlignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Default, PartialEq)]
pub(crate) enum VAlignment {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Clone, Default, PartialEq)]
pub(crate) struct FormatOptions {
    pub(crate) halign: HAlignment,
    pub(crate) valign: VAlignment,
}

struct CharBuf {
    text: String,
    fgcolor: Option<Rgb>,
    bgcolor: Option<Rgb>,
}

impl CharBuf {
    fn wrap(&self, width: usize) -> Vec<CharBuf> {
        wrap(&self.text, width)
            .into_iter()
            .map(|s| CharBuf {
                text: s.to_string(),
                fgcolor: self.fgcolor,
                bgcolor: self.bgcolor,
            })
            .collect()
    }

    #[inline]
    fn len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A line-oriented buffer that makes writing wrapped, aligned text into a DrawBuffer somewhat
/// easier.
pub(crate) struct TextBuffer {
    bufs: Vec<CharBuf>,
    format: FormatOptions,
    dbuf: DrawBuffer,
}

impl TextBuffer {
    pub(crate) fn new(dbuf: DrawBuffer) -> Self {
        Self {
            bufs: Vec::new(),
            format: FormatOptions::default(),
            dbuf,
        }
    }

    pub fn format(&mut self, format: &FormatOptions) {
        if &self.format == format {
            return;
        }
        self.format = format.clone()
    }

    pub fn write(&mut self, s: &str, fgcolor: Option<Rgb>, bgcolor: Option<Rgb>) {
        self.bufs.push(CharBuf {
            text: s.to_string(),
            fgcolor,
            bgcolor,
        })
    }

    /// Lay the written lines out into the underlying buffer and hand it back.
    pub fn flush(mut self) -> Result<DrawBuffer> {
        let local = Rectangle(Idx(0, 0), self.dbuf.rectangle().1);
        let rect = if self.dbuf.has_border() {
            local.shrink_by(1, 1)
        } else {
            local
        };

        if rect.width() == 0 || rect.height() == 0 {
            return Ok(self.dbuf);
        }

        let bufs = self
            .bufs
            .iter()
            .flat_map(|cb| cb.wrap(rect.width()))
            .collect::<Vec<CharBuf>>();

        let (mut y_index, buf_skip) = match (&self.format.valign, bufs.len().cmp(&rect.height())) {
            (VAlignment::Top, _) => (0usize, 0usize),
            (_, Ordering::Equal) => (0usize, 0usize),
            (VAlignment::Middle, Ordering::Less) => {
                let difference = rect.height() - bufs.len();
                (difference / 2, 0)
            }
            (VAlignment::Middle, Ordering::Greater) => {
                let difference = bufs.len() - rect.height();
                (0, difference / 2)
            }
            (VAlignment::Bottom, Ordering::Less) => (rect.height() - bufs.len(), 0),
            (VAlignment::Bottom, Ordering::Greater) => (0, bufs.len() - rect.height()),
        };

        for charbuf in bufs.iter().skip(buf_skip) {
            if y_index >= rect.height() {
                // can't write beyond the bottom of the rectangle
                break;
            }

            let buflen = charbuf.len();
            let width_diff = if buflen > rect.width() {
                // wrapping on the rectangle width should make this unreachable
                return Err(InnerError::OutOfBoundsX(buflen).into());
            } else {
                rect.width() - buflen
            };

            let x_index = match &self.format.halign {
                HAlignment::Left => 0,
                HAlignment::Center => width_diff / 2,
                HAlignment::Right => width_diff,
            };

            for (offset, c) in charbuf.text.chars().enumerate() {
                let pos = Position::Idx(rect.x() + x_index + offset, rect.y() + y_index);
                let tuxel = self
                    .dbuf
                    .get_tuxel_mut(pos)
                    .ok_or(InnerError::OutOfBoundsY(y_index))?;
                tuxel.set_content(c);
                if let Some(c) = charbuf.bgcolor {
                    tuxel.set_bgcolor(c);
                }
                if let Some(c) = charbuf.fgcolor {
                    tuxel.set_fgcolor(c);
                }
            }

            y_index += 1;
        }

        Ok(self.dbuf)
    }
}
