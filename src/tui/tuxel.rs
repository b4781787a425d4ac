use super::colors::Rgb;

/// A single terminal cell: one character and how to paint it. Inactive tuxels have never been
/// written to and are transparent when a draw buffer is painted onto the canvas.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Tuxel {
    active: bool,
    content: char,
    fgcolor: Option<Rgb>,
    bgcolor: Option<Rgb>,
    bold: bool,
}

impl Default for Tuxel {
    fn default() -> Self {
        Tuxel {
            active: false,
            content: ' ',
            fgcolor: None,
            bgcolor: None,
            bold: false,
        }
    }
}

impl Tuxel {
    pub(crate) fn set_content(&mut self, c: char) {
        self.active = true;
        self.content = c;
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn content(&self) -> char {
        self.content
    }

    pub(crate) fn set_fgcolor(&mut self, c: Rgb) {
        self.fgcolor = Some(c);
    }

    pub(crate) fn set_bgcolor(&mut self, c: Rgb) {
        self.bgcolor = Some(c);
    }

    pub(crate) fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub(crate) fn bold(&self) -> bool {
        self.bold
    }

    pub(crate) fn colors(&self) -> (Option<Rgb>, Option<Rgb>) {
        (self.fgcolor, self.bgcolor)
    }

    pub(crate) fn clear(&mut self) {
        *self = Tuxel::default();
    }
}

impl std::fmt::Display for Tuxel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content())
    }
}
