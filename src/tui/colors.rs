use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use palette::{FromColor, Lch, Srgb};

use crate::engine::grid::Idx as BoardIdx;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert a color given in the perceptual Lch space.
    pub(crate) fn from_lch(lightness: f32, chroma: f32, hue: f32) -> Self {
        let rgb = Srgb::from_color(Lch::new(lightness, chroma, hue)).into_format::<u8>();
        Self::new(rgb.red, rgb.green, rgb.blue)
    }

    #[inline(always)]
    pub(crate) fn r(&self) -> u8 {
        self.r
    }

    #[inline(always)]
    pub(crate) fn g(&self) -> u8 {
        self.g
    }

    #[inline(always)]
    pub(crate) fn b(&self) -> u8 {
        self.b
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r(),
            g: f.g(),
            b: f.b(),
        }
    }
}

/// Built-in images the player can cycle through, with the hue each one is painted around.
pub(crate) const IMAGES: [(&str, f32); 4] = [
    ("sunset", 28.0),
    ("forest", 135.0),
    ("ocean", 230.0),
    ("orchid", 310.0),
];

/// The image after the given one in the built-in rotation. Unknown images restart the rotation.
pub(crate) fn next_image(current: &str) -> &'static str {
    let position = IMAGES.iter().position(|(name, _)| *name == current);
    match position {
        Some(i) => IMAGES[(i + 1) % IMAGES.len()].0,
        None => IMAGES[0].0,
    }
}

/// Theme paints the board as one picture: every tile is colored by its home position, so the
/// gradient only lines up again once the puzzle is solved.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Theme {
    base_hue: f32,
}

const HUE_SPREAD: f32 = 100.0;
const TOP_LIGHTNESS: f32 = 85.0;
const BOTTOM_LIGHTNESS: f32 = 45.0;

impl Theme {
    pub(crate) fn for_image(image: &str) -> Self {
        let base_hue = IMAGES
            .iter()
            .find(|(name, _)| *name == image)
            .map(|(_, hue)| *hue)
            .unwrap_or_else(|| {
                let mut hasher = DefaultHasher::new();
                image.hash(&mut hasher);
                (hasher.finish() % 360) as f32
            });
        Self { base_hue }
    }

    /// Background and foreground of the tile whose home cell is `home` on a board of `size`.
    pub(crate) fn tile_colors(&self, home: &BoardIdx, size: usize) -> (Rgb, Rgb) {
        let span = (size - 1).max(1) as f32;
        let across = home.col() as f32 / span;
        let down = home.row() as f32 / span;
        let hue = self.base_hue + HUE_SPREAD * across;
        let lightness = TOP_LIGHTNESS - (TOP_LIGHTNESS - BOTTOM_LIGHTNESS) * down;
        let background = Rgb::from_lch(lightness, 60.0, hue);
        let foreground = if lightness > 60.0 {
            Rgb::from_lch(15.0, 30.0, hue + 180.0)
        } else {
            Rgb::from_lch(95.0, 10.0, hue + 180.0)
        };
        (background, foreground)
    }

    pub(crate) fn board_colors(&self) -> (Rgb, Rgb) {
        (
            Rgb::from_lch(15.0, 20.0, self.base_hue),
            Rgb::from_lch(70.0, 40.0, self.base_hue + 180.0),
        )
    }

    pub(crate) fn highlight(&self) -> Rgb {
        Rgb::from_lch(97.0, 5.0, self.base_hue)
    }
}
