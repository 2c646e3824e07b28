//! Text box geometry
//!
//! The core never touches real fonts. It estimates text boxes from the
//! configured font size, which is enough for placement and offscreen tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// True if the horizontal band [y, y + height) overlaps this box vertically
    pub fn overlaps_band(&self, y: f32, height: f32) -> bool {
        y < self.bottom() && y + height > self.top()
    }
}

/// Estimated glyph metrics for the current font size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Average advance per character
    pub char_width: f32,
    /// Line spacing
    pub line_height: f32,
}

impl TextMetrics {
    pub fn for_font_size(font_size: u32) -> Self {
        let size = font_size.max(1) as f32;
        Self {
            char_width: size * 0.6,
            line_height: size * 1.2,
        }
    }

    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    /// Box for `text` with its top-left corner at `pos`
    pub fn text_box(&self, text: &str, pos: Vec2) -> Rect {
        Rect::new(pos, Vec2::new(self.text_width(text), self.line_height))
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::for_font_size(crate::consts::DEFAULT_FONT_SIZE)
    }
}
