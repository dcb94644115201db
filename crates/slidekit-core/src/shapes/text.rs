//! Text shape.

use super::{CssColor, ShapeTrait, is_zero};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A single style flag that can be toggled on a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFlag {
    Bold,
    Italic,
}

/// Font style of a text shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "italic")]
    Italic,
    #[serde(rename = "bold italic")]
    BoldItalic,
}

impl FontStyle {
    fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontStyle::Normal,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (true, true) => FontStyle::BoldItalic,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    /// Flip one flag, keeping the other.
    pub fn toggle(self, flag: StyleFlag) -> Self {
        match flag {
            StyleFlag::Bold => Self::from_flags(!self.is_bold(), self.is_italic()),
            StyleFlag::Italic => Self::from_flags(self.is_bold(), !self.is_italic()),
        }
    }

    /// CSS-style name, as written to JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
            FontStyle::BoldItalic => "bold italic",
        }
    }
}

/// A text shape anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    #[serde(default)]
    pub font_style: FontStyle,
    pub fill: CssColor,
    /// Explicit box width. Without it the text is laid out unconstrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Text {
    /// Average glyph advance as a fraction of the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.6;

    /// Create a new text shape with the given content and font size.
    pub fn new(
        position: Point,
        text: impl Into<String>,
        font_size: f64,
        font_family: impl Into<String>,
        fill: impl Into<CssColor>,
    ) -> Self {
        Self {
            x: position.x,
            y: position.y,
            rotation: 0.0,
            text: text.into(),
            font_size,
            font_family: font_family.into(),
            font_style: FontStyle::Normal,
            fill: fill.into(),
            width: None,
            height: None,
        }
    }

    /// Rough width estimate from the longest line; not a text measurement.
    fn approximate_width(&self) -> f64 {
        let max_line_len = self
            .text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        max_line_len as f64 * self.font_size * Self::CHAR_WIDTH_FACTOR
    }

    fn approximate_height(&self) -> f64 {
        let mut line_count = self.text.lines().count().max(1);
        if self.text.ends_with('\n') {
            line_count += 1;
        }
        line_count as f64 * self.font_size
    }

    /// Layout box size: explicit dimensions win over the estimate.
    pub fn box_size(&self) -> (f64, f64) {
        (
            self.width.unwrap_or_else(|| self.approximate_width()),
            self.height.unwrap_or_else(|| self.approximate_height()),
        )
    }
}

impl ShapeTrait for Text {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn bounds(&self) -> Rect {
        let (width, height) = self.box_size();
        Rect::new(self.x, self.y, self.x + width, self.y + height).abs()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}
