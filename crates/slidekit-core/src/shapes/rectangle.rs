//! Rectangle shape.

use super::{CssColor, ShapeTrait, is_zero};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A filled rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees around the top-left corner.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
    pub width: f64,
    pub height: f64,
    pub fill: CssColor,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, fill: impl Into<CssColor>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            rotation: 0.0,
            width,
            height,
            fill: fill.into(),
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl ShapeTrait for Rectangle {
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
        // Normalise in case a flip left a negative extent.
        self.as_rect().abs()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}
