//! Circle shape.

use super::{CssColor, ShapeTrait, is_zero};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A filled circle. `(x, y)` is the centre, not a corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
    pub radius: f64,
    pub fill: CssColor,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64, fill: impl Into<CssColor>) -> Self {
        Self {
            x: center.x,
            y: center.y,
            rotation: 0.0,
            radius,
            fill: fill.into(),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }
}

impl ShapeTrait for Circle {
    fn position(&self) -> Point {
        self.center()
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn bounds(&self) -> Rect {
        let r = self.radius.abs();
        Rect::new(self.x - r, self.y - r, self.x + r, self.y + r)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.center().distance(point) <= self.radius.abs() + tolerance
    }
}
