//! Arrow shape.

use super::{CssColor, ShapeTrait, is_zero, point_to_polyline_dist};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A polyline with an arrowhead at its last point.
///
/// `points` is flat (`[x0, y0, x1, y1, ...]`) and relative to `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
    pub points: Vec<f64>,
    pub stroke: CssColor,
    pub stroke_width: f64,
}

impl Arrow {
    /// Create a new arrow.
    pub fn new(
        position: Point,
        points: Vec<f64>,
        stroke: impl Into<CssColor>,
        stroke_width: f64,
    ) -> Self {
        Self {
            x: position.x,
            y: position.y,
            rotation: 0.0,
            points,
            stroke: stroke.into(),
            stroke_width,
        }
    }

    /// Coordinate pairs relative to the arrow position.
    /// A trailing unpaired coordinate is ignored.
    pub fn pairs(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
    }

    /// Coordinate pairs in world space.
    pub fn world_points(&self) -> Vec<Point> {
        let origin = self.position().to_vec2();
        self.pairs().map(|p| p + origin).collect()
    }

}

/// Multiply even-indexed coordinates by `sx` and odd-indexed ones by `sy`.
pub(crate) fn scale_points(points: &[f64], sx: f64, sy: f64) -> Vec<f64> {
    points
        .iter()
        .enumerate()
        .map(|(idx, v)| if idx % 2 == 0 { v * sx } else { v * sy })
        .collect()
}

impl ShapeTrait for Arrow {
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
        let points = self.world_points();
        let Some(first) = points.first() else {
            return Rect::from_origin_size(self.position(), (0.0, 0.0));
        };
        points
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let points = self.world_points();
        match points.len() {
            0 => false,
            1 => points[0].distance(point) <= self.stroke_width / 2.0 + tolerance,
            _ => point_to_polyline_dist(point, &points) <= self.stroke_width / 2.0 + tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arrow {
        Arrow::new(Point::ZERO, vec![320.0, 320.0, 480.0, 370.0], "#f59e0b", 4.0)
    }

    #[test]
    fn test_pairs_ignore_trailing_coordinate() {
        let mut arrow = sample();
        arrow.points.push(999.0);
        let pairs: Vec<Point> = arrow.pairs().collect();
        assert_eq!(pairs, vec![Point::new(320.0, 320.0), Point::new(480.0, 370.0)]);
    }

    #[test]
    fn test_scaled_points() {
        let arrow = sample();
        assert_eq!(scale_points(&arrow.points, 2.0, 1.0), vec![640.0, 320.0, 960.0, 370.0]);
        assert_eq!(scale_points(&arrow.points, 1.0, 0.5), vec![320.0, 160.0, 480.0, 185.0]);
    }

    #[test]
    fn test_bounds_offset_by_position() {
        let mut arrow = sample();
        arrow.x = 10.0;
        arrow.y = -20.0;
        let bounds = arrow.bounds();
        assert!((bounds.x0 - 330.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 300.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 490.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 350.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_points_bounds() {
        let arrow = Arrow::new(Point::new(5.0, 5.0), Vec::new(), "#000", 1.0);
        assert_eq!(arrow.bounds().area(), 0.0);
        assert!(!arrow.hit_test(Point::new(5.0, 5.0), 10.0));
    }

    #[test]
    fn test_hit_test_along_shaft() {
        let arrow = sample();
        assert!(arrow.hit_test(Point::new(400.0, 345.0), 1.0));
        assert!(!arrow.hit_test(Point::new(400.0, 400.0), 1.0));
    }
}
