//! Shape definitions for the slide.

mod arrow;
mod circle;
mod image;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub(crate) use arrow::scale_points as arrow_scale_points;
pub use circle::Circle;
pub use image::{Image, ImageFormat, ImageSource};
pub use rectangle::Rectangle;
pub use text::{FontStyle, StyleFlag, Text};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
///
/// Any string is accepted on import, so documents written by
/// other editors (nanoid, numeric ids, ...) load unchanged. Ids minted by
/// the store are uuid v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// A fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A CSS color string as the editor stores it (`#4f46e5`, `#000`, ...).
///
/// The raw string is kept verbatim so exports round-trip exactly; parse it
/// with [`CssColor::to_rgba`] when a renderer needs channel values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssColor(String);

impl CssColor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` into a peniko color.
    /// Named colors and functional notation return `None`.
    pub fn to_rgba(&self) -> Option<peniko::Color> {
        let hex = self.0.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let (r, g, b, a) = match hex.len() {
            3 => (nibble(0).ok()?, nibble(1).ok()?, nibble(2).ok()?, 255),
            4 => (nibble(0).ok()?, nibble(1).ok()?, nibble(2).ok()?, nibble(3).ok()?),
            6 => (byte(0).ok()?, byte(2).ok()?, byte(4).ok()?, 255),
            8 => (byte(0).ok()?, byte(2).ok()?, byte(4).ok()?, byte(6).ok()?),
            _ => return None,
        };
        Some(peniko::Color::from_rgba8(r, g, b, a))
    }
}

impl From<&str> for CssColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type tag of a shape. Fixed for the lifetime of the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Text,
    Image,
    Rect,
    Circle,
    Arrow,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Text => "text",
            ShapeKind::Image => "image",
            ShapeKind::Rect => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::Arrow => "arrow",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Common trait for all shape variants.
pub trait ShapeTrait {
    /// Anchor position (top-left for boxes, centre for circles).
    fn position(&self) -> Point;

    /// Move the anchor position.
    fn set_position(&mut self, position: Point);

    /// Rotation in degrees.
    fn rotation(&self) -> f64;

    /// Axis-aligned bounding box in world coordinates, rotation ignored.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;
}

/// A shape without its identifier: what callers hand to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeData {
    Text(Text),
    Image(Image),
    Rect(Rectangle),
    Circle(Circle),
    Arrow(Arrow),
}

impl ShapeData {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeData::Text(_) => ShapeKind::Text,
            ShapeData::Image(_) => ShapeKind::Image,
            ShapeData::Rect(_) => ShapeKind::Rect,
            ShapeData::Circle(_) => ShapeKind::Circle,
            ShapeData::Arrow(_) => ShapeKind::Arrow,
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            ShapeData::Text(s) => s,
            ShapeData::Image(s) => s,
            ShapeData::Rect(s) => s,
            ShapeData::Circle(s) => s,
            ShapeData::Arrow(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            ShapeData::Text(s) => s,
            ShapeData::Image(s) => s,
            ShapeData::Rect(s) => s,
            ShapeData::Circle(s) => s,
            ShapeData::Arrow(s) => s,
        }
    }

    pub fn position(&self) -> Point {
        self.as_trait().position()
    }

    pub fn set_position(&mut self, position: Point) {
        self.as_trait_mut().set_position(position);
    }

    pub fn rotation(&self) -> f64 {
        self.as_trait().rotation()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ShapeData::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            ShapeData::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_arrow(&self) -> Option<&Arrow> {
        match self {
            ShapeData::Arrow(a) => Some(a),
            _ => None,
        }
    }
}

impl From<Text> for ShapeData {
    fn from(value: Text) -> Self {
        ShapeData::Text(value)
    }
}

impl From<Image> for ShapeData {
    fn from(value: Image) -> Self {
        ShapeData::Image(value)
    }
}

impl From<Rectangle> for ShapeData {
    fn from(value: Rectangle) -> Self {
        ShapeData::Rect(value)
    }
}

impl From<Circle> for ShapeData {
    fn from(value: Circle) -> Self {
        ShapeData::Circle(value)
    }
}

impl From<Arrow> for ShapeData {
    fn from(value: Arrow) -> Self {
        ShapeData::Arrow(value)
    }
}

/// A placed shape: identifier plus variant data.
///
/// Serializes flat, e.g. `{"id": "...", "type": "rect", "x": 0, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    #[serde(flatten)]
    data: ShapeData,
}

impl Shape {
    /// Only the store mints identifiers.
    pub(crate) fn with_new_id(data: ShapeData) -> Self {
        Self {
            id: ShapeId::generate(),
            data,
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.data.kind()
    }

    pub fn data(&self) -> &ShapeData {
        &self.data
    }

    /// Variant-preserving mutable access; the tag cannot be swapped from outside.
    pub(crate) fn data_mut(&mut self) -> &mut ShapeData {
        &mut self.data
    }

    pub fn bounds(&self) -> Rect {
        self.data.bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.data.hit_test(point, tolerance)
    }
}
