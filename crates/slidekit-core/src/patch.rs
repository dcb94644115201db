//! Partial shape updates.
//!
//! A patch names the variant it was written for; applying it to a shape of
//! another variant fails and leaves the shape untouched. [`PositionPatch`]
//! is the one variant-agnostic patch, used for drags and transform commits.

use crate::error::{SlideError, SlideResult};
use crate::shapes::{CssColor, FontStyle, ImageSource, ShapeData, ShapeKind};
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

/// Position and rotation fields shared by every shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl PositionPatch {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.rotation.is_none()
    }

    fn apply_fields(&self, x: &mut f64, y: &mut f64, rotation: &mut f64) {
        merge(x, &self.x);
        merge(y, &self.y);
        merge(rotation, &self.rotation);
    }

    fn apply_to(&self, data: &mut ShapeData) {
        match data {
            ShapeData::Text(s) => self.apply_fields(&mut s.x, &mut s.y, &mut s.rotation),
            ShapeData::Image(s) => self.apply_fields(&mut s.x, &mut s.y, &mut s.rotation),
            ShapeData::Rect(s) => self.apply_fields(&mut s.x, &mut s.y, &mut s.rotation),
            ShapeData::Circle(s) => self.apply_fields(&mut s.x, &mut s.y, &mut s.rotation),
            ShapeData::Arrow(s) => self.apply_fields(&mut s.x, &mut s.y, &mut s.rotation),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextPatch {
    #[serde(flatten)]
    pub position: PositionPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<CssColor>,
    /// `Some(None)` clears the explicit width.
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub width: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub height: Option<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagePatch {
    #[serde(flatten)]
    pub position: PositionPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<ImageSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RectPatch {
    #[serde(flatten)]
    pub position: PositionPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<CssColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CirclePatch {
    #[serde(flatten)]
    pub position: PositionPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<CssColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArrowPatch {
    #[serde(flatten)]
    pub position: PositionPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<CssColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// A shallow, variant-checked field merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapePatch {
    Position(PositionPatch),
    Text(TextPatch),
    Image(ImagePatch),
    Rect(RectPatch),
    Circle(CirclePatch),
    Arrow(ArrowPatch),
}

impl ShapePatch {
    /// Move a shape of any variant.
    pub fn position(x: f64, y: f64) -> Self {
        ShapePatch::Position(PositionPatch {
            x: Some(x),
            y: Some(y),
            rotation: None,
        })
    }

    /// The variant this patch targets; `None` for variant-agnostic patches.
    pub fn kind(&self) -> Option<ShapeKind> {
        match self {
            ShapePatch::Position(_) => None,
            ShapePatch::Text(_) => Some(ShapeKind::Text),
            ShapePatch::Image(_) => Some(ShapeKind::Image),
            ShapePatch::Rect(_) => Some(ShapeKind::Rect),
            ShapePatch::Circle(_) => Some(ShapeKind::Circle),
            ShapePatch::Arrow(_) => Some(ShapeKind::Arrow),
        }
    }

    /// Merge the present fields into `data`.
    pub fn apply(&self, data: &mut ShapeData) -> SlideResult<()> {
        match (self, data) {
            (ShapePatch::Position(p), data) => p.apply_to(data),
            (ShapePatch::Text(p), ShapeData::Text(t)) => {
                p.position.apply_fields(&mut t.x, &mut t.y, &mut t.rotation);
                merge(&mut t.text, &p.text);
                merge(&mut t.font_size, &p.font_size);
                merge(&mut t.font_family, &p.font_family);
                merge(&mut t.font_style, &p.font_style);
                merge(&mut t.fill, &p.fill);
                merge(&mut t.width, &p.width);
                merge(&mut t.height, &p.height);
            }
            (ShapePatch::Image(p), ShapeData::Image(i)) => {
                p.position.apply_fields(&mut i.x, &mut i.y, &mut i.rotation);
                merge(&mut i.src, &p.src);
                merge(&mut i.width, &p.width);
                merge(&mut i.height, &p.height);
            }
            (ShapePatch::Rect(p), ShapeData::Rect(r)) => {
                p.position.apply_fields(&mut r.x, &mut r.y, &mut r.rotation);
                merge(&mut r.width, &p.width);
                merge(&mut r.height, &p.height);
                merge(&mut r.fill, &p.fill);
            }
            (ShapePatch::Circle(p), ShapeData::Circle(c)) => {
                p.position.apply_fields(&mut c.x, &mut c.y, &mut c.rotation);
                merge(&mut c.radius, &p.radius);
                merge(&mut c.fill, &p.fill);
            }
            (ShapePatch::Arrow(p), ShapeData::Arrow(a)) => {
                p.position.apply_fields(&mut a.x, &mut a.y, &mut a.rotation);
                merge(&mut a.points, &p.points);
                merge(&mut a.stroke, &p.stroke);
                merge(&mut a.stroke_width, &p.stroke_width);
            }
            (patch, data) => {
                let shape = data.kind();
                return Err(SlideError::VariantMismatch {
                    // Position patches matched above, so every remaining patch has a kind.
                    patch: patch.kind().unwrap_or(shape),
                    shape,
                });
            }
        }
        Ok(())
    }
}

impl From<PositionPatch> for ShapePatch {
    fn from(value: PositionPatch) -> Self {
        ShapePatch::Position(value)
    }
}

impl From<TextPatch> for ShapePatch {
    fn from(value: TextPatch) -> Self {
        ShapePatch::Text(value)
    }
}

impl From<ImagePatch> for ShapePatch {
    fn from(value: ImagePatch) -> Self {
        ShapePatch::Image(value)
    }
}

impl From<RectPatch> for ShapePatch {
    fn from(value: RectPatch) -> Self {
        ShapePatch::Rect(value)
    }
}

impl From<CirclePatch> for ShapePatch {
    fn from(value: CirclePatch) -> Self {
        ShapePatch::Circle(value)
    }
}

impl From<ArrowPatch> for ShapePatch {
    fn from(value: ArrowPatch) -> Self {
        ShapePatch::Arrow(value)
    }
}
