//! Resize/rotate gestures and committing them back into shape geometry.
//!
//! During a gesture the renderer only scales its live node. When the gesture
//! ends, [`commit_transform`] folds the accumulated scale into the selected
//! shape's own fields (width/height, radius or points) and resets the node
//! scale to 1 so the next gesture starts from the committed geometry.

use crate::error::SlideResult;
use crate::patch::{ArrowPatch, CirclePatch, ImagePatch, PositionPatch, RectPatch, ShapePatch, TextPatch};
use crate::shapes::{ShapeData, ShapeId, arrow_scale_points};
use crate::slide::Slide;
use kurbo::{Point, Rect, Size, Vec2};

/// The box a transformer proposes for each step of a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl TransformBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }
}

/// Minimum-size guard for interactive resizes.
///
/// A proposal that would shrink either side below `min_size` is refused by
/// returning the previous box unchanged.
pub fn bound_box(old: TransformBox, new: TransformBox, min_size: f64) -> TransformBox {
    if new.width < min_size || new.height < min_size {
        old
    } else {
        new
    }
}

/// A renderer's live node for the selected shape.
pub trait TransformNode {
    /// Final anchor position reported by the renderer.
    fn position(&self) -> Point;

    /// Scale accumulated over the gesture; `(1, 1)` when idle.
    fn scale(&self) -> Vec2;

    fn set_scale(&mut self, scale: Vec2);

    /// Rotation in degrees.
    fn rotation(&self) -> f64;

    /// Width and height before scaling.
    fn intrinsic_size(&self) -> Size;

    /// Pre-scale points for polyline nodes.
    fn points(&self) -> Option<&[f64]>;

    /// Re-read geometry after a commit. Renderers that rebuild their nodes
    /// from the store can leave this empty.
    fn sync(&mut self, _data: &ShapeData) {}
}

/// Result of [`commit_transform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(ShapeId),
    /// No selection, or the selection no longer resolves to a shape.
    Aborted,
}

/// Build the patch that writes a node's transform back into `data`.
///
/// Rect and image take `size * scale`. Circles keep their diameter on the
/// horizontal axis, so `sy` has no effect. Arrow points are scaled per axis.
/// Text gets an explicit box width, and a height only if it already had one;
/// its font size is left alone.
pub fn commit_patch(data: &ShapeData, node: &impl TransformNode) -> ShapePatch {
    let pos = node.position();
    let scale = node.scale();
    let size = node.intrinsic_size();
    let position = PositionPatch {
        x: Some(pos.x),
        y: Some(pos.y),
        rotation: Some(node.rotation()),
    };

    match data {
        ShapeData::Rect(_) => RectPatch {
            position,
            width: Some(size.width * scale.x),
            height: Some(size.height * scale.y),
            ..Default::default()
        }
        .into(),
        ShapeData::Image(_) => ImagePatch {
            position,
            width: Some(size.width * scale.x),
            height: Some(size.height * scale.y),
            ..Default::default()
        }
        .into(),
        ShapeData::Circle(_) => CirclePatch {
            position,
            radius: Some(size.width * scale.x / 2.0),
            ..Default::default()
        }
        .into(),
        ShapeData::Arrow(arrow) => {
            let raw = node.points().unwrap_or(arrow.points.as_slice());
            ArrowPatch {
                position,
                points: Some(arrow_scale_points(raw, scale.x, scale.y)),
                ..Default::default()
            }
            .into()
        }
        ShapeData::Text(text) => TextPatch {
            position,
            width: Some(Some(size.width * scale.x)),
            height: text.height.map(|_| Some(size.height * scale.y)),
            ..Default::default()
        }
        .into(),
    }
}

/// Commit the finished gesture on `node` into the selected shape.
///
/// Aborts without touching anything when the selection is empty or dangling.
/// On success the node scale is reset to `(1, 1)`.
pub fn commit_transform(slide: &mut Slide, node: &mut impl TransformNode) -> SlideResult<CommitOutcome> {
    let Some(shape) = slide.selected_shape() else {
        log::debug!("transform commit aborted: nothing selected");
        return Ok(CommitOutcome::Aborted);
    };
    let id = shape.id().clone();
    let patch = commit_patch(shape.data(), node);
    slide.patch(&id, patch)?;

    node.set_scale(Vec2::new(1.0, 1.0));
    if let Some(shape) = slide.get(&id) {
        node.sync(shape.data());
    }
    Ok(CommitOutcome::Committed(id))
}

/// A headless live node mirroring one shape.
///
/// Hosts without their own scene graph can drive gestures through this.
/// `position` is the shape's anchor (centre for circles, points origin for
/// arrows); `bounds_offset` is the unscaled vector from that anchor to the
/// top-left of the drawn bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    position: Point,
    scale: Vec2,
    rotation: f64,
    size: Size,
    bounds_offset: Vec2,
    points: Option<Vec<f64>>,
}

impl NodeState {
    pub fn from_shape(data: &ShapeData) -> Self {
        let mut node = Self {
            position: Point::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            size: Size::ZERO,
            bounds_offset: Vec2::ZERO,
            points: None,
        };
        node.sync(data);
        node
    }

    /// Accumulate a scale step multiplicatively.
    pub fn scale_by(&mut self, sx: f64, sy: f64) {
        self.scale = Vec2::new(self.scale.x * sx, self.scale.y * sy);
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    pub fn rotate_to(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    fn scaled_offset(&self) -> Vec2 {
        Vec2::new(self.bounds_offset.x * self.scale.x, self.bounds_offset.y * self.scale.y)
    }

    /// The on-screen box: top-left of the drawn bounds plus scaled size.
    pub fn current_box(&self) -> TransformBox {
        let corner = self.position + self.scaled_offset();
        TransformBox {
            x: corner.x,
            y: corner.y,
            width: self.size.width * self.scale.x,
            height: self.size.height * self.scale.y,
            rotation: self.rotation,
        }
    }

    /// Apply one resize step, refusing boxes smaller than `min_size`.
    /// Returns the box that was actually applied.
    pub fn resize_to(&mut self, proposal: TransformBox, min_size: f64) -> TransformBox {
        let applied = bound_box(self.current_box(), proposal, min_size);
        self.rotation = applied.rotation;
        if self.size.width != 0.0 {
            self.scale.x = applied.width / self.size.width;
        }
        if self.size.height != 0.0 {
            self.scale.y = applied.height / self.size.height;
        }
        // Anchor moves with the new scale so the box corner lands where asked.
        self.position = Point::new(applied.x, applied.y) - self.scaled_offset();
        applied
    }
}

impl TransformNode for NodeState {
    fn position(&self) -> Point {
        self.position
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn intrinsic_size(&self) -> Size {
        self.size
    }

    fn points(&self) -> Option<&[f64]> {
        self.points.as_deref()
    }

    fn sync(&mut self, data: &ShapeData) {
        self.position = data.position();
        self.rotation = data.rotation();
        self.bounds_offset = data.bounds().origin() - data.position();
        self.points = None;
        self.size = match data {
            ShapeData::Rect(r) => Size::new(r.width, r.height),
            ShapeData::Image(i) => Size::new(i.width, i.height),
            ShapeData::Circle(c) => Size::new(c.diameter(), c.diameter()),
            ShapeData::Text(t) => {
                let (w, h) = t.box_size();
                Size::new(w, h)
            }
            ShapeData::Arrow(a) => {
                self.points = Some(a.points.clone());
                a.pairs()
                    .map(|p| Rect::from_points(p, p))
                    .reduce(|acc, r| acc.union(r))
                    .map(|r| r.size())
                    .unwrap_or(Size::ZERO)
            }
        };
    }
}
