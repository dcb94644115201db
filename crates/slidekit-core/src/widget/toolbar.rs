//! Floating toolbars shown above the selected shape.

use crate::shapes::{Shape, ShapeKind};
use crate::slide::Slide;
use kurbo::{Point, Vec2};

/// Toolbar panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolbar {
    /// Generic controls: delete.
    Shape,
    /// Font family, size, bold, italic and fill.
    Text,
    /// Replace image.
    Image,
}

/// The toolbars a shape shows when selected, generic panel first.
pub fn toolbars_for(shape: &Shape) -> Vec<Toolbar> {
    let mut bars = vec![Toolbar::Shape];
    match shape.kind() {
        ShapeKind::Text => bars.push(Toolbar::Text),
        ShapeKind::Image => bars.push(Toolbar::Image),
        ShapeKind::Rect | ShapeKind::Circle | ShapeKind::Arrow => {}
    }
    bars
}

/// Where toolbars are placed: the shape's top-left, raised by `offset`.
pub fn toolbar_anchor(shape: &Shape, offset: f64) -> Point {
    shape.bounds().origin() - Vec2::new(0.0, offset)
}

/// Toolbars for the current selection with their anchor. Empty when
/// nothing (or a removed shape) is selected.
pub fn selection_toolbars(slide: &Slide) -> Vec<(Toolbar, Point)> {
    let Some(shape) = slide.selected_shape() else {
        return Vec::new();
    };
    let anchor = toolbar_anchor(shape, slide.config().toolbar_offset);
    toolbars_for(shape).into_iter().map(|bar| (bar, anchor)).collect()
}
