//! Tool presets: the shapes the toolbar's add buttons insert.

use crate::shapes::{Arrow, Circle, Image, ImageSource, Rectangle, ShapeData, Text};
use kurbo::Point;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEXT: &str = "Double-click to edit";

/// Available add tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Text,
    Image,
    Rect,
    Circle,
    Arrow,
}

impl ToolKind {
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Text,
            ToolKind::Image,
            ToolKind::Rect,
            ToolKind::Circle,
            ToolKind::Arrow,
        ]
    }

    /// Whether the tool needs an image source from a file picker first.
    pub fn needs_source(&self) -> bool {
        matches!(self, ToolKind::Image)
    }

    /// The shape this tool adds. Image tools need a source; see [`image_preset`].
    pub fn preset(&self) -> Option<ShapeData> {
        let data = match self {
            ToolKind::Text => Text::new(Point::new(100.0, 60.0), DEFAULT_TEXT, 24.0, "Inter", "#000").into(),
            ToolKind::Rect => Rectangle::new(Point::new(120.0, 120.0), 160.0, 90.0, "#4f46e5").into(),
            ToolKind::Circle => Circle::new(Point::new(260.0, 260.0), 60.0, "#10b981").into(),
            ToolKind::Arrow => Arrow::new(Point::ZERO, vec![320.0, 320.0, 480.0, 370.0], "#f59e0b", 4.0).into(),
            ToolKind::Image => return None,
        };
        Some(data)
    }
}

/// The image the add-image button inserts once a file was picked.
/// A cancelled picker (`None`) adds nothing.
pub fn image_preset(src: Option<ImageSource>) -> Option<ShapeData> {
    src.map(|src| Image::new(Point::new(60.0, 60.0), src, 220.0, 180.0).into())
}
