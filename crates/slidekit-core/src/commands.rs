//! Editor commands issued by keyboard shortcuts and the floating toolbars.
//!
//! Commands aimed at a shape of the wrong type are ignored with a log line;
//! they never fail, matching the permissive store contract.

use crate::patch::{ImagePatch, ShapePatch, TextPatch};
use crate::shapes::{CssColor, ImageSource, ShapeId, ShapeKind, StyleFlag};
use crate::slide::Slide;
use serde::{Deserialize, Serialize};

/// Keys the editor binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Escape,
}

impl Key {
    /// Map a DOM-style key name (`"Delete"`, `"Escape"`) to a bound key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Delete" => Some(Key::Delete),
            "Escape" | "Esc" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Handle a key press. Returns true if the key did something.
///
/// Delete removes the selected shape; Escape clears the selection.
pub fn handle_key(slide: &mut Slide, key: Key) -> bool {
    match key {
        Key::Delete => {
            let Some(id) = slide.selected().cloned() else {
                return false;
            };
            slide.remove(&id).is_some()
        }
        Key::Escape => {
            slide.clear_selection();
            true
        }
    }
}

/// Look up a key by name and handle it; unbound keys are ignored.
pub fn handle_key_name(slide: &mut Slide, name: &str) -> bool {
    Key::from_name(name).is_some_and(|key| handle_key(slide, key))
}

fn kind_of(slide: &Slide, id: &ShapeId) -> Option<ShapeKind> {
    slide.get(id).map(|s| s.kind())
}

/// Apply a patch only if the shape exists and has the expected kind.
fn apply_if(slide: &mut Slide, id: &ShapeId, expected: ShapeKind, patch: ShapePatch) -> bool {
    match kind_of(slide, id) {
        Some(kind) if kind == expected => slide.patch(id, patch).is_ok(),
        Some(kind) => {
            log::debug!("{} command ignored for {} shape {}", expected, kind, id);
            false
        }
        None => false,
    }
}

fn toggle_flag(slide: &mut Slide, id: &ShapeId, flag: StyleFlag) -> bool {
    let Some(style) = slide
        .get(id)
        .and_then(|s| s.data().as_text())
        .map(|t| t.font_style)
    else {
        return false;
    };
    let patch = TextPatch {
        font_style: Some(style.toggle(flag)),
        ..Default::default()
    };
    apply_if(slide, id, ShapeKind::Text, patch.into())
}

pub fn toggle_bold(slide: &mut Slide, id: &ShapeId) -> bool {
    toggle_flag(slide, id, StyleFlag::Bold)
}

pub fn toggle_italic(slide: &mut Slide, id: &ShapeId) -> bool {
    toggle_flag(slide, id, StyleFlag::Italic)
}

/// Set the fill of a text, rectangle or circle.
pub fn set_fill(slide: &mut Slide, id: &ShapeId, fill: impl Into<CssColor>) -> bool {
    use crate::patch::{CirclePatch, RectPatch};

    let fill = Some(fill.into());
    let Some(kind) = kind_of(slide, id) else {
        return false;
    };
    let patch: ShapePatch = match kind {
        ShapeKind::Text => TextPatch { fill, ..Default::default() }.into(),
        ShapeKind::Rect => RectPatch { fill, ..Default::default() }.into(),
        ShapeKind::Circle => CirclePatch { fill, ..Default::default() }.into(),
        ShapeKind::Image | ShapeKind::Arrow => {
            log::debug!("fill ignored for {} shape {}", kind, id);
            return false;
        }
    };
    slide.patch(id, patch).is_ok()
}

/// Set a text's font size, clamped to the configured range.
pub fn set_font_size(slide: &mut Slide, id: &ShapeId, size: f64) -> bool {
    let size = slide.config().clamp_font_size(size);
    let patch = TextPatch {
        font_size: Some(size),
        ..Default::default()
    };
    apply_if(slide, id, ShapeKind::Text, patch.into())
}

/// Set a text's font family. Families outside the configured list are
/// accepted but logged, since imported slides may carry them.
pub fn set_font_family(slide: &mut Slide, id: &ShapeId, family: &str) -> bool {
    if !slide.config().is_known_font(family) {
        log::debug!("font family {:?} is not in the configured list", family);
    }
    let patch = TextPatch {
        font_family: Some(family.to_string()),
        ..Default::default()
    };
    apply_if(slide, id, ShapeKind::Text, patch.into())
}

/// Commit an inline text edit.
pub fn set_text(slide: &mut Slide, id: &ShapeId, text: impl Into<String>) -> bool {
    let patch = TextPatch {
        text: Some(text.into()),
        ..Default::default()
    };
    apply_if(slide, id, ShapeKind::Text, patch.into())
}

/// Swap an image's source. `None` (cancelled picker) does nothing.
pub fn replace_image(slide: &mut Slide, id: &ShapeId, src: Option<ImageSource>) -> bool {
    let Some(src) = src else {
        return false;
    };
    let patch = ImagePatch {
        src: Some(src),
        ..Default::default()
    };
    apply_if(slide, id, ShapeKind::Image, patch.into())
}

/// Commit a drag: write the final position of any shape.
pub fn move_to(slide: &mut Slide, id: &ShapeId, x: f64, y: f64) -> bool {
    if slide.get(id).is_none() {
        return false;
    }
    slide.patch(id, ShapePatch::position(x, y)).is_ok()
}

/// The toolbar trash button.
pub fn delete(slide: &mut Slide, id: &ShapeId) -> bool {
    slide.remove(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{FontStyle, Image, Rectangle, ShapeData, Text};
    use kurbo::Point;

    fn text_slide() -> (Slide, ShapeId) {
        let mut slide = Slide::new();
        let id = slide.add(Text::new(Point::new(100.0, 60.0), "Hello", 24.0, "Inter", "#000"));
        (slide, id)
    }

    fn text<'a>(slide: &'a Slide, id: &ShapeId) -> &'a Text {
        slide.get(id).unwrap().data().as_text().unwrap()
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Delete"), Some(Key::Delete));
        assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_name("Backspace"), None);
    }

    #[test]
    fn test_delete_key_removes_selected() {
        let (mut slide, id) = text_slide();
        assert!(!handle_key(&mut slide, Key::Delete));

        slide.select(Some(id.clone()));
        assert!(handle_key_name(&mut slide, "Delete"));
        assert!(slide.is_empty());
        assert_eq!(slide.selected(), None);
    }

    #[test]
    fn test_escape_clears_selection() {
        let (mut slide, id) = text_slide();
        slide.select(Some(id.clone()));
        assert!(handle_key(&mut slide, Key::Escape));
        assert_eq!(slide.selected(), None);
        assert_eq!(slide.len(), 1);
        assert!(!handle_key_name(&mut slide, "a"));
    }

    #[test]
    fn test_toggle_styles() {
        let (mut slide, id) = text_slide();
        assert!(toggle_bold(&mut slide, &id));
        assert_eq!(text(&slide, &id).font_style, FontStyle::Bold);
        assert!(toggle_italic(&mut slide, &id));
        assert_eq!(text(&slide, &id).font_style, FontStyle::BoldItalic);
        assert!(toggle_bold(&mut slide, &id));
        assert_eq!(text(&slide, &id).font_style, FontStyle::Italic);
    }

    #[test]
    fn test_font_size_is_clamped() {
        let (mut slide, id) = text_slide();
        assert!(set_font_size(&mut slide, &id, 1000.0));
        assert!((text(&slide, &id).font_size - 200.0).abs() < f64::EPSILON);
        assert!(set_font_size(&mut slide, &id, 3.0));
        assert!((text(&slide, &id).font_size - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_commands() {
        let (mut slide, id) = text_slide();
        assert!(set_text(&mut slide, &id, "Edited"));
        assert!(set_font_family(&mut slide, &id, "Roboto"));
        assert!(set_fill(&mut slide, &id, "#ff0000"));
        let t = text(&slide, &id);
        assert_eq!(t.text, "Edited");
        assert_eq!(t.font_family, "Roboto");
        assert_eq!(t.fill.as_str(), "#ff0000");
    }

    #[test]
    fn test_text_commands_ignore_other_kinds() {
        let mut slide = Slide::new();
        let id = slide.add(Rectangle::new(Point::ZERO, 10.0, 10.0, "#000"));
        let before = slide.get(&id).unwrap().clone();
        assert!(!toggle_bold(&mut slide, &id));
        assert!(!set_text(&mut slide, &id, "x"));
        assert!(!set_font_size(&mut slide, &id, 12.0));
        assert_eq!(slide.get(&id).unwrap(), &before);

        assert!(set_fill(&mut slide, &id, "#abcdef"));
        let ShapeData::Rect(r) = slide.get(&id).unwrap().data() else { panic!() };
        assert_eq!(r.fill.as_str(), "#abcdef");
    }

    #[test]
    fn test_replace_image() {
        let mut slide = Slide::new();
        let id = slide.add(Image::new(Point::new(60.0, 60.0), "blob:old", 220.0, 180.0));
        assert!(!replace_image(&mut slide, &id, None));
        assert!(replace_image(&mut slide, &id, Some(ImageSource::new("blob:new"))));
        let img = slide.get(&id).unwrap().data().as_image().unwrap();
        assert_eq!(img.src.as_str(), "blob:new");
        assert!(!set_fill(&mut slide, &id, "#000"));
    }

    #[test]
    fn test_move_and_delete() {
        let (mut slide, id) = text_slide();
        assert!(move_to(&mut slide, &id, 5.0, 6.0));
        assert_eq!(slide.get(&id).unwrap().data().position(), Point::new(5.0, 6.0));
        assert!(delete(&mut slide, &id));
        assert!(!delete(&mut slide, &id));
        assert!(!move_to(&mut slide, &id, 0.0, 0.0));
    }
}
