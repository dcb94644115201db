//! Widget state definitions.

use crate::commands;
use crate::shapes::{ShapeId, ShapeKind};
use crate::slide::Slide;

/// The UI state of a shape's widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Selected: transform handles and toolbars are shown.
    Selected,
    /// In editing mode (e.g., text editing).
    Editing(EditingKind),
}

impl WidgetState {
    /// Derive the state of `id` from the slide and the active editor.
    pub fn of(slide: &Slide, id: &ShapeId, editor: Option<&TextEditor>) -> Self {
        if editor.is_some_and(|e| e.target() == id) {
            WidgetState::Editing(EditingKind::Text)
        } else if slide.is_selected(id) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    /// Check if widget is selected (either just selected or editing).
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected | Self::Editing(_))
    }

    /// Check if widget is in editing mode.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

/// Kind of editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingKind {
    Text,
}

/// Inline text editing session opened by a double-click.
///
/// The buffer lives outside the store; nothing is written until [`commit`].
///
/// [`commit`]: TextEditor::commit
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditor {
    target: ShapeId,
    buffer: String,
}

impl TextEditor {
    /// Open an editor on a text shape. Other kinds can't be edited inline.
    pub fn open(slide: &Slide, id: &ShapeId) -> Option<Self> {
        let text = slide.get(id)?.data().as_text()?;
        Some(Self {
            target: id.clone(),
            buffer: text.text.clone(),
        })
    }

    pub fn target(&self) -> &ShapeId {
        &self.target
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Write the buffer back to the shape (on blur). Returns false if the
    /// shape disappeared while editing.
    pub fn commit(self, slide: &mut Slide) -> bool {
        commands::set_text(slide, &self.target, self.buffer)
    }

    /// Drop the session without touching the shape.
    pub fn cancel(self) {
        log::debug!("text edit on {} cancelled", self.target);
    }
}

impl EditingKind {
    pub fn for_kind(kind: ShapeKind) -> Option<Self> {
        match kind {
            ShapeKind::Text => Some(EditingKind::Text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Text};
    use kurbo::Point;

    #[test]
    fn test_state_follows_selection() {
        let mut slide = Slide::new();
        let id = slide.add(Rectangle::new(Point::ZERO, 10.0, 10.0, "#000"));
        assert_eq!(WidgetState::of(&slide, &id, None), WidgetState::Normal);

        slide.select(Some(id.clone()));
        let state = WidgetState::of(&slide, &id, None);
        assert!(state.is_selected());
        assert!(!state.is_editing());
    }

    #[test]
    fn test_text_editor_commit() {
        let mut slide = Slide::new();
        let id = slide.add(Text::new(Point::ZERO, "Double-click to edit", 24.0, "Inter", "#000"));
        slide.select(Some(id.clone()));

        let mut editor = TextEditor::open(&slide, &id).unwrap();
        assert_eq!(editor.buffer(), "Double-click to edit");
        assert_eq!(
            WidgetState::of(&slide, &id, Some(&editor)),
            WidgetState::Editing(EditingKind::Text)
        );

        editor.set_buffer("Quarterly results");
        // Store untouched until commit.
        assert_eq!(slide.get(&id).unwrap().data().as_text().unwrap().text, "Double-click to edit");
        assert!(editor.commit(&mut slide));
        assert_eq!(slide.get(&id).unwrap().data().as_text().unwrap().text, "Quarterly results");
    }

    #[test]
    fn test_editor_only_opens_on_text() {
        let mut slide = Slide::new();
        let id = slide.add(Rectangle::new(Point::ZERO, 10.0, 10.0, "#000"));
        assert!(TextEditor::open(&slide, &id).is_none());
        assert_eq!(EditingKind::for_kind(ShapeKind::Rect), None);
        assert_eq!(EditingKind::for_kind(ShapeKind::Text), Some(EditingKind::Text));
    }

    #[test]
    fn test_commit_after_removal() {
        let mut slide = Slide::new();
        let id = slide.add(Text::new(Point::ZERO, "x", 24.0, "Inter", "#000"));
        let editor = TextEditor::open(&slide, &id).unwrap();
        slide.remove(&id);
        assert!(!editor.commit(&mut slide));
    }
}
