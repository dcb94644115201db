//! Interactive state around shapes: which toolbars float above the
//! selection and whether a text is being edited inline.
//!
//! Shapes remain pure data. Widgets derive their UI state from the slide.

mod state;
mod toolbar;

pub use state::{EditingKind, TextEditor, WidgetState};
pub use toolbar::{Toolbar, selection_toolbars, toolbar_anchor, toolbars_for};
