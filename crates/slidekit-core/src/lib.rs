//! slidekit core library
//!
//! Platform-agnostic data structures and logic for the slidekit slide editor:
//! the shape store, partial updates, the transform commit and JSON export.

pub mod commands;
pub mod config;
pub mod error;
pub mod patch;
pub mod shapes;
pub mod slide;
pub mod storage;
pub mod tools;
pub mod transform;
pub mod widget;

pub use commands::{Key, handle_key};
pub use config::SlideConfig;
pub use error::{SlideError, SlideResult};
pub use patch::ShapePatch;
pub use shapes::{Shape, ShapeData, ShapeId, ShapeKind};
pub use slide::{Slide, SlideEvent, SubscriptionId};
pub use storage::{StorageError, StorageResult, export_data_url};
pub use tools::{ToolKind, image_preset};
pub use transform::{CommitOutcome, NodeState, TransformBox, TransformNode, bound_box, commit_transform};
pub use widget::{TextEditor, Toolbar, WidgetState, selection_toolbars};
