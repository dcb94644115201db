//! Error types for slide operations.

use crate::shapes::{ShapeId, ShapeKind};
use thiserror::Error;

/// Errors raised by the scene store and its patches.
#[derive(Debug, Error)]
pub enum SlideError {
    #[error("Cannot apply a {patch} patch to a {shape} shape")]
    VariantMismatch { patch: ShapeKind, shape: ShapeKind },
    #[error("Duplicate shape id: {0}")]
    DuplicateId(ShapeId),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for slide operations.
pub type SlideResult<T> = Result<T, SlideError>;
