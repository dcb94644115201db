//! Slide export and import.
//!
//! A slide is persisted as the pretty-printed JSON array of its shapes.
//! There is no schema version; whatever [`Slide::from_json`] accepts loads.

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::{export_to_dir, export_to_path, import_from_path, import_from_path_with_config};

use crate::config::SlideConfig;
use crate::slide::Slide;
use thiserror::Error;

/// Prefix of the download link the editor hands to the browser.
pub const DATA_URL_PREFIX: &str = "data:text/json;charset=utf-8,";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Slide not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Count images whose source is a session-local blob reference. Such
/// exports load, but those images will not resolve in a later session.
pub fn session_image_count(slide: &Slide) -> usize {
    slide
        .items()
        .iter()
        .filter_map(|s| s.data().as_image())
        .filter(|img| img.src.is_blob())
        .count()
}

pub(crate) fn warn_session_images(slide: &Slide) {
    let count = session_image_count(slide);
    if count > 0 {
        log::warn!("{} exported images reference blob: urls and won't survive a reload", count);
    }
}

/// Export the slide as a `data:` URL suitable for a download link.
pub fn export_data_url(slide: &Slide) -> StorageResult<String> {
    let json = slide
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    warn_session_images(slide);
    log::info!("exporting {} shapes as data url", slide.len());
    Ok(format!("{}{}", DATA_URL_PREFIX, urlencoding::encode(&json)))
}

/// Load a slide back from a URL produced by [`export_data_url`].
pub fn import_data_url(url: &str, config: SlideConfig) -> StorageResult<Slide> {
    let encoded = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| StorageError::Serialization("not a slide data url".to_string()))?;
    let json = urlencoding::decode(encoded).map_err(|e| StorageError::Serialization(e.to_string()))?;
    Slide::from_json_with_config(&json, config).map_err(|e| StorageError::Serialization(e.to_string()))
}
