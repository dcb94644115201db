//! File export for native platforms.

use super::{StorageError, StorageResult, warn_session_images};
use crate::config::SlideConfig;
use crate::slide::Slide;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the slide into `dir` under the configured export file name
/// (`slide.json` by default). Creates the directory if it doesn't exist.
pub fn export_to_dir(slide: &Slide, dir: impl AsRef<Path>) -> StorageResult<PathBuf> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            StorageError::Io(format!("Failed to create export directory: {}", e))
        })?;
    }
    let path = dir.join(&slide.config().export_file_name);
    export_to_path(slide, &path)?;
    Ok(path)
}

/// Write the slide to an explicit path, replacing any existing file.
pub fn export_to_path(slide: &Slide, path: impl AsRef<Path>) -> StorageResult<()> {
    let path = path.as_ref();
    let json = slide
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    fs::write(path, json).map_err(|e| {
        StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
    })?;
    warn_session_images(slide);
    log::info!("exported {} shapes to {}", slide.len(), path.display());
    Ok(())
}

/// Load a previously exported slide with the default configuration.
pub fn import_from_path(path: impl AsRef<Path>) -> StorageResult<Slide> {
    import_from_path_with_config(path, SlideConfig::default())
}

pub fn import_from_path_with_config(
    path: impl AsRef<Path>,
    config: SlideConfig,
) -> StorageResult<Slide> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }

    let json = fs::read_to_string(path).map_err(|e| {
        StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    Slide::from_json_with_config(&json, config).map_err(|e| {
        StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })
}
