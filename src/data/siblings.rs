use std::path::{Path, PathBuf};

use crate::config::NAVIGABLE_EXTENSIONS;
use crate::error::{Result, ViewerError};

use super::model::Direction;

// ---------------------------------------------------------------------------
// Sibling listing
// ---------------------------------------------------------------------------

/// Whether `path` carries one of the navigable image extensions.
/// The comparison ignores ASCII case.
pub fn is_navigable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            NAVIGABLE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Image files in `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| ViewerError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        if path.is_file() && is_navigable(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// The sibling of `current` in `direction`, wrapping at both ends.
///
/// Fails with [`ViewerError::NotFound`] when `current` is not part of its
/// directory's listing (including when the listing is empty).
pub fn neighbour(current: &Path, direction: Direction) -> Result<PathBuf> {
    let dir = current
        .parent()
        .ok_or_else(|| ViewerError::NotFound(current.to_path_buf()))?;
    let files = list_images(dir)?;

    let name = current.file_name();
    let index = files
        .iter()
        .position(|p| p.file_name() == name)
        .ok_or_else(|| ViewerError::NotFound(current.to_path_buf()))?;

    let target = direction.step(index, files.len());
    Ok(files[target].clone())
}
