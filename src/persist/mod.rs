//! Structure file persistence.
//!
//! Files are pretty-printed JSON (see [`format::StructureFile`]). Saving
//! goes through a temporary file that is renamed over the destination.

pub mod format;
pub mod legacy;

use std::io;
use std::path::{Path, PathBuf};

use crate::core::types::Result;
use crate::grid::Grid;
use crate::objects::ObjectSet;

pub use format::{flip_index, FormatVariant, LoadedModel, ObjectEntry, StructureFile};

/// Write `grid` and `objects` to `path`.
///
/// Fails with [`Error::DuplicateObjectName`](crate::core::Error::DuplicateObjectName)
/// if two objects share a name.
pub fn save(path: &Path, grid: &Grid, objects: &ObjectSet) -> Result<()> {
    let file = StructureFile::encode(grid, objects)?;
    let json = serde_json::to_string_pretty(&file)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path)?;
    if let Err(e) = std::fs::write(&temp_path, json).and_then(|_| std::fs::rename(&temp_path, path)) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    log::info!(
        "saved {}x{} grid with {} objects to {}",
        grid.width(),
        grid.height(),
        objects.len(),
        path.display()
    );
    Ok(())
}

/// Sibling of `path` with `.tmp` appended to the full file name, so
/// `robot.json` saves through `robot.json.tmp`.
fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "save path has no file name"))?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

/// Read a model from `path`.
///
/// A missing file is `Ok(None)`. Any other failure is an error and
/// nothing is partially built.
pub fn load(path: &Path) -> Result<Option<LoadedModel>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let file: StructureFile = serde_json::from_str(&json)?;
    let model = file.decode()?;

    log::info!(
        "loaded {}x{} grid with {} objects from {}",
        model.grid.width(),
        model.grid.height(),
        model.objects.len(),
        path.display()
    );
    Ok(Some(model))
}
