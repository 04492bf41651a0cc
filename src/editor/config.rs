//! Editor configuration

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::CellKind;

use super::input::EditMode;

/// Startup settings for an [`Editor`](super::Editor).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial grid width in cells
    pub grid_width: usize,
    /// Initial grid height in cells
    pub grid_height: usize,
    /// Initial edit mode
    pub mode: EditMode,
    /// Initial cell kind painted in voxel mode
    pub selector: CellKind,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            mode: EditMode::Voxels,
            selector: CellKind::Soft,
        }
    }
}

impl EditorConfig {
    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<(), io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self, io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
