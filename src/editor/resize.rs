//! Grid resizing with cascade clearing and id remapping.
//!
//! Columns grow and shrink on the right. Rows grow and shrink at the top,
//! so resizing keeps the bottom edge of a structure in place.

use crate::core::error::Error;
use crate::core::types::{NodeId, Result};
use crate::grid::{check_dimensions, CellKind};

use super::Editor;

impl Editor {
    /// Resize the grid one row or column at a time.
    ///
    /// Occupied cells in removed rows/columns are cleared first. Object
    /// names survive through the id remap.
    pub fn resize(&mut self, new_width: usize, new_height: usize) -> Result<()> {
        check_dimensions(new_width, new_height)?;
        self.flush();

        let old_width = self.grid.width();
        if new_width < old_width {
            for _ in new_width..old_width {
                self.remove_column(new_width)?;
            }
        } else {
            for col in old_width..new_width {
                self.insert_column(col)?;
            }
        }

        let old_height = self.grid.height();
        if new_height < old_height {
            for _ in new_height..old_height {
                self.remove_row(0)?;
            }
        } else {
            for _ in old_height..new_height {
                self.insert_row(0)?;
            }
        }

        self.recompute_objects();
        self.hovered_object = None;
        self.selected_object = None;

        log::info!(
            "resized grid {}x{} -> {}x{}",
            old_width,
            old_height,
            self.grid.width(),
            self.grid.height()
        );
        Ok(())
    }

    /// Insert a blank column before `col`.
    pub fn insert_column(&mut self, col: usize) -> Result<()> {
        self.grid.insert_blank_column(col)?;
        self.update_indices();
        Ok(())
    }

    /// Clear and remove column `col`.
    pub fn remove_column(&mut self, col: usize) -> Result<()> {
        let width = self.grid.width();
        if col >= width {
            return Err(Error::OutOfBounds { axis: "column", index: col, len: width });
        }
        if width == 1 {
            return Err(Error::InvalidDimensions { width: 0, height: self.grid.height() });
        }
        self.clear_cells(self.grid.column_ids(col))?;
        self.grid.drop_column(col)?;
        self.update_indices();
        Ok(())
    }

    /// Insert a blank row before `row`.
    pub fn insert_row(&mut self, row: usize) -> Result<()> {
        self.grid.insert_blank_row(row)?;
        self.update_indices();
        Ok(())
    }

    /// Clear and remove row `row`.
    pub fn remove_row(&mut self, row: usize) -> Result<()> {
        let height = self.grid.height();
        if row >= height {
            return Err(Error::OutOfBounds { axis: "row", index: row, len: height });
        }
        if height == 1 {
            return Err(Error::InvalidDimensions { width: self.grid.width(), height: 0 });
        }
        self.clear_cells(self.grid.row_ids(row))?;
        self.grid.drop_row(row)?;
        self.update_indices();
        Ok(())
    }

    /// Clear every occupied cell in `ids`, recomputing objects after each.
    fn clear_cells(&mut self, ids: Vec<NodeId>) -> Result<()> {
        for id in ids {
            if !self.grid.node_at(id)?.is_empty() {
                log::debug!("clearing cell {} ahead of removal", id);
                self.set_cell(id, CellKind::Empty)?;
                self.recompute_objects();
            }
        }
        Ok(())
    }

    /// Renumber the grid and carry object memberships through the map.
    fn update_indices(&mut self) {
        let old_to_new = self.grid.renumber();
        self.objects.remap(&old_to_new);
    }
}
