//! Editor model: grid, objects and the mutator/query surface used by the
//! front-end.
//!
//! Cell and edge edits only mark the model dirty. Object recomputation is
//! deferred to [`Editor::flush`], which runs at most once per update cycle
//! however many edits were made. Resizes recompute immediately.

pub mod config;
pub mod input;
pub mod resize;

use std::path::Path;

use crate::core::types::{NodeId, ObjectId, Result};
use crate::grid::{check_dimensions, CellKind, Grid, Node};
use crate::objects::{compute_components, reconcile, NameCounter, Object, ObjectSet};
use crate::persist;

pub use config::EditorConfig;
pub use input::{EditMode, FrameInput, Pick};

/// The editable structure model.
#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    objects: ObjectSet,
    counter: NameCounter,
    dirty: bool,
    mode: EditMode,
    selector: CellKind,
    hovered_object: Option<ObjectId>,
    selected_object: Option<ObjectId>,
    just_altered: Option<Pick>,
}

impl Editor {
    /// Create an editor with an empty grid sized by `config`.
    pub fn new(config: &EditorConfig) -> Result<Self> {
        let (width, height) = (config.grid_width, config.grid_height);
        check_dimensions(width, height)?;
        Ok(Self {
            grid: Grid::new(width, height),
            objects: ObjectSet::default(),
            counter: NameCounter::default(),
            dirty: false,
            mode: config.mode,
            selector: config.selector,
            hovered_object: None,
            selected_object: None,
            just_altered: None,
        })
    }

    /// Create an editor with an empty `width` x `height` grid.
    pub fn with_size(width: usize, height: usize) -> Result<Self> {
        Self::new(&EditorConfig {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Live object set. May be stale while [`Editor::is_dirty`] is true.
    pub fn objects(&self) -> &ObjectSet {
        &self.objects
    }

    /// Owned copy of the object set for readers that outlive the next edit.
    pub fn objects_snapshot(&self) -> ObjectSet {
        self.objects.clone()
    }

    pub fn counter(&self) -> NameCounter {
        self.counter
    }

    /// Whether edits are waiting for an object recomputation.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn selector(&self) -> CellKind {
        self.selector
    }

    pub fn hovered_object(&self) -> Option<ObjectId> {
        self.hovered_object
    }

    pub fn selected_object(&self) -> Option<ObjectId> {
        self.selected_object
    }

    /// Pick altered by the last update cycle, if any.
    pub fn just_altered(&self) -> Option<Pick> {
        self.just_altered
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.grid.node_at(id)
    }

    /// Object owning `node`, via the reverse index.
    pub fn object_at(&self, node: NodeId) -> Option<(ObjectId, &Object)> {
        let id = self.objects.object_of(node)?;
        self.objects.get(id).map(|obj| (id, obj))
    }

    /// Set the kind of a cell. See [`Grid::set_cell`] for linking rules.
    pub fn set_cell(&mut self, id: NodeId, kind: CellKind) -> Result<()> {
        if self.grid.set_cell(id, kind)? {
            log::debug!("cell {} set to {:?}", id, kind);
            self.dirty = true;
        }
        Ok(())
    }

    /// Flip the link between two orthogonal occupied cells. Returns whether
    /// they are linked afterwards.
    pub fn toggle_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        let linked = self.grid.toggle_edge(a, b)?;
        log::debug!("edge {} {}", crate::grid::pair_key(a, b), if linked { "linked" } else { "unlinked" });
        self.dirty = true;
        Ok(linked)
    }

    /// Rename an object. Names may collide until the next save.
    pub fn rename_object(&mut self, id: ObjectId, name: impl Into<String>) -> Result<()> {
        self.objects.rename(id, name)
    }

    /// Recompute components and reconcile names against the current set.
    pub fn recompute_objects(&mut self) {
        let components = compute_components(&self.grid);
        let (objects, counter) = reconcile(&self.objects, components, self.counter);
        self.objects = objects;
        self.counter = counter;
        self.dirty = false;
    }

    /// Run the deferred recomputation if any edit is pending.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.recompute_objects();
        true
    }

    /// Save the model. Pending edits are flushed first.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.flush();
        persist::save(path, &self.grid, &self.objects)
    }

    /// Replace the model with the contents of `path`.
    ///
    /// Returns `false` and leaves the model untouched when the file is
    /// missing or invalid. Invalid files are reported as a warning.
    pub fn load(&mut self, path: &Path) -> bool {
        match persist::load(path) {
            Ok(Some(model)) => {
                self.grid = model.grid;
                self.objects = model.objects;
                self.counter = model.counter;
                self.dirty = false;
                self.hovered_object = None;
                self.selected_object = None;
                self.just_altered = None;
                true
            }
            Ok(None) => {
                log::debug!("no structure file at {}", path.display());
                false
            }
            Err(e) => {
                log::warn!("failed to load {}: {}", path.display(), e);
                false
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            grid: Grid::new(config.grid_width, config.grid_height),
            objects: ObjectSet::default(),
            counter: NameCounter::default(),
            dirty: false,
            mode: config.mode,
            selector: config.selector,
            hovered_object: None,
            selected_object: None,
            just_altered: None,
        }
    }
}
