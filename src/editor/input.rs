//! Per-cycle input from the front-end and hover/selection tracking.

use serde::{Deserialize, Serialize};

use crate::core::types::{NodeId, ObjectId, Result};
use crate::grid::{pair_key, parse_pair_key, CellKind};

use super::Editor;

/// What the pointer is over, as reported by the picking layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pick {
    Node(NodeId),
    /// Edge between two orthogonal cells, stored lower id first
    Edge(NodeId, NodeId),
}

impl Pick {
    pub fn edge(a: NodeId, b: NodeId) -> Self {
        Pick::Edge(a.min(b), a.max(b))
    }

    /// Parse an edge key of the form produced by [`pair_key`].
    pub fn from_edge_key(key: &str) -> Option<Self> {
        parse_pair_key(key).map(|(a, b)| Pick::Edge(a, b))
    }

    /// Stable key for hover/selection bookkeeping in the view.
    pub fn key(&self) -> String {
        match *self {
            Pick::Node(id) => id.to_string(),
            Pick::Edge(a, b) => pair_key(a, b),
        }
    }
}

/// Editing mode selected in the front-end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Paint cells with the selector kind
    #[default]
    Voxels,
    /// Toggle links between cells
    Edges,
    /// Inspect only
    Select,
}

/// Everything the front-end reports for one update cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub hovered: Option<Pick>,
    pub selected: Option<Pick>,
    /// Button went down this cycle
    pub mouse_pressed: bool,
    /// Button is down
    pub mouse_held: bool,
    pub mode: EditMode,
    pub selector: CellKind,
}

impl Editor {
    /// Run one update cycle: apply pointer edits, recompute objects at most
    /// once, then refresh hovered and selected objects.
    pub fn update(&mut self, input: &FrameInput) -> Result<()> {
        self.just_altered = None;
        self.mode = input.mode;
        self.selector = input.selector;

        if input.mouse_pressed {
            self.handle_press(input.hovered)?;
        }
        if input.mouse_held {
            self.handle_held(input.hovered)?;
        }

        self.flush();
        self.update_active_objects(input.hovered, input.selected)
    }

    fn handle_press(&mut self, hovered: Option<Pick>) -> Result<()> {
        if let (EditMode::Edges, Some(pick @ Pick::Edge(a, b))) = (self.mode, hovered) {
            self.toggle_edge(a, b)?;
            self.just_altered = Some(pick);
        }
        Ok(())
    }

    fn handle_held(&mut self, hovered: Option<Pick>) -> Result<()> {
        let (EditMode::Voxels, Some(pick @ Pick::Node(id))) = (self.mode, hovered) else {
            return Ok(());
        };

        let current = self.node(id)?.kind();
        if self.selector.is_empty() {
            if !current.is_empty() {
                self.set_cell(id, CellKind::Empty)?;
            }
        } else if current != self.selector {
            self.set_cell(id, self.selector)?;
            self.just_altered = Some(pick);
        }
        Ok(())
    }

    /// Refresh hovered/selected objects from the reverse index.
    pub fn update_active_objects(&mut self, hovered: Option<Pick>, selected: Option<Pick>) -> Result<()> {
        self.hovered_object = self.object_for_pick(hovered)?;
        self.selected_object = self.object_for_pick(selected)?;
        Ok(())
    }

    /// Object under a pick. Edges resolve through their lower end.
    pub fn object_for_pick(&self, pick: Option<Pick>) -> Result<Option<ObjectId>> {
        match pick {
            Some(Pick::Node(id)) => {
                if self.node(id)?.is_empty() {
                    return Ok(None);
                }
                Ok(self.objects.object_of(id))
            }
            Some(Pick::Edge(a, _)) => Ok(self.objects.object_of(a)),
            None => Ok(None),
        }
    }
}
