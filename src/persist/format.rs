//! On-disk schema and model conversion.
//!
//! Stored indices use a bottom-left origin: row `y` of the grid is written
//! as row `height - 1 - y`. Every index in the file, including neighbor
//! keys and values, goes through [`flip_index`].

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{NodeId, Result};
use crate::grid::{check_dimensions, pair_key, CellKind, Grid};
use crate::objects::{load_counter_floor, NameCounter, Object, ObjectSet};

use super::legacy;

/// Top-level structure file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureFile {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Objects keyed by name
    pub objects: BTreeMap<String, ObjectEntry>,
}

/// Per-object cell listing. `indices`, `types` and `neighbors` all have one
/// entry per member cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub indices: Vec<usize>,
    pub types: Vec<u8>,
    /// Flipped index -> flipped indices of linked cells. Absent in files
    /// written before links were explicit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbors: Option<BTreeMap<String, Vec<usize>>>,
}

/// Which link encoding a file uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatVariant {
    /// Links listed per cell
    Linked,
    /// No link lists; links inferred from spatial adjacency inside objects
    Spatial,
}

/// A fully rebuilt model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModel {
    pub grid: Grid,
    pub objects: ObjectSet,
    pub counter: NameCounter,
}

/// Mirror a row-major index vertically. The operation is its own inverse.
pub fn flip_index(index: usize, width: usize, height: usize) -> usize {
    let x = index % width;
    let y = index / width;
    (height - 1 - y) * width + x
}

impl StructureFile {
    /// Build the file representation of a model.
    pub fn encode(grid: &Grid, objects: &ObjectSet) -> Result<Self> {
        if let Some(name) = objects.duplicate_names().into_iter().next() {
            return Err(Error::DuplicateObjectName(name));
        }

        let (width, height) = (grid.width(), grid.height());
        let flip = |id: NodeId| flip_index(id, width, height);

        let mut entries = BTreeMap::new();
        for (_, object) in objects.iter() {
            let mut indices = Vec::with_capacity(object.nodes.len());
            let mut types = Vec::with_capacity(object.nodes.len());
            let mut neighbors = BTreeMap::new();
            for &id in &object.nodes {
                let node = grid.node_at(id)?;
                indices.push(flip(id));
                types.push(node.kind().code());
                neighbors.insert(
                    flip(id).to_string(),
                    node.neighbors().iter().map(|&n| flip(n)).collect(),
                );
            }
            entries.insert(
                object.name.clone(),
                ObjectEntry { indices, types, neighbors: Some(neighbors) },
            );
        }

        Ok(Self {
            grid_width: width,
            grid_height: height,
            objects: entries,
        })
    }

    /// Link encoding of this file. Mixing both encodings is an error.
    pub fn variant(&self) -> Result<FormatVariant> {
        let linked = self.objects.values().filter(|e| e.neighbors.is_some()).count();
        if linked == self.objects.len() {
            Ok(FormatVariant::Linked)
        } else if linked == 0 {
            Ok(FormatVariant::Spatial)
        } else {
            Err(Error::Format("objects mix linked and spatial encodings".into()))
        }
    }

    /// Rebuild a model. Either the whole file is valid or nothing is built.
    pub fn decode(&self) -> Result<LoadedModel> {
        let (width, height) = (self.grid_width, self.grid_height);
        check_dimensions(width, height)?;
        let variant = self.variant()?;

        let mut grid = Grid::new(width, height);
        let mut placed = HashSet::new();
        let mut objects = Vec::with_capacity(self.objects.len());

        for (name, entry) in &self.objects {
            let nodes = self.place_cells(&mut grid, &mut placed, name, entry)?;
            objects.push(Object::new(name.clone(), nodes));
        }

        match variant {
            FormatVariant::Linked => {
                for (name, entry) in &self.objects {
                    self.restore_links(&mut grid, name, entry)?;
                }
            }
            FormatVariant::Spatial => {
                log::info!("structure file has no link lists, inferring links from adjacency");
                for object in &objects {
                    legacy::infer_links(&mut grid, &object.nodes)?;
                }
            }
        }

        let objects = ObjectSet::from_objects(objects);
        let counter = load_counter_floor(objects.names(), NameCounter::default());
        Ok(LoadedModel { grid, objects, counter })
    }

    fn check_index(&self, name: &str, index: usize) -> Result<NodeId> {
        let (width, height) = (self.grid_width, self.grid_height);
        if index >= width * height {
            return Err(Error::Format(format!(
                "object {}: index {} outside {}x{} grid",
                name, index, width, height
            )));
        }
        Ok(flip_index(index, width, height))
    }

    fn place_cells(
        &self,
        grid: &mut Grid,
        placed: &mut HashSet<NodeId>,
        name: &str,
        entry: &ObjectEntry,
    ) -> Result<BTreeSet<NodeId>> {
        let count = entry.indices.len();
        if count == 0 {
            return Err(Error::Format(format!("object {} has no cells", name)));
        }
        if entry.types.len() != count {
            return Err(Error::Format(format!(
                "object {}: {} indices but {} types",
                name,
                count,
                entry.types.len()
            )));
        }
        if let Some(neighbors) = &entry.neighbors {
            if neighbors.len() != count {
                return Err(Error::Format(format!(
                    "object {}: {} indices but {} neighbor lists",
                    name,
                    count,
                    neighbors.len()
                )));
            }
        }

        let mut nodes = BTreeSet::new();
        for (&index, &code) in entry.indices.iter().zip(&entry.types) {
            let id = self.check_index(name, index)?;
            let kind = CellKind::from_code(code)
                .ok_or_else(|| Error::Format(format!("object {}: unknown type {}", name, code)))?;
            if kind.is_empty() {
                return Err(Error::Format(format!("object {}: empty cell at index {}", name, index)));
            }
            if !placed.insert(id) {
                return Err(Error::Format(format!("index {} is listed more than once", index)));
            }
            grid.place_unlinked(id, kind)?;
            nodes.insert(id);
        }
        Ok(nodes)
    }

    fn restore_links(&self, grid: &mut Grid, name: &str, entry: &ObjectEntry) -> Result<()> {
        let Some(neighbors) = &entry.neighbors else {
            return Ok(());
        };

        let listed: HashSet<usize> = entry.indices.iter().copied().collect();
        let mut seen = HashSet::with_capacity(neighbors.len());
        for (key, others) in neighbors {
            let index: usize = key
                .parse()
                .map_err(|_| Error::Format(format!("object {}: bad neighbor key {:?}", name, key)))?;
            if !listed.contains(&index) {
                return Err(Error::Format(format!(
                    "object {}: neighbor key {} is not one of its cells",
                    name, index
                )));
            }
            if !seen.insert(index) {
                return Err(Error::Format(format!(
                    "object {}: neighbor list for {} given more than once",
                    name, index
                )));
            }
            let id = self.check_index(name, index)?;

            for &other in others {
                let other = self.check_index(name, other)?;
                grid.link(id, other).map_err(|e| match e {
                    Error::InvalidEdge { .. } => Error::Format(format!(
                        "object {}: link {} is not between orthogonal occupied cells",
                        name,
                        pair_key(id, other)
                    )),
                    e => e,
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ObjectId;
    use crate::grid::MAX_CELLS;
    use crate::objects::{compute_components, reconcile};

    fn entry(indices: &[usize], types: &[u8], neighbors: &[(usize, &[usize])]) -> ObjectEntry {
        ObjectEntry {
            indices: indices.to_vec(),
            types: types.to_vec(),
            neighbors: Some(
                neighbors
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_vec()))
                    .collect(),
            ),
        }
    }

    fn file(width: usize, height: usize, objects: Vec<(&str, ObjectEntry)>) -> StructureFile {
        StructureFile {
            grid_width: width,
            grid_height: height,
            objects: objects.into_iter().map(|(n, e)| (n.to_string(), e)).collect(),
        }
    }

    #[test]
    fn test_flip_index() {
        // 3 wide, 2 tall: top row 0..3 is stored as the bottom row 3..6
        assert_eq!(flip_index(0, 3, 2), 3);
        assert_eq!(flip_index(5, 3, 2), 2);
        for i in 0..12 {
            assert_eq!(flip_index(flip_index(i, 4, 3), 4, 3), i);
        }
    }

    #[test]
    fn test_encode_uses_flipped_indices() {
        let mut grid = Grid::new(2, 2);
        grid.set_cell(0, CellKind::Rigid).unwrap();
        grid.set_cell(1, CellKind::Soft).unwrap();
        let (objects, _) = reconcile(&ObjectSet::default(), compute_components(&grid), NameCounter::default());

        let file = StructureFile::encode(&grid, &objects).unwrap();
        let entry = &file.objects["new_object_1"];
        assert_eq!(entry.indices, vec![2, 3]);
        assert_eq!(entry.types, vec![1, 2]);
        let neighbors = entry.neighbors.as_ref().unwrap();
        assert_eq!(neighbors["2"], vec![3]);
        assert_eq!(neighbors["3"], vec![2]);
    }

    #[test]
    fn test_encode_json_shape() {
        let mut grid = Grid::new(1, 1);
        grid.set_cell(0, CellKind::Fixed).unwrap();
        let (objects, _) = reconcile(&ObjectSet::default(), compute_components(&grid), NameCounter::default());
        let file = StructureFile::encode(&grid, &objects).unwrap();

        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "grid_width": 1,
                "grid_height": 1,
                "objects": {
                    "new_object_1": { "indices": [0], "types": [5], "neighbors": { "0": [] } }
                }
            })
        );
    }

    #[test]
    fn test_decode_linked() {
        // 3x2 grid; stored indices 3,4 are the top row cells 0,1
        let f = file(3, 2, vec![("arm", entry(&[3, 4], &[1, 1], &[(3, &[4]), (4, &[3])]))]);
        let model = f.decode().unwrap();

        assert!(model.grid.is_linked(0, 1));
        assert_eq!(model.grid.node_at(0).unwrap().kind(), CellKind::Rigid);
        assert_eq!(model.objects.object_for_node(1).unwrap().name, "arm");
        assert_eq!(model.objects.object_of(3), None);
    }

    #[test]
    fn test_decode_counter_floor() {
        let f = file(
            3,
            1,
            vec![
                ("new_object_3", entry(&[0], &[1], &[(0, &[])])),
                ("new_object_7", entry(&[2], &[1], &[(2, &[])])),
            ],
        );
        let model = f.decode().unwrap();
        assert_eq!(model.counter, NameCounter(8));
    }

    #[test]
    fn test_decode_rejects_length_mismatch() {
        let f = file(3, 1, vec![("a", entry(&[0, 1], &[1], &[(0, &[]), (1, &[])]))]);
        assert!(matches!(f.decode(), Err(Error::Format(_))));

        let f = file(3, 1, vec![("a", entry(&[0, 1], &[1, 1], &[(0, &[])]))]);
        assert!(matches!(f.decode(), Err(Error::Format(_))));
    }

    #[test]
    fn test_decode_rejects_bad_cells() {
        // Out of range
        let f = file(2, 1, vec![("a", entry(&[2], &[1], &[(2, &[])]))]);
        assert!(f.decode().is_err());
        // Unknown type
        let f = file(2, 1, vec![("a", entry(&[0], &[9], &[(0, &[])]))]);
        assert!(f.decode().is_err());
        // Empty type
        let f = file(2, 1, vec![("a", entry(&[0], &[0], &[(0, &[])]))]);
        assert!(f.decode().is_err());
        // Listed twice across objects
        let f = file(
            2,
            1,
            vec![("a", entry(&[0], &[1], &[(0, &[])])), ("b", entry(&[0], &[1], &[(0, &[])]))],
        );
        assert!(f.decode().is_err());
        // No cells
        let f = file(2, 1, vec![("a", entry(&[], &[], &[]))]);
        assert!(f.decode().is_err());
        // Zero dimensions
        let f = file(0, 1, vec![]);
        assert!(matches!(f.decode(), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_decode_rejects_oversized_grid() {
        let f = file(usize::MAX, 2, vec![]);
        assert!(matches!(f.decode(), Err(Error::InvalidDimensions { .. })));

        let f = file(MAX_CELLS, 2, vec![("a", entry(&[0], &[1], &[(0, &[])]))]);
        assert!(matches!(f.decode(), Err(Error::InvalidDimensions { .. })));

        let json = format!(r#"{{ "grid_width": {}, "grid_height": 2, "objects": {{}} }}"#, usize::MAX);
        let f: StructureFile = serde_json::from_str(&json).unwrap();
        assert!(f.decode().is_err());
    }

    #[test]
    fn test_decode_rejects_repeated_neighbor_key() {
        // "0" and "00" name the same cell, leaving cell 1 without a list
        let mut cells = entry(&[0, 1], &[1, 1], &[(0, &[])]);
        let neighbors = cells.neighbors.as_mut().unwrap();
        neighbors.insert("00".to_string(), vec![]);
        assert_eq!(neighbors.len(), 2);

        let f = file(2, 1, vec![("a", cells)]);
        assert!(matches!(f.decode(), Err(Error::Format(_))));
    }

    #[test]
    fn test_decode_rejects_bad_links() {
        // Diagonal link in a 2x2 grid
        let f = file(2, 2, vec![("a", entry(&[0, 3], &[1, 1], &[(0, &[3]), (3, &[0])]))]);
        assert!(f.decode().is_err());
        // Link to an empty cell
        let f = file(2, 1, vec![("a", entry(&[0], &[1], &[(0, &[1])]))]);
        assert!(f.decode().is_err());
        // Neighbor key not among the object's cells
        let f = file(3, 1, vec![("a", entry(&[0], &[1], &[(2, &[])]))]);
        assert!(f.decode().is_err());
    }

    #[test]
    fn test_decode_links_across_objects() {
        let f = file(
            2,
            1,
            vec![("a", entry(&[0], &[1], &[(0, &[1])])), ("b", entry(&[1], &[2], &[(1, &[0])]))],
        );
        let model = f.decode().unwrap();
        assert!(model.grid.is_linked(0, 1));
        assert_eq!(model.objects.len(), 2);
        assert_eq!(model.objects.object_of(1), Some(ObjectId(1)));
    }

    #[test]
    fn test_variant_detection() {
        let linked = file(2, 1, vec![("a", entry(&[0], &[1], &[(0, &[])]))]);
        assert_eq!(linked.variant().unwrap(), FormatVariant::Linked);

        let mut spatial = linked.clone();
        spatial.objects.get_mut("a").unwrap().neighbors = None;
        assert_eq!(spatial.variant().unwrap(), FormatVariant::Spatial);

        let mut mixed = linked.clone();
        let mut bare = entry(&[1], &[1], &[]);
        bare.neighbors = None;
        mixed.objects.insert("b".into(), bare);
        assert!(mixed.variant().is_err());
    }
}
