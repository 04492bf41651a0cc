//! Object set with its node -> object reverse index.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::error::Error;
use crate::core::types::{NodeId, ObjectId, Result};

/// A named group of node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    pub name: String,
    pub nodes: BTreeSet<NodeId>,
}

impl Object {
    pub fn new(name: impl Into<String>, nodes: BTreeSet<NodeId>) -> Self {
        Self { name: name.into(), nodes }
    }
}

/// All objects of a model plus the derived reverse index.
///
/// The reverse index is rebuilt from the objects whenever membership
/// changes and is never edited on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectSet {
    objects: BTreeMap<ObjectId, Object>,
    node_to_object: HashMap<NodeId, ObjectId>,
}

impl ObjectSet {
    /// Build a set and its reverse index.
    pub fn new(objects: BTreeMap<ObjectId, Object>) -> Self {
        let mut set = Self { objects, node_to_object: HashMap::new() };
        set.rebuild_index();
        set
    }

    /// Assign ids `0..n` in iteration order.
    pub fn from_objects(objects: impl IntoIterator<Item = Object>) -> Self {
        Self::new(
            objects
                .into_iter()
                .enumerate()
                .map(|(i, obj)| (ObjectId(i as u32), obj))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> + '_ {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects.values().map(|o| o.name.as_str())
    }

    /// Owning object of a node, via the reverse index.
    pub fn object_of(&self, node: NodeId) -> Option<ObjectId> {
        self.node_to_object.get(&node).copied()
    }

    pub fn object_for_node(&self, node: NodeId) -> Option<&Object> {
        self.object_of(node).and_then(|id| self.objects.get(&id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.iter().find(|(_, o)| o.name == name).map(|(id, _)| id)
    }

    pub fn rename(&mut self, id: ObjectId, name: impl Into<String>) -> Result<()> {
        let object = self.objects.get_mut(&id).ok_or(Error::UnknownObject(id))?;
        object.name = name.into();
        Ok(())
    }

    /// Names that appear on more than one object, sorted.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for name in self.names() {
            *counts.entry(name).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, c)| *c > 1)
            .map(|(n, _)| n.to_string())
            .collect()
    }

    pub fn rebuild_index(&mut self) {
        self.node_to_object.clear();
        for (id, object) in &self.objects {
            for &node in &object.nodes {
                self.node_to_object.insert(node, *id);
            }
        }
    }

    /// Translate every member id through `old_to_new` and rebuild the index.
    pub fn remap(&mut self, old_to_new: &HashMap<NodeId, NodeId>) {
        for object in self.objects.values_mut() {
            let old = std::mem::take(&mut object.nodes);
            object.nodes = old
                .into_iter()
                .filter_map(|id| old_to_new.get(&id).copied())
                .collect();
        }
        self.rebuild_index();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(items: &[(&str, &[NodeId])]) -> ObjectSet {
        ObjectSet::from_objects(
            items
                .iter()
                .map(|(name, ids)| Object::new(*name, ids.iter().copied().collect())),
        )
    }

    #[test]
    fn test_reverse_index() {
        let set = set_of(&[("arm", &[1, 2]), ("leg", &[7])]);
        assert_eq!(set.object_of(1), Some(ObjectId(0)));
        assert_eq!(set.object_of(7), Some(ObjectId(1)));
        assert_eq!(set.object_of(3), None);
        assert_eq!(set.object_for_node(2).unwrap().name, "arm");
        assert_eq!(set.find_by_name("leg"), Some(ObjectId(1)));
    }

    #[test]
    fn test_rename_and_duplicates() {
        let mut set = set_of(&[("a", &[0]), ("b", &[1]), ("c", &[2])]);
        assert!(set.duplicate_names().is_empty());

        set.rename(ObjectId(2), "a").unwrap();
        assert_eq!(set.duplicate_names(), vec!["a".to_string()]);

        assert!(matches!(
            set.rename(ObjectId(9), "x"),
            Err(Error::UnknownObject(ObjectId(9)))
        ));
    }

    #[test]
    fn test_remap() {
        let mut set = set_of(&[("arm", &[0, 1])]);
        let map: HashMap<NodeId, NodeId> = [(0, 4), (1, 5)].into_iter().collect();
        set.remap(&map);
        assert_eq!(set.get(ObjectId(0)).unwrap().nodes, [4, 5].into_iter().collect());
        assert_eq!(set.object_of(4), Some(ObjectId(0)));
        assert_eq!(set.object_of(0), None);
    }
}
