//! Name reconciliation between connectivity passes.
//!
//! Components carry no identity of their own. After every pass each new
//! component inherits the name of a previous object it overlaps, or gets a
//! fresh `new_object_<n>` name.
//!
//! Merge policy: when a component overlaps several previous objects, the
//! owner of its lowest overlapping node id wins. Splits keep the name on
//! every piece, so duplicates can appear until the user renames one.

use std::collections::BTreeSet;

use crate::core::types::NodeId;

use super::object::{Object, ObjectSet};

/// Prefix of automatically minted object names.
pub const DEFAULT_NAME_PREFIX: &str = "new_object_";

/// Source of default object names. Threaded through [`reconcile`] rather
/// than kept as global state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameCounter(pub u64);

impl Default for NameCounter {
    fn default() -> Self {
        Self(1)
    }
}

impl NameCounter {
    /// Value the next minted name will carry.
    pub fn peek(self) -> u64 {
        self.0
    }

    /// Produce the next default name and advance.
    pub fn mint(&mut self) -> String {
        let name = format!("{}{}", DEFAULT_NAME_PREFIX, self.0);
        self.0 += 1;
        name
    }
}

/// Assign names to freshly computed components.
///
/// Returns the new object set (ids in component order) and the advanced
/// counter.
pub fn reconcile(
    previous: &ObjectSet,
    components: Vec<BTreeSet<NodeId>>,
    mut counter: NameCounter,
) -> (ObjectSet, NameCounter) {
    let mut objects = Vec::with_capacity(components.len());

    for nodes in components {
        let inherited = nodes
            .iter()
            .find_map(|&id| previous.object_for_node(id))
            .map(|obj| obj.name.clone());

        let name = match inherited {
            Some(name) => name,
            None => {
                let name = counter.mint();
                log::debug!("minted {} for {} cells", name, nodes.len());
                name
            }
        };
        objects.push(Object::new(name, nodes));
    }

    (ObjectSet::from_objects(objects), counter)
}

/// Raise `counter` past every `new_object_<n>` suffix in `names`.
pub fn load_counter_floor<'a>(
    names: impl IntoIterator<Item = &'a str>,
    counter: NameCounter,
) -> NameCounter {
    names
        .into_iter()
        .filter_map(|name| name.strip_prefix(DEFAULT_NAME_PREFIX)?.parse::<u64>().ok())
        .fold(counter, |acc, n| acc.max(NameCounter(n.saturating_add(1))))
}
