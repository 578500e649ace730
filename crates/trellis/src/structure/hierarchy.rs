//! Containment tree of views.

use indexmap::IndexMap;
use log::trace;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use trellis_core::{hierarchy::HierarchyContext, identifier::Key};

use crate::error::HierarchyError;

/// The containment tree of a layout, with edges from parent to child.
///
/// Views must be registered parent-first, so the tree can never contain a
/// cycle. Every query that returns several keys returns them in declaration
/// order.
///
/// # Examples
///
/// ```
/// # use trellis::{identifier::Key, structure::Hierarchy};
/// let mut hierarchy = Hierarchy::new();
/// hierarchy.add_view(Key::new("screen"), None).unwrap();
/// hierarchy.add_view(Key::new("header"), Some(Key::new("screen"))).unwrap();
///
/// assert_eq!(hierarchy.parent_of(Key::new("header")), Some(Key::new("screen")));
/// assert_eq!(hierarchy.roots(), vec![Key::new("screen")]);
/// ```
#[derive(Debug, Default)]
pub struct Hierarchy {
    graph: DiGraph<Key, ()>,
    indices: IndexMap<Key, NodeIndex>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key`, optionally inside an already registered `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::DuplicateView`] if `key` is already known and
    /// [`HierarchyError::UnknownParent`] if `parent` is not.
    pub fn add_view(&mut self, key: Key, parent: Option<Key>) -> Result<(), HierarchyError> {
        if self.indices.contains_key(&key) {
            return Err(HierarchyError::DuplicateView(key));
        }

        let parent_index = parent
            .map(|parent| {
                self.indices
                    .get(&parent)
                    .copied()
                    .ok_or(HierarchyError::UnknownParent { key, parent })
            })
            .transpose()?;

        let index = self.graph.add_node(key);
        self.indices.insert(key, index);
        if let Some(parent_index) = parent_index {
            self.graph.add_edge(parent_index, index, ());
        }

        trace!(key:% = key, parent:? = parent; "View registered");
        Ok(())
    }

    pub fn contains(&self, key: Key) -> bool {
        self.indices.contains_key(&key)
    }

    /// Returns the container of `key`, or `None` for roots and unknown keys.
    pub fn parent_of(&self, key: Key) -> Option<Key> {
        let index = self.indices.get(&key)?;
        self.graph
            .neighbors_directed(*index, Direction::Incoming)
            .next()
            .map(|parent| self.graph[parent])
    }

    /// Returns the direct children of `key`.
    pub fn children(&self, key: Key) -> Vec<Key> {
        let Some(index) = self.indices.get(&key) else {
            return Vec::new();
        };
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(*index, Direction::Outgoing)
            .collect();
        children.sort_unstable();
        children.into_iter().map(|child| self.graph[child]).collect()
    }

    /// Returns every container of `key`, nearest first.
    pub fn ancestors(&self, key: Key) -> Vec<Key> {
        let mut ancestors = Vec::new();
        let mut current = self.parent_of(key);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent_of(parent);
        }
        ancestors
    }

    /// Returns the views that live directly on the canvas.
    pub fn roots(&self) -> Vec<Key> {
        self.keys()
            .filter(|key| self.parent_of(*key).is_none())
            .collect()
    }

    /// Returns every registered key in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.indices.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl HierarchyContext for Hierarchy {
    fn contains(&self, key: Key) -> bool {
        Hierarchy::contains(self, key)
    }

    fn parent_of(&self, key: Key) -> Option<Key> {
        Hierarchy::parent_of(self, key)
    }
}
