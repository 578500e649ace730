//! Read dependencies between views and the order they resolve in.
//!
//! Dependencies are tracked per [`Slot`], one axis of one view. Horizontal
//! and vertical attributes never write each other, so `a.left = b.left;
//! b.top = a.bottom;` resolves without a cycle.

use std::{cmp::Reverse, collections::BinaryHeap, fmt};

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    Direction,
    algo::tarjan_scc,
    graph::{DiGraph, NodeIndex},
};

use trellis_core::{attribute::Axis, identifier::Key};

use super::Hierarchy;
use crate::error::HierarchyError;

/// One axis of one view: the attributes written along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub key: Key,
    pub axis: Axis,
}

impl Slot {
    pub fn new(key: Key, axis: Axis) -> Self {
        Self { key, axis }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            Axis::Horizontal => write!(f, "{}.x", self.key),
            Axis::Vertical => write!(f, "{}.y", self.key),
        }
    }
}

/// Directed graph with an edge from every source slot to each slot that
/// reads it.
///
/// Slots are added view by view in declaration order, horizontal first, so
/// a node's index is also its declaration position;
/// [`DependencyGraph::resolution_order`] uses this to break ties.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<Slot, ()>,
    indices: IndexMap<Slot, NodeIndex>,
}

impl DependencyGraph {
    /// Creates a graph with two slots per view of `hierarchy` and no edges.
    pub fn new(hierarchy: &Hierarchy) -> Self {
        let mut graph = DiGraph::with_capacity(hierarchy.len() * Axis::ALL.len(), 0);
        let indices = hierarchy
            .keys()
            .flat_map(|key| Axis::ALL.map(|axis| Slot::new(key, axis)))
            .map(|slot| (slot, graph.add_node(slot)))
            .collect();
        Self { graph, indices }
    }

    /// Records that `reader` reads from `source`. A slot reading itself adds
    /// nothing, and repeated reads collapse into one edge.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::UnknownView`] if either key is not a view.
    pub fn add_read(&mut self, reader: Slot, source: Slot) -> Result<(), HierarchyError> {
        let reader_index = self.index(reader)?;
        let source_index = self.index(source)?;
        if reader_index == source_index {
            return Ok(());
        }

        self.graph.update_edge(source_index, reader_index, ());
        trace!(reader:% = reader, source:% = source; "Read dependency added");
        Ok(())
    }

    /// Returns every slot such that each source comes before all of its
    /// readers. Slots that are free to go in any order keep their
    /// declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::Cycle`] naming the earliest declared view of
    /// the first circular dependency found.
    pub fn resolution_order(&self) -> Result<Vec<Slot>, HierarchyError> {
        let mut pending: Vec<usize> = self
            .graph
            .node_indices()
            .map(|node| {
                self.graph
                    .neighbors_directed(node, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = self
            .graph
            .node_indices()
            .filter(|node| pending[node.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(Reverse(node)) = ready.pop() {
            order.push(self.graph[node]);
            for reader in self.graph.neighbors_directed(node, Direction::Outgoing) {
                pending[reader.index()] -= 1;
                if pending[reader.index()] == 0 {
                    ready.push(Reverse(reader));
                }
            }
        }

        if order.len() < self.graph.node_count() {
            return Err(self.cycle_error());
        }

        debug!(slots = order.len(); "Resolution order computed");
        Ok(order)
    }

    fn cycle_error(&self) -> HierarchyError {
        let first_in_cycle = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .filter_map(|component| component.into_iter().min())
            .min();

        match first_in_cycle {
            Some(node) => HierarchyError::Cycle {
                key: self.graph[node].key,
            },
            None => unreachable!("unresolved slots always contain a cycle"),
        }
    }

    fn index(&self, slot: Slot) -> Result<NodeIndex, HierarchyError> {
        self.indices
            .get(&slot)
            .copied()
            .ok_or(HierarchyError::UnknownView(slot.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(names: &[&str]) -> Hierarchy {
        let mut hierarchy = Hierarchy::new();
        for name in names {
            hierarchy.add_view(Key::new(name), None).unwrap();
        }
        hierarchy
    }

    fn x(name: &str) -> Slot {
        Slot::new(Key::new(name), Axis::Horizontal)
    }

    fn y(name: &str) -> Slot {
        Slot::new(Key::new(name), Axis::Vertical)
    }

    #[test]
    fn test_no_reads_keeps_declaration_order() {
        let graph = DependencyGraph::new(&flat(&["a", "b", "c"]));
        assert_eq!(
            graph.resolution_order().unwrap(),
            vec![x("a"), y("a"), x("b"), y("b"), x("c"), y("c")]
        );
    }

    #[test]
    fn test_sources_come_first() {
        let mut graph = DependencyGraph::new(&flat(&["a", "b", "c", "d"]));
        graph.add_read(x("a"), x("c")).unwrap();
        graph.add_read(x("b"), x("a")).unwrap();

        // Only the horizontal slots move; c.x is the only blocker.
        assert_eq!(
            graph.resolution_order().unwrap(),
            vec![y("a"), y("b"), x("c"), x("a"), x("b"), y("c"), x("d"), y("d")]
        );
    }

    #[test]
    fn test_self_and_repeated_reads() {
        let mut graph = DependencyGraph::new(&flat(&["a", "b"]));
        graph.add_read(x("a"), x("a")).unwrap();
        graph.add_read(y("a"), y("b")).unwrap();
        graph.add_read(y("a"), y("b")).unwrap();

        assert_eq!(
            graph.resolution_order().unwrap(),
            vec![x("a"), x("b"), y("b"), y("a")]
        );
    }

    #[test]
    fn test_cross_axis_reads_are_not_a_cycle() {
        let mut graph = DependencyGraph::new(&flat(&["a", "b"]));
        graph.add_read(x("a"), x("b")).unwrap();
        graph.add_read(y("b"), y("a")).unwrap();

        assert_eq!(
            graph.resolution_order().unwrap(),
            vec![y("a"), x("b"), x("a"), y("b")]
        );
    }

    #[test]
    fn test_cycle_names_earliest_view() {
        let mut graph = DependencyGraph::new(&flat(&["free", "a", "b", "c", "after"]));
        graph.add_read(y("b"), x("a")).unwrap();
        graph.add_read(x("c"), y("b")).unwrap();
        graph.add_read(x("a"), x("c")).unwrap();
        graph.add_read(x("after"), x("c")).unwrap();

        assert_eq!(
            graph.resolution_order(),
            Err(HierarchyError::Cycle { key: Key::new("a") })
        );
    }

    #[test]
    fn test_unknown_view() {
        let mut graph = DependencyGraph::new(&flat(&["a"]));
        assert_eq!(
            graph.add_read(x("a"), y("ghost")),
            Err(HierarchyError::UnknownView(Key::new("ghost")))
        );
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(x("card").to_string(), "card.x");
        assert_eq!(y("card").to_string(), "card.y");
    }
}
