//! The layout pass: turns a checked [`Script`] into final frames.
//!
//! The pass registers every view in a [`Hierarchy`], gives each one a
//! [`LayoutNode`], orders the view axes so that every axis is visited after
//! the axes it reads, and then replays each axis's assignments in script
//! order. Every assignment is a one-shot copy through the node accessors.
//!
//! Frames live in their parent's coordinate space. When an edge or center is
//! copied onto another edge or center across spaces, the value is translated
//! through the lowest common container before being written. Reads into or
//! out of a dimension are lengths and are never translated.

use std::{collections::HashMap, rc::Rc};

use indexmap::IndexMap;
use log::{debug, info, trace};

use trellis_core::{
    attribute::{Attribute, Axis},
    geometry::{Bounds, Frame, Point},
    hierarchy::HierarchyContext,
    identifier::Key,
    node::LayoutNode,
    value::ScaledValue,
};
use trellis_parser::{Assignment, Expr, Property, Script};

use crate::{
    config::LayoutConfig,
    error::{HierarchyError, TrellisError},
    structure::{DependencyGraph, Hierarchy, Slot},
};

/// A prepared layout pass over one script.
#[derive(Debug)]
pub struct LayoutPass<'a> {
    script: &'a Script,
    hierarchy: Rc<Hierarchy>,
    nodes: IndexMap<Key, LayoutNode>,
    order: Vec<Slot>,
}

impl<'a> LayoutPass<'a> {
    /// Builds the hierarchy, the nodes and the resolution order for `script`.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Hierarchy`] for structural problems, including
    /// circular reads, and [`TrellisError::Config`] when strict validation
    /// rejects a multiplier.
    pub fn new(script: &'a Script, config: &LayoutConfig) -> Result<Self, TrellisError> {
        let mut hierarchy = Hierarchy::new();
        for view in script.views() {
            hierarchy.add_view(view.key(), view.parent())?;
        }
        let hierarchy = Rc::new(hierarchy);
        let context: Rc<dyn HierarchyContext> = hierarchy.clone();

        let mut nodes = IndexMap::with_capacity(script.views().len());
        for view in script.views() {
            let multiplier = view.multiplier().unwrap_or(config.multiplier());
            if config.strict() && !(multiplier.is_finite() && multiplier > 0.0) {
                return Err(TrellisError::Config(format!(
                    "view `{}` has invalid multiplier {multiplier}",
                    view.key()
                )));
            }
            let node = LayoutNode::new(Rc::clone(&context), view.key(), multiplier, view.frame());
            nodes.insert(view.key(), node);
        }

        let mut dependencies = DependencyGraph::new(&hierarchy);
        for assignment in script.assignments() {
            for (reader, source) in reads(&hierarchy, assignment) {
                dependencies.add_read(reader, source)?;
            }
        }
        let order = dependencies.resolution_order()?;

        debug!(views = nodes.len(); "Layout pass prepared");
        Ok(Self {
            script,
            hierarchy,
            nodes,
            order,
        })
    }

    /// Applies every assignment and returns the final frames.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Layout`] if an assignment pairs a scalar
    /// attribute with a size value or the other way round.
    pub fn run(mut self) -> Result<LayoutResult, TrellisError> {
        info!(views = self.nodes.len(); "Running layout pass");

        let script = self.script;
        let mut by_slot: HashMap<Slot, Vec<&Assignment>> = HashMap::new();
        for assignment in script.assignments() {
            for axis in assignment.attribute().axes() {
                by_slot
                    .entry(Slot::new(assignment.target(), *axis))
                    .or_default()
                    .push(assignment);
            }
        }

        let order = std::mem::take(&mut self.order);
        for slot in &order {
            let Some(assignments) = by_slot.get(slot) else {
                continue;
            };
            for assignment in assignments {
                self.apply(assignment, slot.axis)?;
            }
        }

        info!("Layout pass finished");
        Ok(LayoutResult {
            hierarchy: self.hierarchy,
            nodes: self.nodes,
        })
    }

    /// Applies the part of `assignment` that writes along `axis`.
    fn apply(&mut self, assignment: &Assignment, axis: Axis) -> Result<(), TrellisError> {
        let target = assignment.target();
        trace!(
            target:% = target,
            property:% = assignment.attribute(),
            axis:? = axis;
            "Applying assignment"
        );

        match (assignment.attribute(), *assignment.value()) {
            (Property::Scalar(attribute), Expr::Length(value)) => {
                self.node_mut(target)?.assign(attribute, value);
            }
            (
                Property::Scalar(attribute),
                Expr::Read {
                    source,
                    attribute: source_attribute,
                    offset,
                },
            ) => {
                let value = self.read(source, source_attribute, target, attribute)?;
                self.node_mut(target)?.set(attribute, value, offset);
            }
            (Property::Size, Expr::Size(size)) => {
                self.node_mut(target)?
                    .assign(Attribute::extent(axis), size.along(axis));
            }
            (Property::Size, Expr::ReadSize { source }) => {
                let extent = Attribute::extent(axis);
                let value = self.node(source)?.get(extent);
                self.node_mut(target)?.set(extent, value, ScaledValue::ZERO);
            }
            (property, value) => {
                return Err(TrellisError::Layout(format!(
                    "cannot assign {value:?} to `{target}.{property}`"
                )));
            }
        }
        Ok(())
    }

    /// Reads `attribute` of `source` for a write to `target_attribute` of
    /// `target`. Anchor-to-anchor copies come back in the coordinate space
    /// `target` lives in.
    fn read(
        &self,
        source: Key,
        attribute: Attribute,
        target: Key,
        target_attribute: Attribute,
    ) -> Result<f32, TrellisError> {
        let value = self.node(source)?.get(attribute);
        if !translates(attribute, target_attribute) {
            return Ok(value);
        }

        let axis = attribute.axis();
        let (source_side, target_side) = translation_path(&self.hierarchy, source, target);
        let mut translated = value;
        for key in source_side {
            translated += self.node(key)?.frame().origin().along(axis);
        }
        for key in target_side {
            translated -= self.node(key)?.frame().origin().along(axis);
        }
        Ok(translated)
    }

    fn node(&self, key: Key) -> Result<&LayoutNode, TrellisError> {
        self.nodes
            .get(&key)
            .ok_or(TrellisError::Hierarchy(HierarchyError::UnknownView(key)))
    }

    fn node_mut(&mut self, key: Key) -> Result<&mut LayoutNode, TrellisError> {
        self.nodes
            .get_mut(&key)
            .ok_or(TrellisError::Hierarchy(HierarchyError::UnknownView(key)))
    }
}

/// Only positions are tied to a coordinate space; a width stays a width.
fn translates(source: Attribute, target: Attribute) -> bool {
    !source.is_dimension() && !target.is_dimension()
}

/// Returns every `(reader, source)` slot pair `assignment` depends on,
/// including the containers whose origins a translated read goes through.
fn reads(hierarchy: &Hierarchy, assignment: &Assignment) -> Vec<(Slot, Slot)> {
    let target = assignment.target();
    match (assignment.attribute(), *assignment.value()) {
        (
            Property::Scalar(attribute),
            Expr::Read {
                source,
                attribute: source_attribute,
                ..
            },
        ) => {
            let reader = Slot::new(target, attribute.axis());
            let axis = source_attribute.axis();
            let mut reads = vec![(reader, Slot::new(source, axis))];
            if translates(source_attribute, attribute) {
                let (source_side, target_side) = translation_path(hierarchy, source, target);
                reads.extend(
                    source_side
                        .into_iter()
                        .chain(target_side)
                        .map(|container| (reader, Slot::new(container, axis))),
                );
            }
            reads
        }
        (Property::Size, Expr::ReadSize { source }) => Axis::ALL
            .into_iter()
            .map(|axis| (Slot::new(target, axis), Slot::new(source, axis)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Returns the containers whose origins separate the space `source` lives in
/// from the space `target` lives in: first the ones between the source and
/// the lowest common container, then the ones between the target and it.
fn translation_path(hierarchy: &Hierarchy, source: Key, target: Key) -> (Vec<Key>, Vec<Key>) {
    let mut source_side = hierarchy.ancestors(source);
    let mut target_side = hierarchy.ancestors(target);

    let common = source_side
        .iter()
        .copied()
        .find(|key| target_side.contains(key));
    if let Some(common) = common {
        source_side.truncate(source_side.iter().take_while(|key| **key != common).count());
        target_side.truncate(target_side.iter().take_while(|key| **key != common).count());
    }
    (source_side, target_side)
}

/// Final frames of a layout pass, in declaration order.
#[derive(Debug)]
pub struct LayoutResult {
    hierarchy: Rc<Hierarchy>,
    nodes: IndexMap<Key, LayoutNode>,
}

impl LayoutResult {
    /// Returns the frame of `key` in its parent's coordinate space.
    pub fn frame(&self, key: Key) -> Option<Frame> {
        self.nodes.get(&key).map(LayoutNode::frame)
    }

    /// Returns the frame of `key` in canvas coordinates.
    pub fn absolute_frame(&self, key: Key) -> Option<Frame> {
        let node = self.nodes.get(&key)?;
        let mut offset = Point::default();
        let mut current = node.hierarchy().parent_of(key);
        while let Some(parent) = current {
            let parent_node = self.nodes.get(&parent)?;
            offset = offset.add_point(parent_node.frame().origin());
            current = parent_node.hierarchy().parent_of(parent);
        }
        Some(node.frame().translate(offset))
    }

    /// Returns the union of every absolute frame, or empty bounds when there
    /// are no views.
    pub fn canvas_bounds(&self) -> Bounds {
        self.nodes
            .keys()
            .filter_map(|key| self.absolute_frame(*key))
            .map(Frame::to_bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Returns every node in declaration order.
    pub fn views(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.values()
    }

    pub fn node(&self, key: Key) -> Option<&LayoutNode> {
        self.nodes.get(&key)
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn run(source: &str) -> LayoutResult {
        let script = trellis_parser::parse(source).unwrap();
        LayoutPass::new(&script, &LayoutConfig::default())
            .unwrap()
            .run()
            .unwrap()
    }

    fn frame(result: &LayoutResult, name: &str) -> Frame {
        result.frame(Key::new(name)).unwrap()
    }

    #[test]
    fn test_literal_assignments() {
        let result = run(r#"
            view card frame(10, 10, 0, 0) scale 2;
            card.width = scalable(50);
            card.height = 30;
            card.right = 200;
        "#);

        assert_eq!(frame(&result, "card"), Frame::new(100.0, 10.0, 100.0, 30.0));
    }

    #[test]
    fn test_reader_runs_after_source_regardless_of_script_order() {
        let result = run(r#"
            view label;
            view anchor frame(0, 0, 80, 40);
            label.left = anchor.right + 8;
            anchor.left = 100;
        "#);

        assert_eq!(frame(&result, "label").x(), 188.0);
    }

    #[test]
    fn test_child_reading_parent_edge_gets_zero() {
        let result = run(r#"
            view screen frame(40, 60, 300, 500);
            view header in screen;
            header.left = screen.left;
            header.top = screen.top + 4;
            header.width = screen.width;
        "#);

        assert_eq!(frame(&result, "header"), Frame::new(0.0, 4.0, 300.0, 0.0));
        assert_eq!(
            result.absolute_frame(Key::new("header")),
            Some(Frame::new(40.0, 64.0, 300.0, 0.0))
        );
    }

    #[test]
    fn test_cousins_are_translated_through_common_container() {
        let result = run(r#"
            view screen;
            view left_column in screen frame(10, 0, 100, 400);
            view right_column in screen frame(200, 20, 100, 400);
            view badge in left_column frame(5, 30, 20, 20);
            view marker in right_column frame(0, 0, 10, 10);
            marker.top = badge.top;
            marker.left = badge.right;
        "#);

        // badge is at (15, 30) on screen; right_column's origin is (200, 20).
        let marker = frame(&result, "marker");
        assert_approx_eq!(f32, marker.y(), 10.0);
        assert_approx_eq!(f32, marker.x(), -165.0);

        let absolute = result.absolute_frame(Key::new("marker")).unwrap();
        assert_approx_eq!(f32, absolute.y(), 30.0);
        assert_approx_eq!(f32, absolute.x(), 35.0);
    }

    #[test]
    fn test_offsets_use_target_multiplier() {
        let result = run(r#"
            view a frame(0, 0, 10, 10) scale 3;
            view b scale 0.5;
            b.left = a.left + scalable(20);
            b.size = a.size;
        "#);

        let b = frame(&result, "b");
        assert_eq!(b.x(), 10.0);
        assert_eq!(b.width(), 10.0);
    }

    #[test]
    fn test_size_literal() {
        let result = run(r#"
            view a scale 2;
            a.size = (fixed(10), scalable(10));
        "#);

        assert_eq!(frame(&result, "a").size(), trellis_core::geometry::Size::new(10.0, 20.0));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let script = trellis_parser::parse(
            "view a; view b; a.left = b.right; b.left = a.right;",
        )
        .unwrap();

        let err = LayoutPass::new(&script, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TrellisError::Hierarchy(HierarchyError::Cycle { key }) if key == "a"
        ));
    }

    #[test]
    fn test_anchor_read_into_dimension_is_not_translated() {
        let result = run(r#"
            view p frame(100, 0, 0, 0);
            view c in p frame(10, 0, 30, 10);
            p.width = c.right;
            p.height = c.center_y + 5;
        "#);

        assert_eq!(frame(&result, "p"), Frame::new(100.0, 0.0, 40.0, 10.0));
    }

    #[test]
    fn test_dimension_read_into_anchor_is_not_translated() {
        let result = run(r#"
            view p frame(100, 50, 0, 0);
            view c in p frame(10, 0, 30, 10);
            view q frame(0, 0, 5, 5);
            q.left = c.width;
            q.top = c.height + 1;
        "#);

        assert_eq!(frame(&result, "q"), Frame::new(30.0, 11.0, 5.0, 5.0));
    }

    #[test]
    fn test_reads_on_different_axes_do_not_cycle() {
        let result = run(r#"
            view a frame(0, 0, 20, 20);
            view b frame(0, 0, 10, 10);
            a.left = b.left + 5;
            b.top = a.bottom;
            b.left = 40;
        "#);

        assert_eq!(frame(&result, "a").x(), 45.0);
        assert_eq!(frame(&result, "b"), Frame::new(40.0, 20.0, 10.0, 10.0));
    }

    #[test]
    fn test_size_read_orders_each_axis() {
        let result = run(r#"
            view a frame(0, 0, 1, 1);
            view b;
            b.size = a.size;
            a.width = 30;
            a.top = b.right;
            a.height = 12;
        "#);

        // b.x waits for a.x, a.y waits for b.x and b.y waits for a.y.
        assert_eq!(frame(&result, "b"), Frame::new(0.0, 0.0, 30.0, 12.0));
        assert_eq!(frame(&result, "a"), Frame::new(0.0, 30.0, 30.0, 12.0));
    }

    #[test]
    fn test_strict_rejects_bad_multiplier() {
        let script = trellis_parser::parse("view a scale 0;").unwrap();

        let err = LayoutPass::new(&script, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, TrellisError::Config(_)));

        let lenient = LayoutConfig::new(1.0, false);
        assert!(LayoutPass::new(&script, &lenient).is_ok());
    }

    #[test]
    fn test_canvas_bounds() {
        let result = run(r#"
            view a frame(10, 20, 30, 40);
            view b in a frame(50, 50, 10, 10);
        "#);

        let bounds = result.canvas_bounds();
        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 70.0);
        assert_eq!(bounds.max_y(), 80.0);

        let empty = run("");
        assert!(empty.is_empty());
        assert_eq!(empty.canvas_bounds(), Bounds::default());
    }

    #[test]
    fn test_translation_path() {
        let mut hierarchy = Hierarchy::new();
        hierarchy.add_view(Key::new("root"), None).unwrap();
        hierarchy.add_view(Key::new("p"), Some(Key::new("root"))).unwrap();
        hierarchy.add_view(Key::new("c"), Some(Key::new("p"))).unwrap();
        hierarchy.add_view(Key::new("q"), Some(Key::new("root"))).unwrap();
        hierarchy.add_view(Key::new("other"), None).unwrap();

        let (source_side, target_side) =
            translation_path(&hierarchy, Key::new("c"), Key::new("q"));
        assert_eq!(source_side, vec![Key::new("p")]);
        assert!(target_side.is_empty());

        let (source_side, target_side) =
            translation_path(&hierarchy, Key::new("other"), Key::new("c"));
        assert!(source_side.is_empty());
        assert_eq!(target_side, vec![Key::new("p"), Key::new("root")]);
    }
}
