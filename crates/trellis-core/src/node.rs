//! Layout nodes: a mutable frame plus the attribute accessors that drive it.
//!
//! A [`LayoutNode`] owns exactly one rectangle. Reading an attribute is a pure
//! projection of that rectangle; writing one mutates only the fields the
//! attribute needs (see [`crate::attribute`]). Assigning from another node is
//! a one-shot copy: read the source now, write the target now. Nodes never
//! keep references to each other.
//!
//! # Examples
//!
//! ```
//! # use trellis_core::{geometry::Frame, node::LayoutNode, value::ScaledValue};
//! let mut avatar = LayoutNode::detached("avatar", 0.5, Frame::ZERO);
//! let header = LayoutNode::detached("header", 0.5, Frame::new(20.0, 50.0, 400.0, 80.0));
//!
//! avatar.set_width(ScaledValue::scalable(80.0));
//! avatar.set_height(avatar.width());
//! avatar.set_center_y(header.center_y());
//! avatar.set_left_with_offset(header.left(), ScaledValue::scalable(32.0));
//!
//! assert_eq!(avatar.frame(), Frame::new(36.0, 70.0, 40.0, 40.0));
//! ```

use std::rc::Rc;

use log::trace;

use crate::{
    attribute::Attribute,
    geometry::{Frame, Size},
    hierarchy::{Detached, HierarchyContext},
    identifier::Key,
    value::{ScaledSize, ScaledValue},
};

/// A rectangle identified by a key and bound to a scale multiplier.
///
/// The multiplier resolves every [`ScaledValue`] written to this node,
/// including offsets added to values read from other nodes.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    key: Key,
    multiplier: f32,
    frame: Frame,
    hierarchy: Rc<dyn HierarchyContext>,
}

impl LayoutNode {
    /// Creates a node with its hierarchy context, key, multiplier and initial frame.
    ///
    /// The hierarchy is stored for the driver and never consulted by any
    /// attribute formula.
    pub fn new(
        hierarchy: Rc<dyn HierarchyContext>,
        key: impl Into<Key>,
        multiplier: f32,
        frame: Frame,
    ) -> Self {
        Self {
            key: key.into(),
            multiplier,
            frame,
            hierarchy,
        }
    }

    /// Creates a node outside of any hierarchy.
    pub fn detached(key: impl Into<Key>, multiplier: f32, frame: Frame) -> Self {
        Self::new(Rc::new(Detached), key, multiplier, frame)
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Returns the current frame.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Returns the hierarchy context this node was created with.
    pub fn hierarchy(&self) -> &dyn HierarchyContext {
        self.hierarchy.as_ref()
    }

    /// Reads a scalar attribute.
    pub fn get(&self, attribute: Attribute) -> f32 {
        attribute.read(&self.frame)
    }

    /// Writes `value + offset` to `attribute`.
    ///
    /// `value` is an absolute number, typically another node's attribute read
    /// just before the call. `offset` is resolved against *this* node's
    /// multiplier. Anchor attributes use this node's current size.
    pub fn set(&mut self, attribute: Attribute, value: f32, offset: ScaledValue) {
        let effective = value + offset.resolve(self.multiplier);
        attribute.write(&mut self.frame, effective);
        trace!(
            key:% = self.key,
            attribute:% = attribute,
            effective;
            "Attribute written"
        );
    }

    /// Writes a literal length to `attribute`, resolved against this node's multiplier.
    pub fn assign(&mut self, attribute: Attribute, value: impl Into<ScaledValue>) {
        self.set(attribute, 0.0, value.into());
    }

    pub fn top(&self) -> f32 {
        self.get(Attribute::Top)
    }

    pub fn set_top(&mut self, value: f32) {
        self.set(Attribute::Top, value, ScaledValue::ZERO);
    }

    pub fn set_top_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::Top, value, offset);
    }

    pub fn left(&self) -> f32 {
        self.get(Attribute::Left)
    }

    pub fn set_left(&mut self, value: f32) {
        self.set(Attribute::Left, value, ScaledValue::ZERO);
    }

    pub fn set_left_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::Left, value, offset);
    }

    /// Returns `y + height`.
    pub fn bottom(&self) -> f32 {
        self.get(Attribute::Bottom)
    }

    /// Moves the node so its bottom edge sits at `value`, keeping its height.
    pub fn set_bottom(&mut self, value: f32) {
        self.set(Attribute::Bottom, value, ScaledValue::ZERO);
    }

    pub fn set_bottom_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::Bottom, value, offset);
    }

    /// Returns `x + width`.
    pub fn right(&self) -> f32 {
        self.get(Attribute::Right)
    }

    /// Moves the node so its right edge sits at `value`, keeping its width.
    pub fn set_right(&mut self, value: f32) {
        self.set(Attribute::Right, value, ScaledValue::ZERO);
    }

    pub fn set_right_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::Right, value, offset);
    }

    /// Returns `x + width / 2`.
    pub fn center_x(&self) -> f32 {
        self.get(Attribute::CenterX)
    }

    pub fn set_center_x(&mut self, value: f32) {
        self.set(Attribute::CenterX, value, ScaledValue::ZERO);
    }

    pub fn set_center_x_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::CenterX, value, offset);
    }

    /// Returns `y + height / 2`.
    pub fn center_y(&self) -> f32 {
        self.get(Attribute::CenterY)
    }

    pub fn set_center_y(&mut self, value: f32) {
        self.set(Attribute::CenterY, value, ScaledValue::ZERO);
    }

    pub fn set_center_y_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::CenterY, value, offset);
    }

    pub fn width(&self) -> f32 {
        self.get(Attribute::Width)
    }

    /// Sets the width; plain numbers are treated as fixed lengths.
    pub fn set_width(&mut self, value: impl Into<ScaledValue>) {
        self.assign(Attribute::Width, value);
    }

    pub fn set_width_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::Width, value, offset);
    }

    pub fn height(&self) -> f32 {
        self.get(Attribute::Height)
    }

    /// Sets the height; plain numbers are treated as fixed lengths.
    pub fn set_height(&mut self, value: impl Into<ScaledValue>) {
        self.assign(Attribute::Height, value);
    }

    pub fn set_height_with_offset(&mut self, value: f32, offset: ScaledValue) {
        self.set(Attribute::Height, value, offset);
    }

    /// Returns width and height together.
    pub fn size(&self) -> Size {
        self.frame.size()
    }

    /// Sets width and height, each resolved independently against this
    /// node's multiplier. The origin is left untouched.
    pub fn set_size(&mut self, size: impl Into<ScaledSize>) {
        let size = size.into();
        self.frame.set_size(size.resolve(self.multiplier));
        trace!(key:% = self.key, size:% = size; "Size written");
    }
}
