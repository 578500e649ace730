//! Trellis Core Types and Definitions
//!
//! This crate provides the relative-positioning engine at the heart of
//! Trellis. It includes:
//!
//! - **Identifiers**: String-interned view keys ([`identifier::Key`])
//! - **Values**: Fixed and scalable lengths ([`value::ScaledValue`], [`value::ScaledSize`])
//! - **Geometry**: Points, sizes, frames and bounds ([`geometry`] module)
//! - **Attributes**: Scalar attribute formulas over a frame ([`attribute::Attribute`])
//! - **Nodes**: Mutable rectangles with attribute accessors ([`node::LayoutNode`])
//! - **Hierarchy**: The context a node carries for its driver ([`hierarchy::HierarchyContext`])

pub mod attribute;
pub mod geometry;
pub mod hierarchy;
pub mod identifier;
pub mod node;
pub mod value;
