//! The capability a layout node receives from the view hierarchy.
//!
//! Nodes are handed a hierarchy context at construction and keep it for the
//! surrounding driver, but no geometry formula ever consults it. Ordering,
//! cycle detection and coordinate-space bookkeeping all live on the other
//! side of this trait.

use std::fmt;

use crate::identifier::Key;

/// Read-only view of the hierarchy a layout node belongs to.
pub trait HierarchyContext: fmt::Debug {
    /// Returns `true` if the hierarchy has registered a view with this key.
    fn contains(&self, key: Key) -> bool;

    /// Returns the key of the container `key` lives in, or `None` for a root
    /// (or for a view the hierarchy does not know).
    fn parent_of(&self, key: Key) -> Option<Key>;
}

/// A hierarchy that knows no views: every node is its own root.
///
/// Used for laying out nodes in isolation, e.g. when exercising the
/// attribute formulas without a driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl HierarchyContext for Detached {
    fn contains(&self, _key: Key) -> bool {
        false
    }

    fn parent_of(&self, _key: Key) -> Option<Key> {
        None
    }
}
