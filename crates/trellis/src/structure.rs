//! View structure: the containment tree and the read dependencies between
//! views.
//!
//! - [`Hierarchy`]: which view lives in which, in declaration order.
//! - [`DependencyGraph`]: which view axis reads which, and the order the
//!   pass must visit them in.

mod dependency;
mod hierarchy;

pub use dependency::{DependencyGraph, Slot};
pub use hierarchy::Hierarchy;
