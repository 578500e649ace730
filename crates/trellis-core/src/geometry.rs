//! Geometric primitives for view layout.
//!
//! This module provides the plain value types every layout node is built
//! from. None of them know about scale multipliers; resolution of scalable
//! lengths happens in [`crate::value`] before anything reaches a frame.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Frame`] - A rectangle stored as origin plus size, the state of a node
//! - [`Bounds`] - A rectangle stored as min/max coordinates, used for unions
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! A frame's origin is its top-left corner, so `top` is `origin.y` and
//! `bottom` is `origin.y + height`.

use crate::attribute::Axis;

/// A 2D point in layout coordinate space.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the coordinate along `axis`.
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Width and height of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the extent along `axis`: width for horizontal, height for vertical.
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// The rectangle owned by a layout node: a top-left origin and a size.
///
/// Frames are the only mutable geometric state in a layout pass. Every
/// derived attribute of a node (edges, centers, dimensions) is computed from,
/// and written back to, these four numbers.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Frame;
/// let frame = Frame::new(20.0, 50.0, 400.0, 300.0);
/// assert_eq!(frame.x(), 20.0);
/// assert_eq!(frame.max_y(), 350.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    origin: Point,
    size: Size,
}

impl Frame {
    /// The zero rectangle, the usual starting state of a node.
    pub const ZERO: Frame = Frame {
        origin: Point { x: 0.0, y: 0.0 },
        size: Size {
            width: 0.0,
            height: 0.0,
        },
    };

    /// Creates a frame from its origin coordinates and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Returns the top-left corner.
    pub fn origin(self) -> Point {
        self.origin
    }

    /// Returns the dimensions.
    pub fn size(self) -> Size {
        self.size
    }

    pub fn x(self) -> f32 {
        self.origin.x
    }

    pub fn y(self) -> f32 {
        self.origin.y
    }

    pub fn width(self) -> f32 {
        self.size.width
    }

    pub fn height(self) -> f32 {
        self.size.height
    }

    /// Returns the right edge (`x + width`).
    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Returns the bottom edge (`y + height`).
    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Moves the origin along `axis` to `value`, leaving the size untouched.
    pub fn set_origin_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.origin.x = value,
            Axis::Vertical => self.origin.y = value,
        }
    }

    /// Sets the extent along `axis` to `value`, leaving the origin untouched.
    pub fn set_extent_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.size.width = value,
            Axis::Vertical => self.size.height = value,
        }
    }

    /// Replaces the size, leaving the origin untouched.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Returns a copy of this frame moved by `offset`.
    pub fn translate(self, offset: Point) -> Self {
        Self {
            origin: self.origin.add_point(offset),
            size: self.size,
        }
    }

    /// Converts this frame to min/max bounds.
    pub fn to_bounds(self) -> Bounds {
        Bounds {
            min_x: self.origin.x,
            min_y: self.origin.y,
            max_x: self.max_x(),
            max_y: self.max_y(),
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Frame;
    /// let header = Frame::new(0.0, 0.0, 100.0, 30.0).to_bounds();
    /// let content = Frame::new(10.0, 40.0, 120.0, 80.0).to_bounds();
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}
