//! Fixed and scalable lengths.
//!
//! Every length written into a layout node is either absolute or expressed
//! relative to the node's scale multiplier. The multiplier is never stored on
//! the value: the consuming node supplies it at resolution time, so the same
//! value resolves differently on nodes with different multipliers.
//!
//! # Examples
//!
//! ```
//! # use trellis_core::value::ScaledValue;
//! let gap = ScaledValue::scalable(50.0);
//! assert_eq!(gap.resolve(2.0), 100.0);
//! assert_eq!(ScaledValue::fixed(50.0).resolve(2.0), 50.0);
//! ```

use std::{fmt, ops::Neg};

use crate::{attribute::Axis, geometry::Size};

/// A length that is either absolute or proportional to a scale multiplier.
///
/// Negative and zero lengths are valid; a negative offset simply reverses
/// the direction of the sum it takes part in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaledValue {
    /// An absolute length, unaffected by the multiplier.
    Fixed(f32),
    /// A length multiplied by the consuming node's multiplier.
    Scalable(f32),
}

impl ScaledValue {
    /// The neutral offset, `Fixed(0)`.
    pub const ZERO: ScaledValue = ScaledValue::Fixed(0.0);

    /// Creates an absolute length.
    pub fn fixed(length: f32) -> Self {
        Self::Fixed(length)
    }

    /// Creates a length that scales with the consuming node's multiplier.
    pub fn scalable(length: f32) -> Self {
        Self::Scalable(length)
    }

    /// Resolves this value to an absolute length.
    ///
    /// `Fixed(v)` resolves to `v` and `Scalable(v)` to `v * multiplier`.
    pub fn resolve(self, multiplier: f32) -> f32 {
        match self {
            Self::Fixed(length) => length,
            Self::Scalable(length) => length * multiplier,
        }
    }
}

impl Default for ScaledValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Neg for ScaledValue {
    type Output = Self;

    /// Negates the length, keeping the variant.
    fn neg(self) -> Self {
        match self {
            Self::Fixed(length) => Self::Fixed(-length),
            Self::Scalable(length) => Self::Scalable(-length),
        }
    }
}

/// Plain numbers are fixed lengths, which is how another node's already
/// resolved attribute is fed into a dimension setter.
impl From<f32> for ScaledValue {
    fn from(length: f32) -> Self {
        Self::Fixed(length)
    }
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(length) => write!(f, "fixed({length})"),
            Self::Scalable(length) => write!(f, "scalable({length})"),
        }
    }
}

/// A width/height pair of independently typed [`ScaledValue`]s.
///
/// Both components resolve against the same multiplier but need not share a
/// variant.
///
/// # Examples
///
/// ```
/// # use trellis_core::{geometry::Size, value::{ScaledSize, ScaledValue}};
/// let size = ScaledSize::new(ScaledValue::fixed(300.0), ScaledValue::scalable(300.0));
/// assert_eq!(size.resolve(0.5), Size::new(300.0, 150.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScaledSize {
    width: ScaledValue,
    height: ScaledValue,
}

impl ScaledSize {
    pub fn new(width: ScaledValue, height: ScaledValue) -> Self {
        Self { width, height }
    }

    /// Both dimensions fixed.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self::new(ScaledValue::Fixed(width), ScaledValue::Fixed(height))
    }

    /// Both dimensions scalable.
    pub fn scalable(width: f32, height: f32) -> Self {
        Self::new(ScaledValue::Scalable(width), ScaledValue::Scalable(height))
    }

    pub fn width(self) -> ScaledValue {
        self.width
    }

    pub fn height(self) -> ScaledValue {
        self.height
    }

    /// Returns the component measured along `axis`.
    pub fn along(self, axis: Axis) -> ScaledValue {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Resolves both components against `multiplier`.
    pub fn resolve(self, multiplier: f32) -> Size {
        Size::new(
            self.width.resolve(multiplier),
            self.height.resolve(multiplier),
        )
    }
}

/// An already resolved size (e.g. another node's `size()`) is a fixed pair.
impl From<Size> for ScaledSize {
    fn from(size: Size) -> Self {
        Self::fixed(size.width(), size.height())
    }
}

impl fmt::Display for ScaledSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width, self.height)
    }
}
