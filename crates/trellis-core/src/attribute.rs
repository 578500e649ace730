//! The scalar geometric attributes of a node and their frame formulas.
//!
//! Each attribute is a (read, write) pair over a [`Frame`]. Rather than one
//! bespoke code path per attribute, every attribute is described by a
//! [`Formula`]:
//!
//! - **Anchors** (`top`, `left`, `bottom`, `right`, `center_x`, `center_y`)
//!   sit at a fixed fraction of the frame's extent along one axis. Reading
//!   yields `origin + fraction * extent`; writing moves the origin so that the
//!   anchor lands on the value, using the frame's *own* current extent:
//!   `origin = value - fraction * extent`. The size is never touched.
//! - **Extents** (`width`, `height`) read and write the size along one axis
//!   and never touch the origin.
//!
//! ```text
//!        left      center_x      right
//!   top   ┌────────────┬────────────┐   fraction 0.0
//!         │            │            │
//! center_y├────────────┼────────────┤   fraction 0.5
//!         │            │            │
//! bottom  └────────────┴────────────┘   fraction 1.0
//! ```
//!
//! The compound `size` attribute lives on [`crate::node::LayoutNode`] since
//! it is not a single number.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::geometry::Frame;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// How an attribute maps onto a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formula {
    /// A line at `fraction` of the extent along `axis`, measured from the origin.
    Anchor { axis: Axis, fraction: f32 },
    /// The extent along `axis`.
    Extent { axis: Axis },
}

/// A scalar geometric attribute of a layout node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Top,
    Left,
    Bottom,
    Right,
    CenterX,
    CenterY,
    Width,
    Height,
}

impl Attribute {
    /// All scalar attributes, anchors first.
    pub const ALL: [Attribute; 8] = [
        Attribute::Top,
        Attribute::Left,
        Attribute::Bottom,
        Attribute::Right,
        Attribute::CenterX,
        Attribute::CenterY,
        Attribute::Width,
        Attribute::Height,
    ];

    /// Returns the frame formula for this attribute.
    pub fn formula(self) -> Formula {
        use Axis::{Horizontal, Vertical};

        match self {
            Self::Top => Formula::Anchor {
                axis: Vertical,
                fraction: 0.0,
            },
            Self::Left => Formula::Anchor {
                axis: Horizontal,
                fraction: 0.0,
            },
            Self::Bottom => Formula::Anchor {
                axis: Vertical,
                fraction: 1.0,
            },
            Self::Right => Formula::Anchor {
                axis: Horizontal,
                fraction: 1.0,
            },
            Self::CenterX => Formula::Anchor {
                axis: Horizontal,
                fraction: 0.5,
            },
            Self::CenterY => Formula::Anchor {
                axis: Vertical,
                fraction: 0.5,
            },
            Self::Width => Formula::Extent { axis: Horizontal },
            Self::Height => Formula::Extent { axis: Vertical },
        }
    }

    /// Returns the axis this attribute measures along.
    pub fn axis(self) -> Axis {
        match self.formula() {
            Formula::Anchor { axis, .. } | Formula::Extent { axis } => axis,
        }
    }

    /// Returns the dimension measured along `axis`.
    pub fn extent(axis: Axis) -> Attribute {
        match axis {
            Axis::Horizontal => Attribute::Width,
            Axis::Vertical => Attribute::Height,
        }
    }

    /// Returns `true` for `width` and `height`.
    pub fn is_dimension(self) -> bool {
        matches!(self.formula(), Formula::Extent { .. })
    }

    /// Reads this attribute off `frame`.
    pub fn read(self, frame: &Frame) -> f32 {
        match self.formula() {
            Formula::Anchor { axis, fraction } => {
                frame.origin().along(axis) + fraction * frame.size().along(axis)
            }
            Formula::Extent { axis } => frame.size().along(axis),
        }
    }

    /// Writes `value` to this attribute of `frame`.
    ///
    /// Anchors move the origin using the frame's current extent; extents
    /// resize without moving the origin.
    pub fn write(self, frame: &mut Frame, value: f32) {
        match self.formula() {
            Formula::Anchor { axis, fraction } => {
                let extent = frame.size().along(axis);
                frame.set_origin_along(axis, value - fraction * extent);
            }
            Formula::Extent { axis } => frame.set_extent_along(axis, value),
        }
    }

    /// Returns the attribute's name as written in layout scripts.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a name that is not a scalar attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attribute `{0}`")]
pub struct UnknownAttribute(pub String);

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn frame_strategy() -> impl Strategy<Value = Frame> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.0f32..500.0,
            0.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Frame::new(x, y, w, h))
    }

    fn attribute_strategy() -> impl Strategy<Value = Attribute> {
        proptest::sample::select(Attribute::ALL.to_vec())
    }

    /// Writing a value and reading it back returns that value.
    fn check_write_then_read(
        frame: Frame,
        attribute: Attribute,
        value: f32,
    ) -> Result<(), TestCaseError> {
        let mut frame = frame;
        attribute.write(&mut frame, value);
        prop_assert!(approx_eq!(
            f32,
            attribute.read(&frame),
            value,
            epsilon = 0.001
        ));
        Ok(())
    }

    /// Writing an attribute with its own current value is a no-op.
    fn check_self_write_is_identity(frame: Frame, attribute: Attribute) -> Result<(), TestCaseError> {
        let mut written = frame;
        attribute.write(&mut written, attribute.read(&frame));
        prop_assert!(approx_eq!(f32, written.x(), frame.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, written.y(), frame.y(), epsilon = 0.001));
        prop_assert_eq!(written.size(), frame.size());
        Ok(())
    }

    /// A write never touches the other axis.
    fn check_write_is_axis_local(
        frame: Frame,
        attribute: Attribute,
        value: f32,
    ) -> Result<(), TestCaseError> {
        let mut written = frame;
        attribute.write(&mut written, value);
        match attribute.axis() {
            Axis::Horizontal => {
                prop_assert_eq!(written.y(), frame.y());
                prop_assert_eq!(written.height(), frame.height());
            }
            Axis::Vertical => {
                prop_assert_eq!(written.x(), frame.x());
                prop_assert_eq!(written.width(), frame.width());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn write_then_read(
            frame in frame_strategy(),
            attribute in attribute_strategy(),
            value in -1000.0f32..1000.0,
        ) {
            check_write_then_read(frame, attribute, value)?;
        }

        #[test]
        fn self_write_is_identity(frame in frame_strategy(), attribute in attribute_strategy()) {
            check_self_write_is_identity(frame, attribute)?;
        }

        #[test]
        fn write_is_axis_local(
            frame in frame_strategy(),
            attribute in attribute_strategy(),
            value in -1000.0f32..1000.0,
        ) {
            check_write_is_axis_local(frame, attribute, value)?;
        }
    }
}
