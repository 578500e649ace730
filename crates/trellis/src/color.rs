//! Colours used when exporting a layout.
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate so style
//! settings can be written as any CSS colour string ("#ff8000",
//! "rgb(0, 128, 255)", "teal", ...).

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS colour.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS colour string.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis::color::Color;
    ///
    /// assert!(Color::new("#ff0000").is_ok());
    /// assert!(Color::new("steelblue").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns a copy of this colour with the given alpha, between 0.0
    /// (transparent) and 1.0 (opaque).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
