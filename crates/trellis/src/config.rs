//! Configuration types for Trellis layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every section and field falls back to its default when
//! missing.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Controls the layout pass (default multiplier, validation).
//! - [`StyleConfig`] - Controls SVG styling such as colours and padding.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().multiplier(), 1.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use crate::color::Color;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Settings for the layout pass.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Multiplier for views that do not declare their own `scale`.
    #[serde(default = "default_multiplier")]
    multiplier: f32,

    /// Reject non-finite and non-positive multipliers before laying out.
    #[serde(default = "default_strict")]
    strict: bool,
}

fn default_multiplier() -> f32 {
    1.0
}

fn default_strict() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            multiplier: default_multiplier(),
            strict: default_strict(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `multiplier` - Default multiplier applied to scalable lengths.
    /// * `strict` - Whether multipliers are validated before the pass runs.
    pub fn new(multiplier: f32, strict: bool) -> Self {
        Self { multiplier, strict }
    }

    /// Returns the default multiplier.
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Returns `true` if multipliers are validated.
    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// Visual styling for exported layouts.
///
/// Colours are stored as CSS strings and parsed on access, so an invalid
/// value is reported when rendering rather than when loading.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background colour of the canvas; transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Outline colour of every view.
    #[serde(default)]
    stroke_color: Option<String>,

    /// Fill colour of every view; unfilled when unset.
    #[serde(default)]
    fill_color: Option<String>,

    /// Empty space around the union of all views.
    #[serde(default = "default_padding")]
    padding: f32,
}

fn default_padding() -> f32 {
    20.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            stroke_color: None,
            fill_color: None,
            padding: default_padding(),
        }
    }
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] from optional colour strings and a padding.
    pub fn new(
        background_color: Option<String>,
        stroke_color: Option<String>,
        fill_color: Option<String>,
        padding: f32,
    ) -> Self {
        Self {
            background_color,
            stroke_color,
            fill_color,
            padding,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed stroke [`Color`], black when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn stroke_color(&self) -> Result<Color, String> {
        parse_optional(self.stroke_color.as_deref(), "stroke").map(Option::unwrap_or_default)
    }

    /// Returns the parsed fill [`Color`], or `None` if views are unfilled.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn fill_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.fill_color.as_deref(), "fill")
    }

    /// Returns the canvas padding.
    pub fn padding(&self) -> f32 {
        self.padding
    }
}

fn parse_optional(color: Option<&str>, role: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {role} color in config: {err}"))
}
