use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

/// Prefix for every environment variable read by [`LayoutConfig::from_env`].
pub const ENV_PREFIX: &str = "INLINE_LAYOUT_";

/// Reserved glyph slot width used for line breaking, independent of the
/// icon's display size.
pub const DEFAULT_ICON_SLOT_WIDTH: f32 = 13.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl FromStr for TextAlignment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "leading" => Ok(TextAlignment::Left),
            "center" | "centre" => Ok(TextAlignment::Center),
            "right" | "trailing" => Ok(TextAlignment::Right),
            other => anyhow::bail!("unknown text alignment '{other}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Padding {
    pub fn all(value: f32) -> Self {
        Padding {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Padding {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Everything a layout pass needs besides the elements and the collaborators.
///
/// Built once (usually through [`LayoutConfig::builder`]) and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub font_size: f32,
    /// Display size of icons. Does not affect line breaking.
    pub icon_width: f32,
    pub icon_height: f32,
    /// Width reserved for an icon glyph when breaking lines; two space widths are added on top.
    pub icon_slot_width: f32,
    /// Width of the host surface, padding included. Infinite means "never wrap".
    pub viewport_width: f32,
    pub padding: Padding,
    pub alignment: TextAlignment,
    /// Join consecutive words of a line into one text element.
    pub merge_adjacent_text: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            font_size: 14.0,
            icon_width: 16.0,
            icon_height: 16.0,
            icon_slot_width: DEFAULT_ICON_SLOT_WIDTH,
            viewport_width: f32::INFINITY,
            padding: Padding::default(),
            alignment: TextAlignment::Left,
            merge_adjacent_text: false,
        }
    }
}

impl LayoutConfig {
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }

    /// Usable line width: viewport minus horizontal padding, never negative.
    pub fn max_width(&self) -> f32 {
        (self.viewport_width - self.padding.horizontal()).max(0.0)
    }

    /// Rejects sizes a layout pass cannot work with.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "font_size must be a positive number, got {}",
                self.font_size
            )));
        }
        let non_negative = [
            ("icon_width", self.icon_width),
            ("icon_height", self.icon_height),
            ("icon_slot_width", self.icon_slot_width),
            ("padding.top", self.padding.top),
            ("padding.bottom", self.padding.bottom),
            ("padding.left", self.padding.left),
            ("padding.right", self.padding.right),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number, got {value}"
                )));
            }
        }
        if self.viewport_width.is_nan() || self.viewport_width < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "viewport_width must be non-negative, got {}",
                self.viewport_width
            )));
        }
        Ok(())
    }

    /// Loads configuration from `INLINE_LAYOUT_*` environment variables.
    /// A `.env` file is honoured if present. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an explicit env file without touching the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to open env file '{}'", path.display()))?
            .collect::<Result<HashMap<String, String>, _>>()
            .with_context(|| format!("Failed to parse env file '{}'", path.display()))?;

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = LayoutConfig::default();
        let read = |name: &str, default: f32| env_or(&lookup, name, default);

        let config = LayoutConfig {
            font_size: read("FONT_SIZE", defaults.font_size)?,
            icon_width: read("ICON_WIDTH", defaults.icon_width)?,
            icon_height: read("ICON_HEIGHT", defaults.icon_height)?,
            icon_slot_width: read("ICON_SLOT_WIDTH", defaults.icon_slot_width)?,
            viewport_width: read("VIEWPORT_WIDTH", defaults.viewport_width)?,
            padding: Padding {
                top: read("PADDING_TOP", 0.0)?,
                bottom: read("PADDING_BOTTOM", 0.0)?,
                left: read("PADDING_LEFT", 0.0)?,
                right: read("PADDING_RIGHT", 0.0)?,
            },
            alignment: env_or(&lookup, "ALIGNMENT", defaults.alignment)?,
            merge_adjacent_text: env_or(&lookup, "MERGE_ADJACENT_TEXT", false)?,
        };

        config.validate().context("Layout configuration from environment is invalid")?;
        Ok(config)
    }
}

fn env_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let key = format!("{ENV_PREFIX}{name}");
    match lookup(&key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} has invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

/// Fluent builder for [`LayoutConfig`]. `build` validates.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfigBuilder {
    config: LayoutConfig,
}

impl LayoutConfigBuilder {
    pub fn font_size(mut self, size: f32) -> Self {
        self.config.font_size = size;
        self
    }

    pub fn icon_size(mut self, width: f32, height: f32) -> Self {
        self.config.icon_width = width;
        self.config.icon_height = height;
        self
    }

    pub fn icon_slot_width(mut self, width: f32) -> Self {
        self.config.icon_slot_width = width;
        self
    }

    pub fn viewport_width(mut self, width: f32) -> Self {
        self.config.viewport_width = width;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.config.padding = padding;
        self
    }

    pub fn padding_all(self, value: f32) -> Self {
        self.padding(Padding::all(value))
    }

    pub fn padding_symmetric(self, horizontal: f32, vertical: f32) -> Self {
        self.padding(Padding::symmetric(horizontal, vertical))
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.config.alignment = alignment;
        self
    }

    pub fn merge_adjacent_text(mut self, merge: bool) -> Self {
        self.config.merge_adjacent_text = merge;
        self
    }

    pub fn build(self) -> Result<LayoutConfig, LayoutError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.font_size, 14.0);
        assert_eq!(config.icon_width, 16.0);
        assert_eq!(config.icon_height, 16.0);
        assert_eq!(config.icon_slot_width, 13.0);
        assert_eq!(config.padding, Padding::default());
        assert_eq!(config.alignment, TextAlignment::Left);
        assert!(!config.merge_adjacent_text);
        assert!(config.max_width().is_infinite());
    }

    #[test]
    fn test_max_width_subtracts_horizontal_padding() {
        let config = LayoutConfig::builder()
            .viewport_width(390.0)
            .padding_symmetric(16.0, 8.0)
            .build()
            .unwrap();
        assert_eq!(config.max_width(), 358.0);
        assert_eq!(config.padding.vertical(), 16.0);
    }

    #[test]
    fn test_max_width_never_negative() {
        let config = LayoutConfig::builder()
            .viewport_width(10.0)
            .padding_all(20.0)
            .build()
            .unwrap();
        assert_eq!(config.max_width(), 0.0);
    }

    #[test]
    fn test_builder_rejects_bad_font_size() {
        let err = LayoutConfig::builder().font_size(0.0).build().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_rejects_negative_padding() {
        let err = LayoutConfig::builder()
            .padding(Padding {
                left: -1.0,
                ..Padding::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("padding.left"), "got: {err}");
    }

    #[test]
    fn test_icon_size_does_not_touch_slot_width() {
        let config = LayoutConfig::builder().icon_size(24.0, 20.0).build().unwrap();
        assert_eq!(config.icon_width, 24.0);
        assert_eq!(config.icon_height, 20.0);
        assert_eq!(config.icon_slot_width, DEFAULT_ICON_SLOT_WIDTH);
    }

    #[test]
    fn test_alignment_parsing() {
        assert_eq!("Center".parse::<TextAlignment>().unwrap(), TextAlignment::Center);
        assert_eq!(" trailing ".parse::<TextAlignment>().unwrap(), TextAlignment::Right);
        assert!("justified".parse::<TextAlignment>().is_err());
    }

    #[test]
    fn test_from_lookup_reads_prefixed_values() {
        let vars: HashMap<&str, &str> = [
            ("INLINE_LAYOUT_FONT_SIZE", "16"),
            ("INLINE_LAYOUT_VIEWPORT_WIDTH", "320"),
            ("INLINE_LAYOUT_PADDING_LEFT", "10"),
            ("INLINE_LAYOUT_ALIGNMENT", "right"),
            ("INLINE_LAYOUT_MERGE_ADJACENT_TEXT", "true"),
        ]
        .into_iter()
        .collect();

        let config =
            LayoutConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.max_width(), 310.0);
        assert_eq!(config.alignment, TextAlignment::Right);
        assert!(config.merge_adjacent_text);
        assert_eq!(config.icon_slot_width, DEFAULT_ICON_SLOT_WIDTH);
    }

    #[test]
    fn test_from_lookup_reports_bad_value() {
        let err = LayoutConfig::from_lookup(|key| {
            (key == "INLINE_LAYOUT_FONT_SIZE").then(|| "large".to_string())
        })
        .unwrap_err();
        assert!(
            err.to_string().contains("INLINE_LAYOUT_FONT_SIZE"),
            "error should name the variable: {err}"
        );
    }

    #[test]
    fn test_from_lookup_validates() {
        let err = LayoutConfig::from_lookup(|key| {
            (key == "INLINE_LAYOUT_ICON_WIDTH").then(|| "-4".to_string())
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("icon_width"), "got: {err:#}");
    }

    #[test]
    fn test_from_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "INLINE_LAYOUT_FONT_SIZE=13").unwrap();
        writeln!(file, "INLINE_LAYOUT_ICON_SLOT_WIDTH=18").unwrap();
        writeln!(file, "INLINE_LAYOUT_VIEWPORT_WIDTH=200").unwrap();
        file.flush().unwrap();

        let config = LayoutConfig::from_env_file(file.path()).unwrap();
        assert_eq!(config.font_size, 13.0);
        assert_eq!(config.icon_slot_width, 18.0);
        assert_eq!(config.max_width(), 200.0);
    }

    #[test]
    fn test_from_env_file_missing() {
        let err = LayoutConfig::from_env_file("/definitely/not/here.env").unwrap_err();
        assert!(err.to_string().contains("Failed to open env file"));
    }
}
