//! Greedy word wrap for text mixed with inline icons.
//!
//! Callers hand over a list of [`Element`]s, a [`LayoutConfig`], a
//! [`TextMeasure`] and an [`IconResolver`], and get back a [`Layout`]: lines
//! top to bottom, none wider than the configured max width except a line
//! holding a single oversized token.
//!
//! ```
//! use inline_layout::{layout, render_plain, Element, IconSet, LayoutConfig};
//!
//! let icons = IconSet::new().with_icon("star", "★");
//! let config = LayoutConfig::builder().viewport_width(6.0).build().unwrap();
//! let measure = |text: &str, _size: f32| text.chars().count() as f32;
//!
//! let elements = [Element::text("one two three")];
//! let result = layout(&elements, &config, &measure, &icons).unwrap();
//! assert_eq!(render_plain(&result, &icons), "one \ntwo \nthree\n");
//! ```

pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod telemetry;

pub use config::{LayoutConfig, LayoutConfigBuilder, Padding, TextAlignment};
pub use errors::{LayoutError, LayoutWarning};
pub use layout::{
    layout, layout_blocking, render_plain, CellMeasure, FontFamily, GlyphHandle, IconResolver,
    IconSet, Layout, LayoutStats, Line, TextMeasure,
};
pub use models::Element;
