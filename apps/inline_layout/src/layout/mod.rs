// Layout engine: segmenter, greedy packer, measurement and icon seams.
// A pass is pure and synchronous; `layout_blocking` moves it off the async executor.

pub mod font_metrics;
pub mod icons;
pub mod packer;
pub mod render;
pub mod segmenter;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::errors::{LayoutError, LayoutWarning};
use crate::models::Element;

pub use font_metrics::{get_metrics, CellMeasure, FontFamily, FontMetricTable, TextMeasure};
pub use icons::{GlyphHandle, IconResolver, IconSet};
pub use packer::Line;
pub use render::render_plain;

/// Counters for one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    pub elements: usize,
    pub tokens: usize,
    pub dropped_icons: usize,
}

/// Result of a layout pass: lines top to bottom plus what was recovered along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub lines: Vec<Line>,
    pub stats: LayoutStats,
    pub warnings: Vec<LayoutWarning>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Widest line, which may exceed the max width when a token overflowed.
    pub fn max_line_width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }
}

/// Lays out `elements` under `config`.
///
/// Unresolved icons are dropped and reported in `Layout::warnings`.
/// Measurement failures abort the pass.
pub fn layout(
    elements: &[Element],
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
    resolver: &dyn IconResolver,
) -> Result<Layout, LayoutError> {
    config.validate()?;

    let segmented = segmenter::segment(elements, config, measure, resolver)?;
    let stats = LayoutStats {
        elements: elements.len(),
        tokens: segmented.tokens.len(),
        dropped_icons: segmented.warnings.len(),
    };

    let lines = packer::pack(segmented.tokens, config, measure)?;

    debug!(
        elements = stats.elements,
        tokens = stats.tokens,
        dropped_icons = stats.dropped_icons,
        lines = lines.len(),
        max_width = config.max_width(),
        "Layout pass complete"
    );

    Ok(Layout {
        lines,
        stats,
        warnings: segmented.warnings,
    })
}

/// Runs [`layout`] inside `tokio::task::spawn_blocking`.
///
/// Takes owned data because the blocking closure must be `'static`.
pub async fn layout_blocking(
    elements: Vec<Element>,
    config: LayoutConfig,
    measure: Arc<dyn TextMeasure>,
    resolver: Arc<dyn IconResolver>,
) -> Result<Layout, LayoutError> {
    tokio::task::spawn_blocking(move || layout(&elements, &config, &*measure, &*resolver))
        .await
        .map_err(|e| LayoutError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))?
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
