//! Rendering adapters: turn a `Layout` into something a surface can draw.
//!
//! `render_plain` produces text for a text view or terminal, padding each icon
//! glyph with one space on either side. `position` computes per-element
//! coordinates for canvas-style surfaces.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{LayoutConfig, TextAlignment};
use crate::errors::LayoutError;
use crate::layout::font_metrics::{measure_checked, TextMeasure};
use crate::layout::icons::IconResolver;
use crate::layout::packer::Line;
use crate::layout::segmenter::icon_slot_width;
use crate::layout::Layout;
use crate::models::Element;

impl Line {
    /// Horizontal offset of the line inside `max_width` for the given alignment.
    /// Overflowing lines start at zero.
    pub fn x_offset(&self, max_width: f32, alignment: TextAlignment) -> f32 {
        let slack = (max_width - self.width).max(0.0);
        if !slack.is_finite() {
            return 0.0;
        }
        match alignment {
            TextAlignment::Left => 0.0,
            TextAlignment::Center => slack / 2.0,
            TextAlignment::Right => slack,
        }
    }

    pub fn has_icon(&self) -> bool {
        self.elements.iter().any(Element::is_icon)
    }

    /// Row height: the text line height, raised to the icon height when the line holds an icon.
    pub fn height(&self, line_height: f32, config: &LayoutConfig) -> f32 {
        if self.has_icon() {
            line_height.max(config.icon_height)
        } else {
            line_height
        }
    }
}

impl Layout {
    /// Total drawn height including vertical padding.
    pub fn content_height(&self, line_height: f32, config: &LayoutConfig) -> f32 {
        let rows: f32 = self.lines.iter().map(|l| l.height(line_height, config)).sum();
        rows + config.padding.vertical()
    }
}

/// Renders lines as plain text, one `\n`-terminated row per line.
///
/// An icon the resolver no longer knows is skipped.
pub fn render_plain(layout: &Layout, resolver: &dyn IconResolver) -> String {
    let mut out = String::new();
    for line in &layout.lines {
        for element in &line.elements {
            match element {
                Element::Text { content } => out.push_str(content),
                Element::Icon { reference } => match resolver.resolve(reference) {
                    Some(glyph) => {
                        out.push(' ');
                        out.push_str(&glyph.symbol);
                        out.push(' ');
                    }
                    None => warn!(reference = %reference, "Icon not found while rendering, skipping"),
                },
            }
        }
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedElement {
    pub element: Element,
    /// Left edge of the element's slot, padding and alignment applied.
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedLine {
    /// Top edge of the row.
    pub y: f32,
    pub height: f32,
    pub elements: Vec<PositionedElement>,
}

/// Computes absolute positions for every placed element.
///
/// Text is re-measured with the same measurer used for the pass; icons occupy
/// their full slot (glyph plus one space on each side).
pub fn position(
    layout: &Layout,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
    line_height: f32,
) -> Result<Vec<PositionedLine>, LayoutError> {
    let max_width = config.max_width();
    let slot = if layout.lines.iter().any(Line::has_icon) {
        icon_slot_width(config, measure)?
    } else {
        0.0
    };

    let mut y = config.padding.top;
    let mut out = Vec::with_capacity(layout.lines.len());

    for line in &layout.lines {
        let mut x = config.padding.left + line.x_offset(max_width, config.alignment);
        let mut elements = Vec::with_capacity(line.elements.len());

        for element in &line.elements {
            let width = match element {
                Element::Text { content } => measure_checked(measure, content, config.font_size)?,
                Element::Icon { .. } => slot,
            };
            elements.push(PositionedElement {
                element: element.clone(),
                x,
                width,
            });
            x += width;
        }

        let height = line.height(line_height, config);
        out.push(PositionedLine { y, height, elements });
        y += height;
    }

    Ok(out)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
