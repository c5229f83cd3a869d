//! Segmenter — turns elements into the token stream the packer measures.
//!
//! Text runs are split on the single space character with naive split
//! semantics: consecutive spaces produce empty words, which survive as `" "`
//! tokens. Every word except the last of its run keeps one trailing space.
//! The last word carries no space of its own, so nothing separates a run from
//! the next text run unless the caller wrote one.
//!
//! Icons become one token each with a fixed slot width plus two measured
//! spaces. Unresolved icons are dropped here and reported as warnings.

use tracing::warn;

use crate::config::LayoutConfig;
use crate::errors::{LayoutError, LayoutWarning};
use crate::layout::font_metrics::{measure_checked, TextMeasure};
use crate::layout::icons::{GlyphHandle, IconResolver};
use crate::models::Element;

/// Padding measured around every icon slot: one space on each side.
const ICON_GUTTER: &str = "  ";

/// Post-segmentation unit placed by the packer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text {
        fragment: String,
    },
    Icon {
        reference: String,
        glyph: GlyphHandle,
        /// Slot width plus gutter, already measured.
        width: f32,
    },
}

impl Token {
    /// Converts the token back into the element it occupies in a line.
    pub fn into_element(self) -> Element {
        match self {
            Token::Text { fragment } => Element::Text { content: fragment },
            Token::Icon { reference, .. } => Element::Icon { reference },
        }
    }
}

/// Tokens plus whatever was dropped along the way.
#[derive(Debug, Clone, Default)]
pub struct Segmented {
    pub tokens: Vec<Token>,
    pub warnings: Vec<LayoutWarning>,
}

/// Splits one text run into word tokens.
pub fn split_words(content: &str) -> Vec<String> {
    let words: Vec<&str> = content.split(' ').collect();
    let last = words.len() - 1; // split always yields at least one piece
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i < last {
                format!("{word} ")
            } else {
                (*word).to_string()
            }
        })
        .collect()
}

/// Width an icon reserves on a line: slot width plus two space widths.
pub fn icon_slot_width(config: &LayoutConfig, measure: &dyn TextMeasure) -> Result<f32, LayoutError> {
    let gutter = measure_checked(measure, ICON_GUTTER, config.font_size)?;
    Ok(config.icon_slot_width + gutter)
}

/// Segments the full element sequence, in order.
pub fn segment(
    elements: &[Element],
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
    resolver: &dyn IconResolver,
) -> Result<Segmented, LayoutError> {
    let mut out = Segmented::default();
    // Measured lazily so text-only input never measures the gutter.
    let mut slot_width: Option<f32> = None;

    for (element_index, element) in elements.iter().enumerate() {
        match element {
            Element::Text { content } => {
                out.tokens.extend(
                    split_words(content)
                        .into_iter()
                        .map(|fragment| Token::Text { fragment }),
                );
            }
            Element::Icon { reference } => {
                let Some(glyph) = resolver.resolve(reference) else {
                    warn!(reference = %reference, element_index, "Icon not found, skipping");
                    out.warnings.push(LayoutWarning::UnresolvedIconReference {
                        reference: reference.clone(),
                        element_index,
                    });
                    continue;
                };
                let width = match slot_width {
                    Some(w) => w,
                    None => {
                        let w = icon_slot_width(config, measure)?;
                        slot_width = Some(w);
                        w
                    }
                };
                out.tokens.push(Token::Icon {
                    reference: reference.clone(),
                    glyph,
                    width,
                });
            }
        }
    }

    Ok(out)
}
