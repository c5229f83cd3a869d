//! Greedy line packer.
//!
//! One forward pass, no lookahead and no backtracking. A token that would push
//! the running width past `max_width` starts a new line, unless the current
//! line is still empty: then it is placed anyway and the line overflows.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::errors::LayoutError;
use crate::layout::font_metrics::{measure_checked, TextMeasure};
use crate::layout::segmenter::Token;
use crate::models::Element;

/// One row of the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub elements: Vec<Element>,
    /// Sum of the measured widths of every token placed on this line.
    pub width: f32,
    /// Tokens placed; equals `elements.len()` unless adjacent text was merged.
    pub token_count: usize,
}

impl Line {
    fn new() -> Self {
        Line {
            elements: Vec::new(),
            width: 0.0,
            token_count: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.token_count == 0
    }

    fn push(&mut self, element: Element, width: f32, merge_text: bool) {
        self.width += width;
        self.token_count += 1;

        if merge_text {
            if let (Some(Element::Text { content }), Element::Text { content: next }) =
                (self.elements.last_mut(), &element)
            {
                content.push_str(next);
                return;
            }
        }
        self.elements.push(element);
    }

    /// True if this line is wider than `max_width`. Only a line holding a single
    /// oversized token can be.
    pub fn overflows(&self, max_width: f32) -> bool {
        self.width > max_width
    }
}

/// Packs tokens into lines no wider than `config.max_width()`.
///
/// Empty input yields no lines.
pub fn pack(
    tokens: Vec<Token>,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<Vec<Line>, LayoutError> {
    let max_width = config.max_width();
    let merge = config.merge_adjacent_text;

    let mut lines: Vec<Line> = Vec::new();
    let mut current = Line::new();

    for token in tokens {
        let token_width = match &token {
            Token::Text { fragment } => measure_checked(measure, fragment, config.font_size)?,
            Token::Icon { width, .. } => *width,
        };

        if !current.is_empty() && current.width + token_width > max_width {
            lines.push(std::mem::replace(&mut current, Line::new()));
        }
        current.push(token.into_element(), token_width, merge);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    Ok(lines)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::icons::GlyphHandle;
    use crate::layout::segmenter::split_words;

    /// Every character is one unit wide.
    fn unit_measure(text: &str, _font_size: f32) -> f32 {
        text.chars().count() as f32
    }

    fn make_config(max_width: f32) -> LayoutConfig {
        LayoutConfig::builder().viewport_width(max_width).build().unwrap()
    }

    fn text_tokens(run: &str) -> Vec<Token> {
        split_words(run)
            .into_iter()
            .map(|fragment| Token::Text { fragment })
            .collect()
    }

    fn icon_token(reference: &str, width: f32) -> Token {
        Token::Icon {
            reference: reference.to_string(),
            glyph: GlyphHandle {
                symbol: "*".to_string(),
            },
            width,
        }
    }

    fn texts(line: &Line) -> Vec<String> {
        line.elements
            .iter()
            .map(|e| match e {
                Element::Text { content } => content.clone(),
                Element::Icon { reference } => format!("<{reference}>"),
            })
            .collect()
    }

    #[test]
    fn test_empty_tokens_yield_no_lines() {
        let lines = pack(vec![], &make_config(100.0), &unit_measure).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_two_words_per_line() {
        // "a " and "b " are 2 wide each; a third token would exceed 4.
        let lines = pack(text_tokens("a b c d e"), &make_config(4.0), &unit_measure).unwrap();
        let rendered: Vec<Vec<String>> = lines.iter().map(texts).collect();
        assert_eq!(
            rendered,
            vec![vec!["a ", "b "], vec!["c ", "d "], vec!["e"]]
        );
        assert_eq!(lines[2].width, 1.0);
    }

    #[test]
    fn test_exact_fit_does_not_break() {
        let lines = pack(text_tokens("ab cd"), &make_config(5.0), &unit_measure).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].width, 5.0);
    }

    #[test]
    fn test_oversized_token_sits_alone_and_overflows() {
        let lines = pack(
            text_tokens("hi extraordinarily ok"),
            &make_config(6.0),
            &unit_measure,
        )
        .unwrap();
        let rendered: Vec<Vec<String>> = lines.iter().map(texts).collect();
        assert_eq!(
            rendered,
            vec![vec!["hi "], vec!["extraordinarily "], vec!["ok"]]
        );
        assert!(lines[1].overflows(6.0));
        assert!(!lines[0].overflows(6.0));
    }

    #[test]
    fn test_icon_uses_precomputed_width() {
        let tokens = vec![
            Token::Text {
                fragment: "abc".to_string(),
            },
            icon_token("star", 15.0),
        ];
        let lines = pack(tokens, &make_config(17.0), &unit_measure).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[1]), vec!["<star>"]);
        assert_eq!(lines[1].width, 15.0);
    }

    #[test]
    fn test_width_resets_on_break() {
        let lines = pack(text_tokens("aaa bbb ccc"), &make_config(4.0), &unit_measure).unwrap();
        let widths: Vec<f32> = lines.iter().map(|l| l.width).collect();
        assert_eq!(widths, vec![4.0, 4.0, 3.0]);
    }

    #[test]
    fn test_zero_max_width_puts_each_token_on_its_own_line() {
        let lines = pack(text_tokens("a b"), &make_config(0.0), &unit_measure).unwrap();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_zero_width_tokens_never_break() {
        let zero = |_: &str, _: f32| 0.0_f32;
        let lines = pack(text_tokens("a b c"), &make_config(0.0), &zero).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].token_count, 3);
    }

    #[test]
    fn test_merge_adjacent_text() {
        let config = LayoutConfig::builder()
            .viewport_width(8.0)
            .merge_adjacent_text(true)
            .build()
            .unwrap();
        let mut tokens = text_tokens("a b");
        tokens.push(icon_token("star", 3.0));
        tokens.extend(text_tokens("c d e f"));
        let lines = pack(tokens, &config, &unit_measure).unwrap();
        let rendered: Vec<Vec<String>> = lines.iter().map(texts).collect();
        assert_eq!(
            rendered,
            vec![vec!["a b", "<star>", "c "], vec!["d e f"]]
        );
        assert_eq!(lines[0].token_count, 4);
        assert_eq!(lines[1].token_count, 3);
    }

    #[test]
    fn test_measurement_error_propagates() {
        let nan = |_: &str, _: f32| f32::NAN;
        let err = pack(text_tokens("a"), &make_config(10.0), &nan).unwrap_err();
        assert!(matches!(err, LayoutError::MeasurementUnavailable { .. }));
    }
}
