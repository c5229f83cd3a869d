//! Icon resolution seam and a map-backed registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A renderable glyph for an icon reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphHandle {
    /// What a text surface draws in the icon slot.
    pub symbol: String,
}

/// Resolves an opaque icon reference to a glyph.
///
/// `None` means the icon is skipped for the whole pass: it takes no line
/// space and is reported as a warning.
pub trait IconResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Option<GlyphHandle>;
}

/// Icon registry keyed by reference.
///
/// Deserializes from a flat JSON object: `{"star": "★", "bolt": "⚡"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconSet {
    glyphs: HashMap<String, String>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_icon(mut self, reference: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.insert(reference, symbol);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, symbol: impl Into<String>) {
        self.glyphs.insert(reference.into(), symbol.into());
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl IconResolver for IconSet {
    fn resolve(&self, reference: &str) -> Option<GlyphHandle> {
        self.glyphs.get(reference).map(|symbol| GlyphHandle {
            symbol: symbol.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let icons = IconSet::new().with_icon("star", "★");
        assert_eq!(
            icons.resolve("star"),
            Some(GlyphHandle {
                symbol: "★".to_string()
            })
        );
        assert_eq!(icons.resolve("missing-ref"), None);
    }

    #[test]
    fn test_icon_set_from_json() {
        let icons: IconSet = serde_json::from_str(r#"{"star":"★","bolt":"⚡"}"#).unwrap();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons.resolve("bolt").unwrap().symbol, "⚡");
    }

    #[test]
    fn test_insert_overwrites() {
        let mut icons = IconSet::new();
        assert!(icons.is_empty());
        icons.insert("star", "*");
        icons.insert("star", "★");
        assert_eq!(icons.len(), 1);
        assert_eq!(icons.resolve("star").unwrap().symbol, "★");
    }
}
