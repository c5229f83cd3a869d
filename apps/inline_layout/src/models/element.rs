use serde::{Deserialize, Serialize};

/// One atomic input unit: a run of literal text or an icon reference.
///
/// Icon references are opaque; an [`IconResolver`](crate::layout::IconResolver)
/// maps them to glyphs at layout time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Text { content: String },
    Icon { reference: String },
}

impl Element {
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text {
            content: content.into(),
        }
    }

    pub fn icon(reference: impl Into<String>) -> Self {
        Element::Icon {
            reference: reference.into(),
        }
    }

    pub fn is_icon(&self) -> bool {
        matches!(self, Element::Icon { .. })
    }

    /// Text content, or `None` for icons.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Element::Text { content } => Some(content),
            Element::Icon { .. } => None,
        }
    }
}
