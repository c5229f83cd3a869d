use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Library-level error type.
/// Only configuration and measurement problems are fatal to a layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Measurement unavailable for {text:?} at size {font_size}: {reason}")]
    MeasurementUnavailable {
        text: String,
        font_size: f32,
        reason: String,
    },

    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal layout error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LayoutError {
    pub(crate) fn measurement(text: &str, font_size: f32, reason: impl Into<String>) -> Self {
        LayoutError::MeasurementUnavailable {
            text: text.to_string(),
            font_size,
            reason: reason.into(),
        }
    }
}

/// Recoverable condition observed during a layout pass.
///
/// Warnings never abort the pass; they are returned alongside the lines and
/// also emitted as `tracing` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// An icon reference had no glyph. The icon was dropped and took no space.
    UnresolvedIconReference {
        reference: String,
        element_index: usize,
    },
}
