// Chunk: docs/chunks/editor_options - Persisted appearance and behavior options

use composer_buffer::{Argb, TextFormat};
use serde::{Deserialize, Serialize};

/// Appearance and behavior options for a composer instance.
///
/// The host persists these alongside its own settings (serde-ready); the
/// engine treats a change of options like an edit — the controller bumps an
/// options generation that layout caches key on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Format applied to newly typed text when the document is empty.
    pub default_format: TextFormat,
    /// Fixed extra spacing between lines, added to ascent + descent.
    pub line_spacing: f32,
    /// Caret rectangle width in pixels.
    pub caret_width: f32,
    /// Full caret blink period is twice this: visible for one interval,
    /// hidden for the next. Zero disables blinking (always visible).
    pub blink_interval_ms: u64,
    pub selection_color: Argb,
    pub caret_color: Argb,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_format: TextFormat::default(),
            line_spacing: 2.0,
            caret_width: 1.0,
            blink_interval_ms: 500,
            selection_color: Argb(0x662A_6AD4),
            caret_color: Argb::BLACK,
        }
    }
}
