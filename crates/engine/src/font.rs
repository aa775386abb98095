// Chunk: docs/chunks/font_metrics - Font measurement seam

//! Font measurement abstraction.
//!
//! The engine never rasterizes text; it only needs two numbers from the
//! host's text system: the pixel width of a string in a given format, and
//! the vertical metrics of that format's font. Everything else (font
//! loading, fallback for unavailable families, shaping) is the provider's
//! problem, which is why the trait is infallible: a provider that cannot
//! resolve a font substitutes a default and measures that.

use composer_buffer::TextFormat;

/// Vertical metrics for a font at a given format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance from baseline to the top of glyphs (positive)
    pub ascent: f32,
    /// Distance from baseline to the bottom of glyphs (positive)
    pub descent: f32,
}

impl FontMetrics {
    /// Ascent plus descent: the text height before inter-line spacing.
    pub fn text_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Measures strings for layout and hit-testing.
///
/// Measurement must be monotonic in the prefix sense (`measure` of a longer
/// prefix is never smaller), which every real text system satisfies and the
/// wrap binary search relies on.
pub trait FontMetricsProvider {
    /// Measured pixel width of `text` rendered in `format`.
    fn measure(&self, text: &str, format: &TextFormat) -> f32;

    /// Vertical metrics of `format`'s font.
    fn metrics(&self, format: &TextFormat) -> FontMetrics;
}

/// Deterministic provider where every code point advances the same width.
///
/// Stands in for a monospace font; used heavily in tests where pixel
/// arithmetic must be exact.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMetrics {
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl FixedAdvanceMetrics {
    pub fn new(advance: f32, ascent: f32, descent: f32) -> Self {
        Self {
            advance,
            ascent,
            descent,
        }
    }
}

impl FontMetricsProvider for FixedAdvanceMetrics {
    fn measure(&self, text: &str, _format: &TextFormat) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn metrics(&self, _format: &TextFormat) -> FontMetrics {
        FontMetrics {
            ascent: self.ascent,
            descent: self.descent,
        }
    }
}
