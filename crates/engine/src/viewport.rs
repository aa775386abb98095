// Chunk: docs/chunks/viewport_scroll - Vertical scroll state and caret visibility

//! Scroll state for the widget's window onto the document.
//!
//! The viewport tracks a pixel scroll offset clamped against the laid-out
//! content height. Unlike a uniform-row scroller, lines here have varying
//! pixel heights, so all arithmetic is in pixels and the line list supplies
//! the extents.

use crate::layout::Line;

/// The visible window into a potentially taller document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scroll_y: f32,
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport of the given size, scrolled to the top.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Current scroll offset in pixels (distance from the content top to
    /// the viewport top).
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Maximum scroll offset for the given content height: zero when the
    /// content fits entirely.
    pub fn max_scroll_y(&self, content_height: f32) -> f32 {
        (content_height - self.height).max(0.0)
    }

    /// Sets the scroll offset, clamped to `[0, max_scroll_y]`.
    pub fn set_scroll_y(&mut self, y: f32, content_height: f32) {
        self.scroll_y = y.clamp(0.0, self.max_scroll_y(content_height));
    }

    /// Scrolls by a delta (positive scrolls the content down), clamped.
    pub fn scroll_by(&mut self, dy: f32, content_height: f32) {
        self.set_scroll_y(self.scroll_y + dy, content_height);
    }

    /// Resizes the viewport and re-clamps the scroll offset; growing the
    /// viewport near the bottom of the document pulls the offset back in.
    pub fn set_size(&mut self, width: f32, height: f32, content_height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.set_scroll_y(self.scroll_y, content_height);
    }

    /// True when the line lies fully within the visible band.
    pub fn is_line_visible(&self, line: &Line) -> bool {
        line.y >= self.scroll_y && line.bottom() <= self.scroll_y + self.height
    }

    /// Scrolls the minimum distance needed so `line` lies fully within
    /// `[scroll_y, scroll_y + height]`. Returns `true` if scrolling
    /// occurred.
    pub fn ensure_line_visible(&mut self, line: &Line, content_height: f32) -> bool {
        let old = self.scroll_y;
        if line.y < self.scroll_y {
            // Above the viewport: align the line's top with the viewport top.
            self.set_scroll_y(line.y, content_height);
        } else if line.bottom() > self.scroll_y + self.height {
            // Below: align the line's bottom with the viewport bottom.
            self.set_scroll_y(line.bottom() - self.height, content_height);
        }
        self.scroll_y != old
    }
}
