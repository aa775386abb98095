// Chunk: docs/chunks/render_virtualization - Visible-line virtualized drawing

//! Virtualized rendering: draws only the lines intersecting the viewport.
//!
//! Given a fresh layout snapshot and the current scroll offset, the visible
//! range is found by a linear scan from the top (first line whose bottom
//! edge reaches the viewport) and from the bottom (last line whose top edge
//! is inside). Cost is proportional to visible lines, not document length.
//!
//! Draw order per frame: clip, selection rectangles, text runs, caret.
//! Selection is painted per line as a rectangle between the measured pixel
//! offsets of the covered substring. The caret is drawn only when the
//! widget is focused, the blink phase is visible, and no selection is
//! active.

use composer_buffer::{Argb, RichBuffer, TextFormat};

use crate::font::FontMetricsProvider;
use crate::layout::LayoutSnapshot;
use crate::options::EditorOptions;
use crate::viewport::Viewport;

/// An axis-aligned rectangle in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The 2-D drawing surface the host supplies. `draw_text` takes the left
/// edge and the baseline y of the run.
pub trait DrawSurface {
    fn draw_text(&mut self, x: f32, baseline: f32, text: &str, format: &TextFormat);
    fn fill_rect(&mut self, rect: Rect, color: Argb);
    fn set_clip(&mut self, rect: Rect);
}

/// Draws the visible slice of the document onto `surface`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw(
    snapshot: &LayoutSnapshot,
    buffer: &RichBuffer,
    viewport: &Viewport,
    options: &EditorOptions,
    provider: &dyn FontMetricsProvider,
    focused: bool,
    blink_visible: bool,
    surface: &mut dyn DrawSurface,
) {
    let store = buffer.store();
    let scroll_y = viewport.scroll_y();

    surface.set_clip(Rect::new(0.0, 0.0, viewport.width(), viewport.height()));

    let first = snapshot.first_visible(scroll_y);
    let last = snapshot.last_visible(scroll_y, viewport.height());

    // Selection endpoints in global offsets, already in document order.
    let selection = buffer
        .selection_range()
        .map(|(start, end)| (store.global_offset(start), store.global_offset(end)));

    // ==================== Selection rectangles ====================
    if let Some((sel_start, sel_end)) = selection {
        for index in first..=last {
            let line = snapshot.line(index);
            let lo = sel_start.max(line.global_start);
            let hi = sel_end.min(line.global_end);
            if lo >= hi {
                continue;
            }
            let x0 = snapshot.x_for_offset(store, provider, index, lo);
            let x1 = snapshot.x_for_offset(store, provider, index, hi);
            surface.fill_rect(
                Rect::new(x0, line.y - scroll_y, x1 - x0, line.height),
                options.selection_color,
            );
        }
    }

    // ==================== Text runs ====================
    for index in first..=last {
        let line = snapshot.line(index);
        let runs = snapshot.line_runs(store, index);
        if runs.is_empty() {
            continue;
        }
        // Baseline: all runs on a line share the tallest ascent.
        let ascent = runs
            .iter()
            .map(|run| provider.metrics(store.segment(run.segment).format()).ascent)
            .fold(0.0f32, f32::max);
        let baseline = line.y - scroll_y + ascent;
        let mut x = 0.0f32;
        for run in &runs {
            let format = store.segment(run.segment).format().clone();
            surface.draw_text(x, baseline, &run.text, &format);
            x += provider.measure(&run.text, &format);
        }
    }

    // ==================== Caret ====================
    if focused && blink_visible && selection.is_none() {
        let caret_global = store.global_offset(buffer.caret());
        let index = snapshot.line_index_for_offset(caret_global);
        if index >= first && index <= last {
            let line = snapshot.line(index);
            let x = snapshot.x_for_offset(store, provider, index, caret_global);
            surface.fill_rect(
                Rect::new(
                    x,
                    line.y - scroll_y,
                    options.caret_width,
                    line.height - options.line_spacing,
                ),
                options.caret_color,
            );
        }
    }
}
