// Chunk: docs/chunks/pixel_wrap_layout - Wrap-aware line layout over measured text

//! Line layout: maps the segmented document onto visual lines.
//!
//! The layout walks segments in reading order, tracking a running global
//! code-point offset. A line is bounded by an explicit newline, by the
//! viewport width, or by the end of the document; a single visual line can
//! span several segments with different formats.
//!
//! When a candidate run exceeds the available width, the break point is
//! found by binary-searching over the code-point count (measurement is
//! monotonic in the prefix length), then pulled back to the nearest
//! preceding whitespace when that whitespace sits at ≥ 0.7 of the fitted
//! length. A wrapped line always takes at least one code point so layout
//! makes forward progress even in absurdly narrow viewports.
//!
//! Lines are derived state: the whole list is rebuilt when stale and the
//! cache is keyed on the store revision, viewport width, and options
//! generation — there is no invalidation call to forget. Recompute cost is
//! O(segments × binary-search depth), paid only on edit, resize, or option
//! changes, never per frame.
//!
//! The same snapshot serves selection-overlap tests, caret→line mapping,
//! hit-testing, and scroll-to-caret, so screen and buffer coordinates can
//! never disagree.

use composer_buffer::{CursorPosition, SegmentStore, TextFormat};

use crate::font::FontMetricsProvider;
use crate::options::EditorOptions;

/// Whitespace breaks win over the exact fitted length only when they are at
/// least this fraction of it; earlier whitespace would waste too much of
/// the line.
const WHITESPACE_BREAK_RATIO: f32 = 0.7;

/// One visual line: a derived row produced by wrapping the document to the
/// viewport width. Never persisted, always rebuilt wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Position of the first code point on the line.
    pub start: CursorPosition,
    /// Position just past the last code point on the line (exclusive; for a
    /// hard-broken line this is the newline's position).
    pub end: CursorPosition,
    /// Global code-point offset of `start`.
    pub global_start: usize,
    /// Global code-point offset of `end` (exclusive).
    pub global_end: usize,
    /// Top edge, in content pixels (sum of prior line heights).
    pub y: f32,
    /// Row height: tallest run's ascent + descent, plus line spacing.
    pub height: f32,
    /// True when the line ends at an explicit newline rather than a wrap.
    pub hard_break: bool,
}

impl Line {
    /// Bottom edge in content pixels.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A contiguous single-segment slice of one visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRun {
    /// Index of the segment this run belongs to.
    pub segment: usize,
    /// The run's text.
    pub text: String,
}

/// The fully computed line list plus total content height.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    lines: Vec<Line>,
    content_height: f32,
}

impl LayoutSnapshot {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `index`, clamped to the last line (a snapshot always
    /// holds at least one line).
    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index.min(self.lines.len() - 1)]
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Index of the line containing the caret at `global`.
    ///
    /// A caret exactly on a soft wrap boundary belongs to the following
    /// line (it is drawn at that line's left edge); on a hard break it
    /// stays with the line that owns the newline.
    pub fn line_index_for_offset(&self, global: usize) -> usize {
        for (i, line) in self.lines.iter().enumerate() {
            if global < line.global_end {
                return i;
            }
            if global == line.global_end && (line.hard_break || i + 1 == self.lines.len()) {
                return i;
            }
        }
        self.lines.len() - 1
    }

    /// Index of the line containing content y-coordinate `y`, clamped to
    /// the first/last line.
    pub fn line_index_at_y(&self, y: f32) -> usize {
        if y <= 0.0 {
            return 0;
        }
        for (i, line) in self.lines.iter().enumerate() {
            if y < line.bottom() {
                return i;
            }
        }
        self.lines.len() - 1
    }

    /// First line visible at `scroll_y`: linear scan from the top for the
    /// first line whose bottom edge reaches the viewport.
    pub fn first_visible(&self, scroll_y: f32) -> usize {
        for (i, line) in self.lines.iter().enumerate() {
            if line.bottom() >= scroll_y {
                return i;
            }
        }
        self.lines.len() - 1
    }

    /// Last line visible in a viewport of `height` at `scroll_y`: linear
    /// scan from the bottom for the last line whose top edge is inside.
    pub fn last_visible(&self, scroll_y: f32, height: f32) -> usize {
        for (i, line) in self.lines.iter().enumerate().rev() {
            if line.y <= scroll_y + height {
                return i;
            }
        }
        0
    }

    /// The single-segment runs making up line `index`, in reading order.
    /// Empty for an empty line.
    pub fn line_runs(&self, store: &SegmentStore, index: usize) -> Vec<LineRun> {
        let line = self.line(index);
        let mut runs = Vec::new();
        let (start, end) = (line.start, line.end);
        for segment in start.segment..=end.segment.min(store.segment_count() - 1) {
            let seg = store.segment(segment);
            let from = if segment == start.segment { start.offset } else { 0 };
            let to = if segment == end.segment { end.offset } else { seg.len() };
            if from < to {
                runs.push(LineRun {
                    segment,
                    text: seg.slice(from, to),
                });
            }
        }
        runs
    }

    /// Pixel x of the caret at global offset `global` on line `index`.
    pub fn x_for_offset(
        &self,
        store: &SegmentStore,
        provider: &dyn FontMetricsProvider,
        index: usize,
        global: usize,
    ) -> f32 {
        let line = self.line(index);
        let target = global.clamp(line.global_start, line.global_end);
        let mut x = 0.0f32;
        let mut consumed = line.global_start;
        for run in self.line_runs(store, index) {
            let format = store.segment(run.segment).format().clone();
            let run_len = run.text.chars().count();
            if target >= consumed + run_len {
                x += provider.measure(&run.text, &format);
                consumed += run_len;
            } else {
                let prefix: String = run.text.chars().take(target - consumed).collect();
                return x + provider.measure(&prefix, &format);
            }
        }
        x
    }

    /// Global offset on line `index` whose caret x is closest to `x`:
    /// minimizes `|measure(prefix) − x|` over every prefix of the line.
    pub fn offset_at_x(
        &self,
        store: &SegmentStore,
        provider: &dyn FontMetricsProvider,
        index: usize,
        x: f32,
    ) -> usize {
        let line = self.line(index);
        let mut best_offset = line.global_start;
        let mut best_dist = x.abs();
        let mut base = 0.0f32;
        let mut consumed = line.global_start;
        for run in self.line_runs(store, index) {
            let format = store.segment(run.segment).format().clone();
            let chars: Vec<char> = run.text.chars().collect();
            for i in 1..=chars.len() {
                let prefix: String = chars[..i].iter().collect();
                let width = base + provider.measure(&prefix, &format);
                let dist = (width - x).abs();
                if dist < best_dist {
                    best_dist = dist;
                    best_offset = consumed + i;
                }
            }
            base += provider.measure(&run.text, &format);
            consumed += chars.len();
        }
        best_offset
    }

    /// Hit-tests a content-space point to a cursor position. This reuses
    /// the same line scan and width measurement as layout itself, so a
    /// click lands exactly where the caret will be drawn.
    pub fn position_for_point(
        &self,
        store: &SegmentStore,
        provider: &dyn FontMetricsProvider,
        x: f32,
        y: f32,
    ) -> CursorPosition {
        let index = self.line_index_at_y(y);
        let global = self.offset_at_x(store, provider, index, x);
        store.position_at_global(global)
    }
}

/// Lazily recomputed line layout.
///
/// The cache key is `(store revision, viewport width, options generation)`;
/// any mismatch triggers a wholesale rebuild. There is deliberately no
/// method to mutate a cached snapshot.
#[derive(Debug, Default)]
pub struct LineLayout {
    cache: Option<Cache>,
}

#[derive(Debug)]
struct Cache {
    revision: u64,
    width_bits: u32,
    generation: u64,
    snapshot: LayoutSnapshot,
}

impl LineLayout {
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// Returns the current snapshot, recomputing it first if the document,
    /// width, or options changed since the last call.
    pub fn snapshot(
        &mut self,
        store: &SegmentStore,
        width: f32,
        options_generation: u64,
        options: &EditorOptions,
        provider: &dyn FontMetricsProvider,
    ) -> &LayoutSnapshot {
        let fresh = matches!(
            &self.cache,
            Some(c) if c.revision == store.revision()
                && c.width_bits == width.to_bits()
                && c.generation == options_generation
        );
        if !fresh {
            log::trace!(
                "recomputing line layout: revision {} width {width}",
                store.revision()
            );
            self.cache = Some(Cache {
                revision: store.revision(),
                width_bits: width.to_bits(),
                generation: options_generation,
                snapshot: compute_layout(store, width, options, provider),
            });
        }
        match &self.cache {
            Some(cache) => &cache.snapshot,
            None => unreachable!("layout cache populated above"),
        }
    }
}

/// Accumulates one line at a time during layout.
struct LineAccumulator {
    lines: Vec<Line>,
    y: f32,
    start: CursorPosition,
    global_start: usize,
    width: f32,
    tallest: f32,
    chars: usize,
}

impl LineAccumulator {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            y: 0.0,
            start: CursorPosition::new(0, 0),
            global_start: 0,
            width: 0.0,
            tallest: 0.0,
            chars: 0,
        }
    }

    fn extend(&mut self, advance_px: f32, text_height: f32, char_count: usize) {
        self.width += advance_px;
        self.tallest = self.tallest.max(text_height);
        self.chars += char_count;
    }

    /// Closes the current line and starts the next one at
    /// `(next_start, next_global)`. Empty lines take `fallback_height`.
    #[allow(clippy::too_many_arguments)]
    fn flush(
        &mut self,
        end: CursorPosition,
        global_end: usize,
        hard_break: bool,
        fallback_height: f32,
        spacing: f32,
        next_start: CursorPosition,
        next_global: usize,
    ) {
        let text_height = if self.chars > 0 {
            self.tallest
        } else {
            fallback_height
        };
        let height = text_height + spacing;
        self.lines.push(Line {
            start: self.start,
            end,
            global_start: self.global_start,
            global_end,
            y: self.y,
            height,
            hard_break,
        });
        self.y += height;
        self.start = next_start;
        self.global_start = next_global;
        self.width = 0.0;
        self.tallest = 0.0;
        self.chars = 0;
    }
}

/// Longest prefix of `chunk` whose measured width fits in `avail`.
/// The caller has already established that the whole chunk does not fit.
fn longest_fitting_prefix(
    chunk: &[char],
    avail: f32,
    format: &TextFormat,
    provider: &dyn FontMetricsProvider,
) -> usize {
    let mut lo = 0usize; // fits
    let mut hi = chunk.len(); // does not fit
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let prefix: String = chunk[..mid].iter().collect();
        if provider.measure(&prefix, format) <= avail {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

fn compute_layout(
    store: &SegmentStore,
    width: f32,
    options: &EditorOptions,
    provider: &dyn FontMetricsProvider,
) -> LayoutSnapshot {
    let spacing = options.line_spacing;
    let mut acc = LineAccumulator::new();
    let mut global = 0usize;

    for (seg_idx, seg) in store.segments().iter().enumerate() {
        let seg_height = provider.metrics(seg.format()).text_height();
        let chars = seg.chars();
        let mut offset = 0usize;
        loop {
            // Candidate bounded by the next explicit newline or segment end.
            let newline = chars[offset..]
                .iter()
                .position(|&c| c == '\n')
                .map(|p| offset + p);
            let chunk_end = newline.unwrap_or(chars.len());

            while offset < chunk_end {
                let avail = (width - acc.width).max(0.0);
                let chunk = &chars[offset..chunk_end];
                let chunk_str: String = chunk.iter().collect();
                let chunk_width = provider.measure(&chunk_str, seg.format());
                if chunk_width <= avail {
                    acc.extend(chunk_width, seg_height, chunk.len());
                    global += chunk.len();
                    offset = chunk_end;
                    break;
                }

                let fit = longest_fitting_prefix(chunk, avail, seg.format(), provider);
                let mut take = fit;
                if fit > 0 {
                    // Pull the break back to trailing whitespace when it's
                    // close enough to the fitted length.
                    if let Some(ws) = chunk[..fit].iter().rposition(|c| c.is_whitespace()) {
                        if ws as f32 >= WHITESPACE_BREAK_RATIO * fit as f32 {
                            take = ws + 1;
                        }
                    }
                }
                if take == 0 {
                    if acc.chars == 0 {
                        // Forward-progress floor: a line takes at least one
                        // code point no matter how narrow the viewport.
                        take = 1;
                    } else {
                        // The line already has content from earlier runs;
                        // wrap here and retry the chunk on a fresh line.
                        let pos = CursorPosition::new(seg_idx, offset);
                        acc.flush(pos, global, false, seg_height, spacing, pos, global);
                        continue;
                    }
                }
                let take_str: String = chunk[..take].iter().collect();
                let take_width = provider.measure(&take_str, seg.format());
                acc.extend(take_width, seg_height, take);
                global += take;
                offset += take;
                let pos = CursorPosition::new(seg_idx, offset);
                acc.flush(pos, global, false, seg_height, spacing, pos, global);
            }

            match newline {
                Some(nl) => {
                    // Hard break: the newline ends the line and belongs to
                    // no line's content.
                    let end_pos = CursorPosition::new(seg_idx, nl);
                    let next_pos = CursorPosition::new(seg_idx, nl + 1);
                    acc.flush(end_pos, global, true, seg_height, spacing, next_pos, global + 1);
                    global += 1;
                    offset = nl + 1;
                }
                None => break,
            }
        }
    }

    // Emit the trailing line when content is pending, when the document is
    // empty (the caret still needs a home), or after a trailing newline
    // (which yields an empty final line). A document whose last content was
    // already flushed by a soft wrap gets no extra empty line.
    let needs_final = acc.chars > 0
        || acc.lines.is_empty()
        || acc.lines.last().map(|l| l.hard_break).unwrap_or(false);
    if needs_final {
        let end = store.end();
        let fallback = provider
            .metrics(store.segment(acc.start.segment).format())
            .text_height();
        acc.flush(end, global, false, fallback, spacing, end, global);
    }

    let content_height = acc.y;
    LayoutSnapshot {
        lines: acc.lines,
        content_height,
    }
}
