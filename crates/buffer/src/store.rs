// Chunk: docs/chunks/segment_store - SegmentStore: ordered segment sequence with revision tracking

use crate::segment::Segment;
use crate::types::{CursorPosition, SegmentKind, TextFormat};

/// Ordered, mutable sequence of [`Segment`]s; owns all document content.
///
/// Invariants, maintained by every mutator:
/// - the store always holds at least one segment (an empty document is one
///   empty text segment, so there is always a caret home);
/// - the document length is the sum of segment lengths, all counted in code
///   points.
///
/// Every mutation funnels through [`touch`](Self::touch), which bumps the
/// `revision` counter. Derived state (line layout) keys its cache on the
/// revision, so "mutate without invalidating" is not expressible: there is
/// no separate invalidation call to forget.
///
/// Out-of-range positions handed to mutators are programmer errors: they
/// trip a `debug_assert!` in development builds and are clamped (with a
/// `log::warn!`) in release builds so a host application cannot crash here.
#[derive(Debug, Clone)]
pub struct SegmentStore {
    segments: Vec<Segment>,
    revision: u64,
    /// Mutation counter for sampling debug invariant checks (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl Default for SegmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentStore {
    /// Creates a store holding one empty text segment with default formatting.
    pub fn new() -> Self {
        Self::with_format(TextFormat::default())
    }

    /// Creates a store holding one empty text segment with the given format.
    pub fn with_format(format: TextFormat) -> Self {
        Self {
            segments: vec![Segment::text(format)],
            revision: 0,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    /// Creates a store holding `content` as a single text segment.
    pub fn from_text(content: &str, format: TextFormat) -> Self {
        Self {
            segments: vec![Segment::text_with(content, format)],
            revision: 0,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    /// Assembles a store from decoded segments. An empty list becomes the
    /// canonical empty document.
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        let segments = if segments.is_empty() {
            vec![Segment::text(TextFormat::default())]
        } else {
            segments
        };
        Self {
            segments,
            revision: 0,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    // ==================== Accessors ====================

    /// Monotonic counter bumped by every mutation. Derived caches compare
    /// against this instead of relying on explicit invalidation calls.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the segment at `index`, clamped to the last segment when out
    /// of range (the store is never empty).
    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[self.clamped_segment(index, "segment")]
    }

    /// Total document length in code points.
    pub fn char_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// The whole document as a `String`, segments joined in reading order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            out.extend(seg.chars().iter());
        }
        out
    }

    /// The first valid cursor position.
    pub fn start(&self) -> CursorPosition {
        CursorPosition::new(0, 0)
    }

    /// The last valid cursor position (after the final code point).
    pub fn end(&self) -> CursorPosition {
        let last = self.segments.len() - 1;
        CursorPosition::new(last, self.segments[last].len())
    }

    /// Global code-point offset of `pos` from the document start.
    pub fn global_offset(&self, pos: CursorPosition) -> usize {
        let pos = self.clamp(pos);
        let prior: usize = self.segments[..pos.segment].iter().map(Segment::len).sum();
        prior + pos.offset
    }

    /// Maps a global code-point offset back to a position.
    ///
    /// Boundary offsets resolve to the end of the earlier segment rather
    /// than the start of the later one, so text typed at a segment seam
    /// inherits the preceding run's formatting.
    pub fn position_at_global(&self, offset: usize) -> CursorPosition {
        let mut acc = 0usize;
        for (i, seg) in self.segments.iter().enumerate() {
            if offset <= acc + seg.len() {
                return CursorPosition::new(i, offset - acc);
            }
            acc += seg.len();
        }
        self.end()
    }

    /// Clamps a position to valid bounds.
    pub fn clamp(&self, pos: CursorPosition) -> CursorPosition {
        let segment = pos.segment.min(self.segments.len() - 1);
        let offset = pos.offset.min(self.segments[segment].len());
        CursorPosition::new(segment, offset)
    }

    // ==================== Mutation ====================

    /// Inserts `text` at `pos` and returns the position just after it.
    ///
    /// Insertion into a non-text segment places a new text run beside it
    /// (inheriting its format) instead of corrupting its content.
    pub fn insert_text(&mut self, pos: CursorPosition, text: &str) -> CursorPosition {
        debug_assert!(
            pos.segment < self.segments.len()
                && pos.offset <= self.segments[pos.segment.min(self.segments.len() - 1)].len(),
            "insert_text out of range: {pos:?}"
        );
        let pos = self.clamp_logged(pos, "insert_text");
        if text.is_empty() {
            return pos;
        }
        let chars: Vec<char> = text.chars().collect();
        let count = chars.len();
        let end = match self.segments[pos.segment].kind() {
            SegmentKind::Text => {
                self.segments[pos.segment].insert(pos.offset, &chars);
                CursorPosition::new(pos.segment, pos.offset + count)
            }
            SegmentKind::Image | SegmentKind::Embedded => {
                let format = self.segments[pos.segment].format().clone();
                let index = if pos.offset == 0 {
                    pos.segment
                } else {
                    pos.segment + 1
                };
                self.segments
                    .insert(index, Segment::from_parts(SegmentKind::Text, chars, format));
                CursorPosition::new(index, count)
            }
        };
        self.touch();
        end
    }

    /// Deletes code points `[start, end)` within one segment.
    pub fn delete_range(&mut self, segment: usize, start: usize, end: usize) {
        debug_assert!(
            segment < self.segments.len(),
            "delete_range segment out of range: {segment}"
        );
        let segment = self.clamped_segment(segment, "delete_range");
        let len = self.segments[segment].len();
        debug_assert!(start <= end && end <= len, "delete_range bad bounds");
        let end = end.min(len);
        let start = start.min(end);
        if start == end {
            return;
        }
        self.segments[segment].remove_range(start, end);
        self.touch();
    }

    /// Merges the next segment's content into `segment` and removes it.
    ///
    /// This is the single-delete path that reduces segment count; the merged
    /// content adopts `segment`'s format. Returns `false` (and does nothing)
    /// when there is no next segment or either side is non-text.
    pub fn merge_with_next(&mut self, segment: usize) -> bool {
        debug_assert!(
            segment < self.segments.len(),
            "merge_with_next out of range: {segment}"
        );
        let segment = self.clamped_segment(segment, "merge_with_next");
        if segment + 1 >= self.segments.len() {
            return false;
        }
        if self.segments[segment].kind() != SegmentKind::Text
            || self.segments[segment + 1].kind() != SegmentKind::Text
        {
            return false;
        }
        let next = self.segments.remove(segment + 1);
        self.segments[segment].append(next.chars());
        self.touch();
        true
    }

    /// Deletes everything between two positions spanning multiple segments.
    ///
    /// The start segment's tail is truncated, the end segment's unselected
    /// tail is appended onto it, and every segment strictly between the two
    /// (plus the end segment itself) is removed: an O(segments-between)
    /// splice. Returns the collapse position (the former start).
    pub fn splice(&mut self, start: CursorPosition, end: CursorPosition) -> CursorPosition {
        let start = self.clamp_logged(start, "splice");
        let end = self.clamp_logged(end, "splice");
        debug_assert!(start <= end, "splice endpoints out of order");
        if end <= start {
            return start;
        }
        if start.segment == end.segment {
            self.segments[start.segment].remove_range(start.offset, end.offset);
            self.touch();
            return start;
        }
        // Truncate the start segment's selected tail.
        self.segments[start.segment].split_off(start.offset);
        // Carry over the end segment's unselected tail.
        let tail = self.segments[end.segment].split_off(end.offset);
        self.segments[start.segment].append(&tail);
        // Drop everything in between, end segment included.
        self.segments.drain(start.segment + 1..=end.segment);
        self.touch();
        start
    }

    /// Replaces the whole document with `text` as a single default-formatted
    /// text segment.
    pub fn set_text(&mut self, text: &str) {
        let format = self.segments[0].format().clone();
        self.segments = vec![Segment::text_with(text, format)];
        self.touch();
    }

    // ==================== Internals ====================

    /// The single mutation choke point: bumps the revision so every derived
    /// cache goes stale, and samples the structural invariants in debug
    /// builds.
    fn touch(&mut self) {
        self.revision += 1;
        self.assert_store_consistent();
    }

    fn clamped_segment(&self, index: usize, op: &str) -> usize {
        if index >= self.segments.len() {
            log::warn!(
                "{op}: segment index {index} out of range ({} segments), clamping",
                self.segments.len()
            );
            self.segments.len() - 1
        } else {
            index
        }
    }

    fn clamp_logged(&self, pos: CursorPosition, op: &str) -> CursorPosition {
        let clamped = self.clamp(pos);
        if clamped != pos {
            log::warn!("{op}: position {pos:?} out of range, clamped to {clamped:?}");
        }
        clamped
    }

    /// Debug assertion: revalidates the structural invariants on every
    /// 64th mutation, so the O(n) sweep stays cheap in tight edit loops.
    /// Compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_store_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        assert!(
            !self.segments.is_empty(),
            "store invariant violated: zero segments after {} mutations",
            self.debug_mutation_count
        );
        let sum: usize = self.segments.iter().map(Segment::len).sum();
        let text_count = self.text().chars().count();
        assert_eq!(
            sum, text_count,
            "store invariant violated: segment length sum {sum} != document length {text_count}"
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_store_consistent(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_abc() -> SegmentStore {
        SegmentStore::from_segments(vec![
            Segment::text_with("AAA", TextFormat::default()),
            Segment::text_with("BBB", TextFormat::default()),
            Segment::text_with("CCC", TextFormat::default()),
        ])
    }

    // ==================== Construction ====================

    #[test]
    fn test_new_store_has_one_empty_segment() {
        let store = SegmentStore::new();
        assert_eq!(store.segment_count(), 1);
        assert_eq!(store.char_count(), 0);
        assert_eq!(store.text(), "");
    }

    #[test]
    fn test_from_segments_empty_list_normalizes() {
        let store = SegmentStore::from_segments(Vec::new());
        assert_eq!(store.segment_count(), 1);
        assert_eq!(store.char_count(), 0);
    }

    // ==================== Offsets ====================

    #[test]
    fn test_global_offset_round_trip() {
        let store = store_abc();
        for global in 0..=store.char_count() {
            let pos = store.position_at_global(global);
            assert_eq!(store.global_offset(pos), global);
        }
    }

    #[test]
    fn test_boundary_offset_prefers_earlier_segment() {
        let store = store_abc();
        // Offset 3 sits on the seam between segments 0 and 1.
        assert_eq!(store.position_at_global(3), CursorPosition::new(0, 3));
    }

    #[test]
    fn test_position_past_end_clamps() {
        let store = store_abc();
        assert_eq!(store.position_at_global(999), CursorPosition::new(2, 3));
        assert_eq!(
            store.clamp(CursorPosition::new(7, 7)),
            CursorPosition::new(2, 3)
        );
    }

    // ==================== insert_text ====================

    #[test]
    fn test_insert_advances_revision() {
        let mut store = SegmentStore::new();
        let before = store.revision();
        store.insert_text(CursorPosition::new(0, 0), "hi");
        assert!(store.revision() > before);
        assert_eq!(store.text(), "hi");
    }

    #[test]
    fn test_insert_mid_segment() {
        let mut store = store_abc();
        let end = store.insert_text(CursorPosition::new(1, 1), "xy");
        assert_eq!(store.text(), "AAABxyBBCCC");
        assert_eq!(end, CursorPosition::new(1, 3));
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let mut store = store_abc();
        let before = store.revision();
        store.insert_text(CursorPosition::new(0, 0), "");
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_insert_astral_counts_code_points() {
        let mut store = SegmentStore::new();
        let end = store.insert_text(CursorPosition::new(0, 0), "a🌍b");
        assert_eq!(end, CursorPosition::new(0, 3));
        assert_eq!(store.char_count(), 3);
    }

    // ==================== delete_range ====================

    #[test]
    fn test_delete_range_within_segment() {
        let mut store = store_abc();
        store.delete_range(1, 1, 3);
        assert_eq!(store.text(), "AAABCCC");
        assert_eq!(store.segment_count(), 3);
    }

    #[test]
    fn test_delete_range_empty_is_noop() {
        let mut store = store_abc();
        let before = store.revision();
        store.delete_range(1, 2, 2);
        assert_eq!(store.revision(), before);
    }

    // ==================== merge_with_next ====================

    #[test]
    fn test_merge_with_next() {
        let mut store = store_abc();
        assert!(store.merge_with_next(0));
        assert_eq!(store.segment_count(), 2);
        assert_eq!(store.segment(0).content(), "AAABBB");
        assert_eq!(store.text(), "AAABBBCCC");
    }

    #[test]
    fn test_merge_last_segment_fails() {
        let mut store = store_abc();
        assert!(!store.merge_with_next(2));
        assert_eq!(store.segment_count(), 3);
    }

    // ==================== splice ====================

    #[test]
    fn test_splice_across_segments() {
        let mut store = store_abc();
        let pos = store.splice(CursorPosition::new(0, 1), CursorPosition::new(2, 2));
        assert_eq!(store.text(), "AC");
        assert_eq!(store.segment_count(), 1);
        assert_eq!(pos, CursorPosition::new(0, 1));
    }

    #[test]
    fn test_splice_single_segment() {
        let mut store = store_abc();
        store.splice(CursorPosition::new(1, 0), CursorPosition::new(1, 2));
        assert_eq!(store.text(), "AAABCCC");
        assert_eq!(store.segment_count(), 3);
    }

    #[test]
    fn test_splice_entire_document_keeps_one_segment() {
        let mut store = store_abc();
        store.splice(store.start(), store.end());
        assert_eq!(store.segment_count(), 1);
        assert_eq!(store.text(), "");
    }

    // ==================== set_text ====================

    #[test]
    fn test_set_text_round_trip() {
        let mut store = SegmentStore::new();
        for s in ["", "hello", "line1\nline2\n", "héllo 🌍𝄞"] {
            store.set_text(s);
            assert_eq!(store.text(), s);
            assert_eq!(store.char_count(), s.chars().count());
            assert_eq!(store.segment_count(), 1);
        }
    }

    // ==================== Invariants ====================

    #[test]
    fn test_invariants_after_mixed_operations() {
        let mut store = store_abc();
        store.insert_text(CursorPosition::new(0, 2), "xx");
        store.delete_range(0, 0, 1);
        store.merge_with_next(0);
        store.splice(CursorPosition::new(0, 1), store.end());
        assert!(store.segment_count() >= 1);
        let sum: usize = store.segments().iter().map(|s| s.len()).sum();
        assert_eq!(sum, store.text().chars().count());
    }
}
