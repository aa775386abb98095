// Chunk: docs/chunks/edit_operations - Caret, selection, and edit operations over the store
// Chunk: docs/chunks/word_selection - Word-wise movement and double-click word lookup

use unicode_segmentation::UnicodeSegmentation;

use crate::store::SegmentStore;
use crate::types::{CursorPosition, Selection};

/// A segment store paired with a caret and an optional selection anchor.
///
/// This is the editing surface: all edit operations leave the caret at the
/// edit point, and every mutation goes through the store's revision-counted
/// write path, so layout can never observe a stale document.
///
/// The selection follows the anchor–focus model: the anchor is pinned where
/// the selection started, the caret is the focus. The anchor may sit before
/// or after the caret; document order is computed on demand.
#[derive(Debug, Clone)]
pub struct RichBuffer {
    store: SegmentStore,
    caret: CursorPosition,
    selection_anchor: Option<CursorPosition>,
}

impl Default for RichBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RichBuffer {
    /// Creates an empty buffer: one empty text segment, caret at the start.
    pub fn new() -> Self {
        Self {
            store: SegmentStore::new(),
            caret: CursorPosition::default(),
            selection_anchor: None,
        }
    }

    /// Creates a buffer over an existing store, caret at the start.
    pub fn with_store(store: SegmentStore) -> Self {
        Self {
            store,
            caret: CursorPosition::default(),
            selection_anchor: None,
        }
    }

    /// Creates a buffer containing `text`, caret at the end.
    pub fn from_text(text: &str) -> Self {
        let store = SegmentStore::from_text(text, Default::default());
        let caret = store.end();
        Self {
            store,
            caret,
            selection_anchor: None,
        }
    }

    // ==================== Accessors ====================

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn caret(&self) -> CursorPosition {
        self.caret
    }

    pub fn text(&self) -> String {
        self.store.text()
    }

    pub fn char_count(&self) -> usize {
        self.store.char_count()
    }

    /// Replaces the whole document; the caret moves to the end and any
    /// selection is dropped.
    pub fn set_text(&mut self, text: &str) {
        self.store.set_text(text);
        self.caret = self.store.end();
        self.selection_anchor = None;
    }

    // ==================== Selection ====================

    /// The active selection, or `None` when the anchor is unset or coincides
    /// with the caret.
    pub fn selection(&self) -> Option<Selection> {
        let anchor = self.selection_anchor?;
        if anchor == self.caret {
            return None;
        }
        Some(Selection::new(anchor, self.caret))
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// The selection endpoints in document order, if a selection is active.
    pub fn selection_range(&self) -> Option<(CursorPosition, CursorPosition)> {
        self.selection().map(|sel| (sel.start(), sel.end()))
    }

    /// The selected text, if a selection is active.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        let start = self.store.global_offset(start);
        let end = self.store.global_offset(end);
        Some(self.store.text().chars().skip(start).take(end - start).collect())
    }

    pub fn clear_selection(&mut self) {
        self.selection_anchor = None;
    }

    /// Selects the whole document; the caret lands at the end.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(self.store.start());
        self.caret = self.store.end();
    }

    /// Selects `[anchor, focus]` explicitly; the caret becomes the focus.
    pub fn select_range(&mut self, anchor: CursorPosition, focus: CursorPosition) {
        self.selection_anchor = Some(self.store.clamp(anchor));
        self.caret = self.store.clamp(focus);
    }

    // ==================== Caret placement ====================

    /// Places the caret, dropping any selection.
    pub fn set_caret(&mut self, pos: CursorPosition) {
        self.caret = self.store.clamp(pos);
        self.selection_anchor = None;
    }

    /// Pins the selection anchor at the caret. Pointer press uses this so a
    /// following drag extends from the press point.
    pub fn begin_selection_at_caret(&mut self) {
        self.selection_anchor = Some(self.caret);
    }

    /// Moves the focus endpoint only, pinning the anchor first if no
    /// selection exists. Used by shift-modified movement.
    pub fn set_caret_extending(&mut self, pos: CursorPosition) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.caret);
        }
        self.caret = self.store.clamp(pos);
    }

    /// Moves the caret without touching the anchor. Used mid-drag, where the
    /// anchor was pinned on pointer press.
    pub fn set_caret_preserving_selection(&mut self, pos: CursorPosition) {
        self.caret = self.store.clamp(pos);
    }

    // ==================== Movement ====================

    /// Moves one code point left, crossing segment boundaries.
    pub fn move_left(&mut self, extend: bool) {
        self.prepare_move(extend);
        let global = self.store.global_offset(self.caret);
        if global > 0 {
            self.caret = self.store.position_at_global(global - 1);
        }
    }

    /// Moves one code point right, crossing segment boundaries.
    pub fn move_right(&mut self, extend: bool) {
        self.prepare_move(extend);
        let global = self.store.global_offset(self.caret);
        if global < self.store.char_count() {
            self.caret = self.store.position_at_global(global + 1);
        }
    }

    pub fn move_to_document_start(&mut self, extend: bool) {
        self.prepare_move(extend);
        self.caret = self.store.start();
    }

    pub fn move_to_document_end(&mut self, extend: bool) {
        self.prepare_move(extend);
        self.caret = self.store.end();
    }

    /// Moves to the start of the word before the caret.
    pub fn move_word_left(&mut self, extend: bool) {
        self.prepare_move(extend);
        let global = self.store.global_offset(self.caret);
        let target = self
            .word_spans()
            .into_iter()
            .filter(|&(start, _, is_word)| is_word && start < global)
            .map(|(start, _, _)| start)
            .next_back()
            .unwrap_or(0);
        self.caret = self.store.position_at_global(target);
    }

    /// Moves to the end of the word after the caret.
    pub fn move_word_right(&mut self, extend: bool) {
        self.prepare_move(extend);
        let global = self.store.global_offset(self.caret);
        let target = self
            .word_spans()
            .into_iter()
            .find(|&(_, end, is_word)| is_word && end > global)
            .map(|(_, end, _)| end)
            .unwrap_or_else(|| self.store.char_count());
        self.caret = self.store.position_at_global(target);
    }

    /// The word-bound span containing `pos`, for double-click selection.
    /// On whitespace or punctuation this is the run between words.
    pub fn word_at(&self, pos: CursorPosition) -> (CursorPosition, CursorPosition) {
        let global = self.store.global_offset(self.store.clamp(pos));
        let spans = self.word_spans();
        let span = spans
            .iter()
            .find(|&&(start, end, _)| start <= global && global < end)
            .or_else(|| spans.last())
            .copied();
        match span {
            Some((start, end, _)) => (
                self.store.position_at_global(start),
                self.store.position_at_global(end),
            ),
            None => (self.store.start(), self.store.start()),
        }
    }

    fn prepare_move(&mut self, extend: bool) {
        if extend {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.caret);
            }
        } else {
            self.selection_anchor = None;
        }
    }

    /// Word-bound spans over the whole document as
    /// `(char_start, char_end, is_word)` triples.
    fn word_spans(&self) -> Vec<(usize, usize, bool)> {
        let text = self.store.text();
        let mut spans = Vec::new();
        let mut offset = 0usize;
        for piece in text.split_word_bounds() {
            let len = piece.chars().count();
            let is_word = piece.chars().any(char::is_alphanumeric);
            spans.push((offset, offset + len, is_word));
            offset += len;
        }
        spans
    }

    // ==================== Edit operations ====================

    /// Inserts `text` at the caret and advances the caret past it.
    pub fn insert_at_caret(&mut self, text: &str) {
        self.selection_anchor = None;
        self.caret = self.store.insert_text(self.caret, text);
    }

    /// Deletes the single code point before the caret.
    ///
    /// At a segment boundary this merges the current segment's content into
    /// the previous one and removes the emptied neighbor instead — the
    /// boundary itself is what gets consumed.
    pub fn delete_backward(&mut self) {
        self.selection_anchor = None;
        let caret = self.store.clamp(self.caret);
        if caret.offset > 0 {
            self.store
                .delete_range(caret.segment, caret.offset - 1, caret.offset);
            self.caret = CursorPosition::new(caret.segment, caret.offset - 1);
        } else if caret.segment > 0 {
            let prev_len = self.store.segment(caret.segment - 1).len();
            if self.store.merge_with_next(caret.segment - 1) {
                self.caret = CursorPosition::new(caret.segment - 1, prev_len);
            }
        }
        // At the document start: nothing to delete.
    }

    /// Deletes the single code point after the caret, merging across a
    /// segment boundary like [`delete_backward`](Self::delete_backward).
    pub fn delete_forward(&mut self) {
        self.selection_anchor = None;
        let caret = self.store.clamp(self.caret);
        let len = self.store.segment(caret.segment).len();
        if caret.offset < len {
            self.store
                .delete_range(caret.segment, caret.offset, caret.offset + 1);
        } else if caret.segment + 1 < self.store.segment_count() {
            self.store.merge_with_next(caret.segment);
        }
        self.caret = caret;
    }

    /// Deletes the selected range and collapses the caret to its start.
    ///
    /// Returns `false` when no selection is active.
    pub fn delete_selection(&mut self) -> bool {
        let (start, end) = match self.selection_range() {
            Some(range) => range,
            None => return false,
        };
        self.caret = self.store.splice(start, end);
        self.selection_anchor = None;
        true
    }
}
