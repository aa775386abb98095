// Chunk: docs/chunks/segment_store - Segment: a contiguous run of uniformly formatted content

use crate::types::{SegmentKind, TextFormat};

/// A contiguous run of content sharing one kind and one format.
///
/// Content is stored as Unicode scalar values (`char`), so every offset used
/// by cursor and edit arithmetic is a code-point index — correct for
/// non-ASCII and astral characters without any encoding-aware bookkeeping.
///
/// Segments are owned exclusively by [`SegmentStore`](crate::SegmentStore)
/// and addressed by index; the mutating methods are crate-private so the
/// store's revision counter stays the single mutation choke point.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    kind: SegmentKind,
    content: Vec<char>,
    format: TextFormat,
}

impl Segment {
    /// Creates an empty text segment with the given format.
    pub fn text(format: TextFormat) -> Self {
        Self {
            kind: SegmentKind::Text,
            content: Vec::new(),
            format,
        }
    }

    /// Creates a text segment initialized with `content`.
    pub fn text_with(content: &str, format: TextFormat) -> Self {
        Self {
            kind: SegmentKind::Text,
            content: content.chars().collect(),
            format,
        }
    }

    /// Assembles a segment from decoded wire parts.
    pub(crate) fn from_parts(kind: SegmentKind, content: Vec<char>, format: TextFormat) -> Self {
        Self {
            kind,
            content,
            format,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    /// Length in code points.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The raw code points of this segment.
    pub fn chars(&self) -> &[char] {
        &self.content
    }

    /// The segment content as a `String`.
    pub fn content(&self) -> String {
        self.content.iter().collect()
    }

    /// Returns the content in `[start, end)` as a `String`, clamped to bounds.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.content.len());
        let start = start.min(end);
        self.content[start..end].iter().collect()
    }

    // ==================== Mutation (store-internal) ====================

    pub(crate) fn insert(&mut self, offset: usize, chars: &[char]) {
        let offset = offset.min(self.content.len());
        self.content.splice(offset..offset, chars.iter().copied());
    }

    pub(crate) fn remove_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.content.len());
        let start = start.min(end);
        self.content.drain(start..end);
    }

    /// Splits off and returns the content from `offset` to the end.
    pub(crate) fn split_off(&mut self, offset: usize) -> Vec<char> {
        let offset = offset.min(self.content.len());
        self.content.split_off(offset)
    }

    pub(crate) fn append(&mut self, chars: &[char]) {
        self.content.extend_from_slice(chars);
    }
}
