// Chunk: docs/chunks/segment_store - Segmented rich-text document storage

//! composer-buffer: segmented rich-text document storage for the composer
//! input widget.
//!
//! A document is an ordered sequence of [`Segment`]s, each a contiguous run
//! of content sharing one kind and one format. All addressing is in Unicode
//! code points — never encoded code units — so cursor and edit arithmetic is
//! correct for non-ASCII and astral characters.
//!
//! # Overview
//!
//! - [`SegmentStore`] owns the segments and is the only mutation surface.
//!   Every mutator bumps a revision counter, which downstream layout caches
//!   key on: mutating and invalidating are one atomic step.
//! - [`RichBuffer`] pairs a store with a caret and an anchor–focus
//!   selection, and provides the edit operations (insert, single-code-point
//!   deletes with boundary merging, selection splice).
//! - [`wire`] is the persisted record format exchanged with the host.
//!
//! # Example
//!
//! ```
//! use composer_buffer::{CursorPosition, RichBuffer};
//!
//! let mut buffer = RichBuffer::new();
//! buffer.insert_at_caret("Hello");
//! assert_eq!(buffer.text(), "Hello");
//! assert_eq!(buffer.caret(), CursorPosition::new(0, 5));
//!
//! buffer.select_all();
//! buffer.delete_selection();
//! assert_eq!(buffer.text(), "");
//! // The empty document still holds exactly one (empty) segment.
//! assert_eq!(buffer.store().segment_count(), 1);
//! ```

mod buffer;
mod segment;
mod store;
mod types;
pub mod wire;

pub use buffer::RichBuffer;
pub use segment::Segment;
pub use store::SegmentStore;
pub use types::{Argb, CursorPosition, SegmentKind, Selection, TextFormat};
