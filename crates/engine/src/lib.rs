// Chunk: docs/chunks/pixel_wrap_layout - Wrap-aware layout + viewport + rendering
// Chunk: docs/chunks/input_routing - Event routing into cursor moves and edits

//! composer: the text-buffer editing engine behind a multi-line rich-text
//! input widget.
//!
//! The engine owns segmented document storage (via [`composer_buffer`]),
//! the caret/selection model, wrap-aware line layout, viewport scrolling,
//! edit operations, virtualized rendering, and input routing. It draws no
//! pixels and opens no windows: the host supplies a [`FontMetricsProvider`]
//! for measurement, a [`DrawSurface`] for painting, and feeds in
//! [`composer_input`] events.
//!
//! Everything is single-threaded and synchronous. The engine owns no
//! timers; the caret blink phase is a pure function of an `Instant` the
//! host passes in.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use composer::{Composer, EditorOptions, FixedAdvanceMetrics};
//! use composer_input::KeyEvent;
//!
//! let mut widget = Composer::new(
//!     320.0,
//!     120.0,
//!     Box::new(FixedAdvanceMetrics::new(8.0, 12.0, 4.0)),
//!     EditorOptions::default(),
//!     Instant::now(),
//! );
//! widget.handle_key(&KeyEvent::char('h'), Instant::now());
//! widget.handle_key(&KeyEvent::char('i'), Instant::now());
//! assert_eq!(widget.text(), "hi");
//! ```
//!
//! # Data flow
//!
//! input event → [`Composer`] → cursor move or edit → store revision bump →
//! next render recomputes the line layout → virtualized draw of visible
//! lines.
//!
//! Layout is cached on `(store revision, viewport width, options
//! generation)` and rebuilt wholesale when any of them changes; there is no
//! "invalidate" call for callers to forget.

mod blink;
mod controller;
mod font;
mod layout;
mod options;
mod render;
mod viewport;

pub use blink::CaretBlink;
pub use controller::Composer;
pub use font::{FixedAdvanceMetrics, FontMetrics, FontMetricsProvider};
pub use layout::{LayoutSnapshot, Line, LineLayout, LineRun};
pub use options::EditorOptions;
pub use render::{DrawSurface, Rect};
pub use viewport::Viewport;

pub use composer_buffer::{
    wire, Argb, CursorPosition, RichBuffer, Segment, SegmentKind, SegmentStore, Selection,
    TextFormat,
};
