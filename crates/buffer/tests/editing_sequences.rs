// Chunk: docs/chunks/edit_operations - End-to-end editing sequences over the buffer API

//! Integration tests exercising realistic editing sequences through the
//! public composer-buffer API, including the structural invariants that must
//! hold after any operation mix.

use composer_buffer::{CursorPosition, RichBuffer, SegmentStore, TextFormat};

fn assert_invariants(buffer: &RichBuffer) {
    let store = buffer.store();
    assert!(store.segment_count() >= 1, "store must never be empty");
    let sum: usize = store.segments().iter().map(|s| s.len()).sum();
    assert_eq!(
        sum,
        store.text().chars().count(),
        "segment length sum must equal document length"
    );
    let caret = buffer.caret();
    assert!(caret.segment < store.segment_count());
    assert!(caret.offset <= store.segment(caret.segment).len());
}

// ==================== Round trips ====================

#[test]
fn set_text_round_trips_plain_multiline_and_astral() {
    let mut buffer = RichBuffer::new();
    for s in [
        "",
        "one line",
        "first\nsecond\nthird",
        "café",
        "astral 𝄞🌍 mix\nsecond 𐍈 line",
    ] {
        buffer.set_text(s);
        assert_eq!(buffer.text(), s);
        assert_invariants(&buffer);
    }
}

// ==================== Typing sequences ====================

#[test]
fn typing_and_deleting_keeps_invariants() {
    let mut buffer = RichBuffer::new();
    buffer.insert_at_caret("The quick brown fox");
    buffer.set_caret(CursorPosition::new(0, 9));
    buffer.insert_at_caret(" very");
    assert_eq!(buffer.text(), "The quick very brown fox");

    for _ in 0..5 {
        buffer.delete_backward();
    }
    assert_eq!(buffer.text(), "The quick brown fox");
    assert_eq!(buffer.caret(), CursorPosition::new(0, 9));
    assert_invariants(&buffer);
}

#[test]
fn backspace_through_document_start_stops_cleanly() {
    let mut buffer = RichBuffer::from_text("ab");
    buffer.set_caret(CursorPosition::new(0, 2));
    for _ in 0..10 {
        buffer.delete_backward();
        assert_invariants(&buffer);
    }
    assert_eq!(buffer.text(), "");
    assert_eq!(buffer.caret(), CursorPosition::new(0, 0));
    assert_eq!(buffer.store().segment_count(), 1);
}

#[test]
fn astral_code_points_delete_as_single_units() {
    let mut buffer = RichBuffer::new();
    buffer.insert_at_caret("a🌍b");
    buffer.set_caret(CursorPosition::new(0, 2)); // after the emoji
    buffer.delete_backward();
    assert_eq!(buffer.text(), "ab");
    assert_eq!(buffer.caret(), CursorPosition::new(0, 1));
    assert_invariants(&buffer);
}

// ==================== Multi-segment scenarios ====================

fn three_segment_buffer() -> RichBuffer {
    // Build the canonical three-segment document through the wire format so
    // the segmentation is explicit rather than a side effect of editing.
    let records: Vec<_> = ["AAA", "BBB", "CCC"]
        .iter()
        .map(|text| {
            let seg_store = SegmentStore::from_text(text, TextFormat::default());
            composer_buffer::wire::encode(&seg_store).remove(0)
        })
        .collect();
    let store = composer_buffer::wire::decode(&records).expect("decode");
    RichBuffer::with_store(store)
}

#[test]
fn multi_segment_selection_delete_splices() {
    let mut buffer = three_segment_buffer();
    buffer.select_range(CursorPosition::new(0, 1), CursorPosition::new(2, 2));
    assert!(buffer.delete_selection());
    assert_eq!(buffer.text(), "AC");
    assert_eq!(buffer.store().segment_count(), 1);
    assert_eq!(buffer.caret(), CursorPosition::new(0, 1));
    assert_invariants(&buffer);
}

#[test]
fn backwards_selection_deletes_the_same_range() {
    let mut buffer = three_segment_buffer();
    // Anchor after focus: the ordering is computed, not stored.
    buffer.select_range(CursorPosition::new(2, 2), CursorPosition::new(0, 1));
    assert!(buffer.delete_selection());
    assert_eq!(buffer.text(), "AC");
    assert_eq!(buffer.caret(), CursorPosition::new(0, 1));
}

#[test]
fn boundary_backspace_merges_neighbors() {
    let records: Vec<_> = ["Hello", "World"]
        .iter()
        .map(|text| {
            let seg_store = SegmentStore::from_text(text, TextFormat::default());
            composer_buffer::wire::encode(&seg_store).remove(0)
        })
        .collect();
    let mut buffer = RichBuffer::with_store(composer_buffer::wire::decode(&records).unwrap());
    buffer.set_caret(CursorPosition::new(1, 0));
    buffer.delete_backward();
    assert_eq!(buffer.text(), "HelloWorld");
    assert_eq!(buffer.store().segment_count(), 1);
    assert_eq!(buffer.caret(), CursorPosition::new(0, 5));
    assert_invariants(&buffer);
}

#[test]
fn type_over_full_selection_leaves_single_segment() {
    let mut buffer = three_segment_buffer();
    buffer.select_all();
    buffer.delete_selection();
    buffer.insert_at_caret("X");
    assert_eq!(buffer.text(), "X");
    assert_eq!(buffer.store().segment_count(), 1);
    assert_invariants(&buffer);
}

// ==================== Long mixed sequences ====================

#[test]
fn long_mixed_edit_sequence_maintains_invariants() {
    let mut buffer = RichBuffer::new();
    for i in 0..100 {
        buffer.insert_at_caret("word ");
        if i % 3 == 0 {
            buffer.delete_backward();
        }
        if i % 7 == 0 {
            buffer.move_word_left(true);
            buffer.delete_selection();
        }
        if i % 11 == 0 {
            buffer.move_to_document_start(false);
            buffer.delete_forward();
            buffer.move_to_document_end(false);
        }
        assert_invariants(&buffer);
    }
    // After everything, the buffer is still a coherent single-segment store.
    assert_eq!(buffer.store().segment_count(), 1);
}
