// Chunk: docs/chunks/wire_format - Persisted segment records

//! The wire/persisted form of a document, as exchanged with the host's
//! storage layer (storage itself lives outside this crate).
//!
//! A document is an ordered array of segment records; array order is reading
//! order and is significant. Each record is
//! `{ type: int, content: int32[], formatting: {...} }` where `content`
//! holds raw Unicode code points and `type` is 0 = Text, 1 = Image,
//! 2 = Embedded. The `color` field rides as a signed 32-bit ARGB value,
//! matching hosts whose integers are signed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::segment::Segment;
use crate::store::SegmentStore;
use crate::types::{Argb, SegmentKind, TextFormat};

/// Failures while decoding wire records into a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("unknown segment kind tag {tag} in segment {index}")]
    UnknownKind { index: usize, tag: u32 },
    #[error("invalid Unicode code point {value:#x} in segment {index}")]
    InvalidCodePoint { index: usize, value: u32 },
}

/// Formatting as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatRecord {
    #[serde(rename = "fontName")]
    pub font_name: String,
    #[serde(rename = "fontSize")]
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: i32,
}

/// One segment as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(rename = "type")]
    pub kind: u32,
    pub content: Vec<u32>,
    pub formatting: FormatRecord,
}

fn kind_tag(kind: SegmentKind) -> u32 {
    match kind {
        SegmentKind::Text => 0,
        SegmentKind::Image => 1,
        SegmentKind::Embedded => 2,
    }
}

/// Encodes a store into wire records, in reading order.
pub fn encode(store: &SegmentStore) -> Vec<SegmentRecord> {
    store
        .segments()
        .iter()
        .map(|seg| {
            let format = seg.format();
            SegmentRecord {
                kind: kind_tag(seg.kind()),
                content: seg.chars().iter().map(|&c| c as u32).collect(),
                formatting: FormatRecord {
                    font_name: format.font_family.clone(),
                    font_size: format.font_size,
                    bold: format.bold,
                    italic: format.italic,
                    color: format.color.0 as i32,
                },
            }
        })
        .collect()
}

/// Decodes wire records into a store. An empty record list becomes the
/// canonical empty document (one empty text segment).
pub fn decode(records: &[SegmentRecord]) -> Result<SegmentStore, WireError> {
    let mut segments = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let kind = match record.kind {
            0 => SegmentKind::Text,
            1 => SegmentKind::Image,
            2 => SegmentKind::Embedded,
            tag => return Err(WireError::UnknownKind { index, tag }),
        };
        let mut content = Vec::with_capacity(record.content.len());
        for &value in &record.content {
            match char::from_u32(value) {
                Some(c) => content.push(c),
                None => return Err(WireError::InvalidCodePoint { index, value }),
            }
        }
        let format = TextFormat {
            font_family: record.formatting.font_name.clone(),
            font_size: record.formatting.font_size,
            bold: record.formatting.bold,
            italic: record.formatting.italic,
            color: Argb(record.formatting.color as u32),
        };
        segments.push(Segment::from_parts(kind, content, format));
    }
    Ok(SegmentStore::from_segments(segments))
}
