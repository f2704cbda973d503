//! Fixed byte layout of an ADT table file.
//!
//! Every format constant used by the parsing stages lives in [`Layout`], which
//! is passed into each stage instead of being shared as global state.
//!
//! ```text
//! File Structure:
//! ┌──────────────────────┐ 0
//! │  Header (400 bytes)  │ ← header::parse()
//! ├──────────────────────┤ 400
//! │  Column descriptors  │ ← columns::parse()
//! │  (200 bytes each)    │
//! ├──────────────────────┤ data_offset
//! │  Rows                │ ← record::decode()
//! │  (record_length each)│
//! └──────────────────────┘
//! ```

use encoding_rs::{Encoding, WINDOWS_1252};

use super::types::models::TableHeader;

/// Upper bound on buffers sized from header values before any byte is read.
pub(crate) const MAX_PREALLOCATION: usize = 4096;

/// Offsets and sizes of every fixed field the reader touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Size of the file header in bytes.
    pub header_size: usize,
    /// Offset of the u32 record count inside the header.
    pub record_count_offset: usize,
    /// Offset of the u32 absolute start of row data.
    pub data_offset_offset: usize,
    /// Offset of the u32 row width.
    pub record_length_offset: usize,

    /// Size of one column descriptor slot.
    pub descriptor_size: usize,
    /// Width of the name field at the start of a descriptor.
    pub name_size: usize,
    /// Offset of the u16 type code inside a descriptor.
    pub type_offset: usize,
    /// Offset of the u16 field length inside a descriptor.
    pub length_offset: usize,

    /// Reserved bytes at the start of every row.
    pub row_prefix_size: usize,

    /// Encoding of character fields.
    pub encoding: &'static Encoding,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            header_size: 400,
            record_count_offset: 24,
            data_offset_offset: 32,
            record_length_offset: 36,
            descriptor_size: 200,
            name_size: 128,
            // name(128) + pad(1) + type(2) + pad(4) + length(2)
            type_offset: 129,
            length_offset: 135,
            row_prefix_size: 5,
            encoding: WINDOWS_1252,
        }
    }
}

impl Layout {
    /// Returns a copy of this layout decoding text with `encoding`.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Number of descriptor slots that fit between the header and `data_offset`.
    ///
    /// This is only an upper bound: trailing slots with a zero length are
    /// dropped by the column parser.
    pub fn column_capacity(&self, data_offset: u32) -> usize {
        (data_offset as usize).saturating_sub(self.header_size) / self.descriptor_size
    }

    /// Absolute offset of descriptor slot `slot`.
    pub fn descriptor_offset(&self, slot: usize) -> u64 {
        (self.header_size + slot * self.descriptor_size) as u64
    }

    /// Absolute offset of row `index`.
    pub fn record_offset(&self, header: &TableHeader, index: u32) -> u64 {
        header.data_offset as u64 + index as u64 * header.record_length as u64
    }
}
