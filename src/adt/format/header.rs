//! ADT file header parsing.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, info, trace};

use crate::adt::layout::Layout;
use crate::adt::types::error::{AdtError, Result};
use crate::adt::types::models::TableHeader;

/// Parses the fixed header from the beginning of the file.
///
/// # Header Structure
/// ```text
/// [24 bytes]  unused by the reader
/// [4 bytes]   record count          (little-endian u32, offset 24)
/// [4 bytes]   reserved
/// [4 bytes]   data offset           (little-endian u32, offset 32)
/// [4 bytes]   record length         (little-endian u32, offset 36)
/// [360 bytes] unused by the reader
/// ```
///
/// # Errors
/// [`AdtError::TruncatedHeader`] if the source holds fewer than
/// `layout.header_size` bytes.
pub fn parse<R: Read + Seek>(source: &mut R, layout: &Layout) -> Result<TableHeader> {
    info!("Parsing ADT header");

    source.seek(SeekFrom::Start(0))?;
    let mut header_bytes = Vec::with_capacity(layout.header_size);
    source
        .by_ref()
        .take(layout.header_size as u64)
        .read_to_end(&mut header_bytes)?;

    if header_bytes.len() < layout.header_size {
        return Err(AdtError::TruncatedHeader {
            expected: layout.header_size,
            found: header_bytes.len(),
        });
    }

    let read_u32 = |offset: usize| LittleEndian::read_u32(&header_bytes[offset..offset + 4]);
    let header = TableHeader {
        record_count: read_u32(layout.record_count_offset),
        data_offset: read_u32(layout.data_offset_offset),
        record_length: read_u32(layout.record_length_offset),
    };
    trace!(
        "Header fields: record_count={}, data_offset={}, record_length={}",
        header.record_count, header.data_offset, header.record_length
    );

    debug!(
        "Header allows up to {} column descriptors",
        layout.column_capacity(header.data_offset)
    );

    Ok(header)
}
