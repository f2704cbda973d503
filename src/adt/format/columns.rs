//! Column descriptor table parsing.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::adt::layout::{Layout, MAX_PREALLOCATION};
use crate::adt::types::column::{Column, ColumnType};
use crate::adt::types::error::{AdtError, Result};
use crate::adt::types::models::TableHeader;

/// Parses the column descriptors that follow the header.
///
/// # Descriptor Structure
/// ```text
/// [128 bytes] column name (ASCII, space/NUL padded)
/// [1 byte]    reserved
/// [2 bytes]   type code    (little-endian u16)
/// [4 bytes]   reserved
/// [2 bytes]   field length (little-endian u16)
/// [63 bytes]  unused by the reader
/// ```
///
/// The header only bounds the number of slots; slots with a zero length are
/// skipped, so the returned list may be shorter than that bound.
///
/// # Errors
/// - [`AdtError::TruncatedColumns`] if a slot runs past the end of the source
/// - [`AdtError::InvalidColumnLength`] / [`AdtError::EmptyColumnName`] if a
///   non-empty slot does not describe a valid column
pub fn parse<R: Read + Seek>(
    source: &mut R,
    header: &TableHeader,
    layout: &Layout,
) -> Result<Vec<Column>> {
    let capacity = layout.column_capacity(header.data_offset);
    let mut columns = Vec::with_capacity(capacity.min(MAX_PREALLOCATION));
    let mut slot_bytes = vec![0u8; layout.descriptor_size];

    source.seek(SeekFrom::Start(layout.descriptor_offset(0)))?;
    for slot in 0..capacity {
        let offset = layout.descriptor_offset(slot);
        source.read_exact(&mut slot_bytes).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => AdtError::TruncatedColumns { slot, offset },
            _ => AdtError::Io(e),
        })?;

        match parse_descriptor(&slot_bytes, layout)? {
            Some(column) => {
                trace!(
                    "Slot {} at {}: '{}' {} ({} bytes)",
                    slot,
                    offset,
                    column.name(),
                    column.column_type(),
                    column.length()
                );
                columns.push(column);
            }
            None => trace!("Slot {} at {} has zero length, skipped", slot, offset),
        }
    }

    debug!(
        "Parsed {} columns from {} descriptor slots",
        columns.len(),
        capacity
    );
    Ok(columns)
}

/// Decodes one descriptor slot, returning `None` for an unused (zero-length) slot.
pub(crate) fn parse_descriptor(slot: &[u8], layout: &Layout) -> Result<Option<Column>> {
    let type_code = LittleEndian::read_u16(&slot[layout.type_offset..layout.type_offset + 2]);
    let length = LittleEndian::read_u16(&slot[layout.length_offset..layout.length_offset + 2]);

    if length == 0 {
        return Ok(None);
    }

    let column = Column::new(&slot[..layout.name_size], ColumnType::from(type_code), length)?;
    Ok(Some(column))
}
