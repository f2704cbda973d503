use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use log::{info, trace};

use super::format::{columns, header, record};
use super::iter::RecordIterator;
use super::layout::{Layout, MAX_PREALLOCATION};
use super::types::column::Column;
use super::types::error::{AdtError, Result};
use super::types::models::{Record, TableHeader};

/// A read-only ADT table.
///
/// The header and column descriptors are parsed once when the table is
/// opened; rows are read and decoded on demand, one seek and one read per
/// record, with no caching.
///
/// The table owns its byte source. It is released when the table is dropped
/// or explicitly [`closed`](Table::close).
#[derive(Debug)]
pub struct Table<R = File> {
    source: Mutex<R>,
    layout: Layout,
    header: TableHeader,
    columns: Vec<Column>,
    base_name: Option<String>,
}

impl Table<File> {
    /// Opens an ADT file and parses its header and column descriptors.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be opened
    /// - File is shorter than the header
    /// - A column descriptor is truncated or invalid
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_layout(path, Layout::default())
    }

    /// Like [`Table::open`], with an explicit layout (e.g. a different text encoding).
    pub fn open_with_layout(path: impl AsRef<Path>, layout: Layout) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening ADT table: {}", path.display());
        let file = File::open(path)?;

        let mut table = Self::with_layout(file, layout)?;
        table.base_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        Ok(table)
    }
}

impl<R: Read + Seek> Table<R> {
    /// Reads a table from any seekable byte source using the default layout.
    pub fn from_reader(source: R) -> Result<Self> {
        Self::with_layout(source, Layout::default())
    }

    /// Reads a table from any seekable byte source.
    pub fn with_layout(mut source: R, layout: Layout) -> Result<Self> {
        let (header, columns) = load(&mut source, &layout)?;
        Ok(Self {
            source: Mutex::new(source),
            layout,
            header,
            columns,
            base_name: None,
        })
    }

    /// Re-parses the header and column descriptors from the same source.
    ///
    /// The previous state is replaced only once both parse successfully.
    pub fn reload(&mut self) -> Result<()> {
        info!("Reloading ADT table");
        let source = self.source.get_mut().map_err(|_| AdtError::LockPoisoned)?;
        let (header, columns) = load(source, &self.layout)?;
        self.header = header;
        self.columns = columns;
        Ok(())
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    /// Number of rows declared by the header.
    pub fn record_count(&self) -> u32 {
        self.header.record_count
    }

    pub fn data_offset(&self) -> u32 {
        self.header.data_offset
    }

    pub fn record_length(&self) -> u32 {
        self.header.record_length
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Finds a column by its exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name() == name)
    }

    /// File stem of the path the table was opened from, for naming exports.
    pub fn base_name(&self) -> Option<&str> {
        self.base_name.as_deref()
    }

    /// Reads and decodes the record at `index`.
    ///
    /// # Errors
    /// - [`AdtError::RecordIndexOutOfBounds`] if `index >= record_count`
    /// - [`AdtError::IncompleteRow`] if the file ends inside the row
    /// - a decode error if the row does not match the column layout
    pub fn record(&self, index: u32) -> Result<Record> {
        let row = self.read_row(index)?;
        record::decode(&row, &self.columns, &self.layout)
    }

    /// Reads the raw `record_length` bytes of row `index`.
    pub fn read_row(&self, index: u32) -> Result<Vec<u8>> {
        if index >= self.header.record_count {
            return Err(AdtError::RecordIndexOutOfBounds {
                index,
                count: self.header.record_count,
            });
        }

        let offset = self.layout.record_offset(&self.header, index);
        let expected = self.header.record_length as usize;
        trace!("Reading row {} at offset {} ({} bytes)", index, offset, expected);

        let mut source = self.source.lock().map_err(|_| AdtError::LockPoisoned)?;
        source.seek(SeekFrom::Start(offset))?;
        let mut row = Vec::with_capacity(expected.min(MAX_PREALLOCATION));
        source.by_ref().take(expected as u64).read_to_end(&mut row)?;

        if row.len() < expected {
            return Err(AdtError::IncompleteRow {
                index,
                expected,
                found: row.len(),
            });
        }
        Ok(row)
    }

    /// Returns a lazy iterator over every row slot.
    ///
    /// Each item is `Ok(Some(record))` for a present row. `Ok(None)` marks a
    /// logically absent row; the format keeps room for it, but no row is
    /// currently reported absent.
    pub fn each(&self) -> RecordIterator<'_, R> {
        RecordIterator::new(self)
    }

    /// Collects every present record.
    pub fn to_a(&self) -> Result<Vec<Record>> {
        self.each().present().collect()
    }

    /// Releases the byte source.
    pub fn close(self) {
        info!("Closing ADT table");
        drop(self);
    }

    /// Releases the table and hands back its byte source.
    pub fn into_inner(self) -> Result<R> {
        self.source.into_inner().map_err(|_| AdtError::LockPoisoned)
    }
}

fn load<R: Read + Seek>(source: &mut R, layout: &Layout) -> Result<(TableHeader, Vec<Column>)> {
    let header = header::parse(source, layout)?;
    let columns = columns::parse(source, &header, layout)?;

    info!(
        "ADT table loaded: {} records of {} bytes, {} columns",
        header.record_count,
        header.record_length,
        columns.len()
    );
    Ok((header, columns))
}
