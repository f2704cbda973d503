//! Sequential access to the rows of a table.
//!
//! # Example
//! ```no_run
//! # use adt_reader::Table;
//! # let table = Table::open("customers.adt").unwrap();
//! for result in table.each() {
//!     if let Some(record) = result.unwrap() {
//!         println!("{:?}", record.to_a());
//!     }
//! }
//! ```

use std::io::{Read, Seek};

use super::table::Table;
use super::types::error::Result;
use super::types::models::Record;

/// Iterator over every row slot of a [`Table`].
///
/// Yields `Result<Option<Record>>`: `None` is reserved for logically absent
/// rows. Each step performs its own seek, read and decode, so a failing row
/// does not end the iteration.
///
/// Created by [`Table::each()`](crate::Table::each). Call `each()` again (or
/// clone the iterator) to start over.
pub struct RecordIterator<'a, R> {
    table: &'a Table<R>,
    index: u32,
    end: u32,
}

impl<'a, R: Read + Seek> RecordIterator<'a, R> {
    pub(super) fn new(table: &'a Table<R>) -> Self {
        Self {
            table,
            index: 0,
            end: table.record_count(),
        }
    }

    /// Skips absent rows, yielding only decoded records.
    pub fn present(self) -> impl Iterator<Item = Result<Record>> + 'a {
        self.filter_map(Result::transpose)
    }
}

impl<R> Clone for RecordIterator<'_, R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            index: self.index,
            end: self.end,
        }
    }
}

impl<R: Read + Seek> Iterator for RecordIterator<'_, R> {
    type Item = Result<Option<Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            return None;
        }
        let index = self.index;
        self.index += 1;
        Some(self.table.record(index).map(Some))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Read + Seek> ExactSizeIterator for RecordIterator<'_, R> {}
