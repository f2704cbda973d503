//! # adt-reader
//!
//! A read-only reader for ADT table files: a fixed 400-byte header, a table
//! of 200-byte column descriptors and a run of fixed-length rows.
//!
//! Rows are decoded on demand into [`Record`]s, with a small query surface on
//! top: iteration, index access and exact-equality filters.
//!
//! **Note:** Writing tables and `.adi` index files are not supported.
pub mod adt;

// Re-export the main types for convenience
pub use adt::{
    AdtError, Column, ColumnType, Criteria, Found, Layout, Record, RecordIterator, Result,
    Selector, Table, TableHeader, Value,
};
