//! Core ADT table reader module

pub mod format;
pub mod iter;
pub mod layout;
pub mod query;
pub mod table;
pub mod types;
mod utils;

pub use iter::RecordIterator;
pub use layout::Layout;
pub use query::{Criteria, Found, Selector};
pub use table::Table;
pub use types::column::{Column, ColumnType};
pub use types::error::{AdtError, Result};
pub use types::models::{Record, TableHeader, Value};
pub use utils::{decode_boolean, parse_encoding, underscore};
