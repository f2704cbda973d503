//! Core data structures for ADT table components.
//!
//! This module defines the fundamental types handed out by the reader:
//! - The parsed table header
//! - Decoded field values
//! - Fully materialized records

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

use super::column::Column;
use crate::adt::utils;

/// Fixed fields of the 400-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableHeader {
    /// Number of rows declared by the header.
    pub record_count: u32,
    /// Absolute byte offset of the first row.
    pub data_offset: u32,
    /// Byte width of one row, including its reserved prefix.
    pub record_length: u32,
}

/// A single decoded field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i32),
    AutoIncrement(u32),
    Double(f64),
    Short(u16),
    Logical(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Text(String),
    /// A field with no usable value, e.g. a packed date with no calendar mapping.
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view of the numeric variants.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v as i64),
            Value::AutoIncrement(v) => Some(*v as i64),
            Value::Short(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Logical(b) => Some(*b),
            _ => None,
        }
    }

    /// Equality that compares the integer variants by number, so a short
    /// `7` and an integer `7` are the same value. Every other pair must be
    /// the same variant holding equal data.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Date-time view of the packed date variants; a bare date is taken at midnight.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(dt) => Some(*dt),
            Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::AutoIncrement(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Short(v) => write!(f, "{}", v),
            Value::Logical(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::AutoIncrement(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Short(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Logical(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

/// One decoded row.
///
/// Every value is reachable under the column's raw name and under its
/// underscored alias. A record owns its data and holds no reference back to
/// the table it came from.
///
/// Columns whose names share an alias (`LastName` and `LAST_NAME`) share one
/// slot under that alias; the later column wins there and in [`Record::to_a`].
#[derive(Debug, Clone, Default)]
pub struct Record {
    attributes: HashMap<String, Value>,
    /// Underscored names in column declaration order.
    order: Vec<String>,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
    }
}

impl Record {
    pub(crate) fn with_capacity(columns: usize) -> Self {
        Self {
            attributes: HashMap::with_capacity(columns * 2),
            order: Vec::with_capacity(columns),
        }
    }

    pub(crate) fn insert(&mut self, column: &Column, value: Value) {
        let alias = column.underscored_name().to_string();
        if column.name() != alias {
            self.attributes.insert(column.name().to_string(), value.clone());
        }
        if self.attributes.insert(alias.clone(), value).is_some() {
            debug!(
                "Column '{}' replaces an earlier value under alias '{}'",
                column.name(),
                alias
            );
        }
        self.order.push(alias);
    }

    /// Looks up a value by raw column name or by its underscored alias.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .get(name)
            .or_else(|| self.attributes.get(&utils::underscore(name)))
    }

    /// The full attribute mapping, keyed by both name forms.
    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Values in column declaration order.
    pub fn to_a(&self) -> Vec<Value> {
        self.order
            .iter()
            .map(|name| self.attributes.get(name).cloned().unwrap_or(Value::Null))
            .collect()
    }
}
