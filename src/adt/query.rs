//! Equality filters over the records of a table.

use std::io::{Read, Seek};

use log::debug;

use super::table::Table;
use super::types::error::Result;
use super::types::models::{Record, Value};
use super::utils;

/// Which records a [`Table::find`] call looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A single record by index. Criteria are not applied.
    Index(u32),
    /// Several records by index, returned in the given order. Criteria are not applied.
    Indices(Vec<u32>),
    /// Every present record matching the criteria.
    All,
    /// The first present record matching the criteria.
    First,
}

/// Exact-equality conditions on record attributes.
///
/// Column names are compared in their underscored form, so `"LAST_NAME"`,
/// `"LastName"` and `"last_name"` all address the same attribute. An empty
/// criteria set matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    conditions: Vec<(String, Value)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the condition `name == value`.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((utils::underscore(name), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns `true` if every condition equals the record's attribute.
    ///
    /// Integer values match across widths (see [`Value::same_value`]).
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|(name, value)| {
            record
                .attributes()
                .get(name)
                .is_some_and(|attribute| attribute.same_value(value))
        })
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Criteria::new(), |criteria, (name, value)| {
                criteria.with(name.as_ref(), value)
            })
    }
}

/// The result of [`Table::find`], shaped by the selector that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    /// From [`Selector::Index`].
    Record(Record),
    /// From [`Selector::Indices`] and [`Selector::All`].
    Records(Vec<Record>),
    /// From [`Selector::First`].
    First(Option<Record>),
}

impl Found {
    /// Flattens any shape into a list of records.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Found::Record(record) => vec![record],
            Found::Records(records) => records,
            Found::First(record) => record.into_iter().collect(),
        }
    }
}

impl<R: Read + Seek> Table<R> {
    /// Looks up records by index or by exact attribute equality.
    ///
    /// # Errors
    /// Bounds errors for out-of-range indices, and any decode error hit while
    /// scanning, abort the whole call.
    pub fn find(&self, selector: Selector, criteria: &Criteria) -> Result<Found> {
        debug!("find {:?} where {:?}", selector, criteria);
        match selector {
            Selector::Index(index) => self.record(index).map(Found::Record),
            Selector::Indices(indices) => indices
                .into_iter()
                .map(|index| self.record(index))
                .collect::<Result<Vec<_>>>()
                .map(Found::Records),
            Selector::All => self.find_all(criteria).map(Found::Records),
            Selector::First => self.find_first(criteria).map(Found::First),
        }
    }

    /// Every present record matching `criteria`.
    pub fn find_all(&self, criteria: &Criteria) -> Result<Vec<Record>> {
        let mut found = Vec::new();
        self.find_each(criteria, |record| found.push(record))?;
        Ok(found)
    }

    /// Streams every present record matching `criteria` into `callback`
    /// without collecting them.
    pub fn find_each<F: FnMut(Record)>(&self, criteria: &Criteria, mut callback: F) -> Result<()> {
        for record in self.each().present() {
            let record = record?;
            if criteria.matches(&record) {
                callback(record);
            }
        }
        Ok(())
    }

    /// The first present record matching `criteria`, if any.
    pub fn find_first(&self, criteria: &Criteria) -> Result<Option<Record>> {
        for record in self.each().present() {
            let record = record?;
            if criteria.matches(&record) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}
