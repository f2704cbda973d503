//! Builds ADT images in memory for the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use adt_reader::adt::format::record::encode_field;
use adt_reader::{Column, ColumnType, Table, Value};
use byteorder::{ByteOrder, LittleEndian};
use chrono::NaiveDate;
use encoding_rs::WINDOWS_1252;
use tempfile::NamedTempFile;

pub const HEADER_SIZE: usize = 400;
pub const DESCRIPTOR_SIZE: usize = 200;
pub const ROW_PREFIX: [u8; 5] = [0x04, 0x00, 0x00, 0x00, 0x00];

pub const LOGICAL: u16 = 1;
pub const DATE: u16 = 3;
pub const CHARACTER: u16 = 4;
pub const DOUBLE: u16 = 10;
pub const INTEGER: u16 = 11;
pub const SHORT: u16 = 12;
pub const TIME: u16 = 13;
pub const TIMESTAMP: u16 = 14;
pub const AUTOINC: u16 = 15;
pub const CICHARACTER: u16 = 20;

struct Descriptor {
    name: Vec<u8>,
    type_code: u16,
    length: u16,
}

#[derive(Default)]
pub struct AdtBuilder {
    descriptors: Vec<Descriptor>,
    empty_slots: usize,
    rows: Vec<Vec<u8>>,
    record_count: Option<u32>,
}

impl AdtBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(self, name: &str, type_code: u16, length: u16) -> Self {
        self.raw_column(name.as_bytes(), type_code, length)
    }

    pub fn raw_column(mut self, name: &[u8], type_code: u16, length: u16) -> Self {
        self.descriptors.push(Descriptor {
            name: name.to_vec(),
            type_code,
            length,
        });
        self
    }

    /// Trailing descriptor slots with a zero length.
    pub fn empty_slots(mut self, n: usize) -> Self {
        self.empty_slots = n;
        self
    }

    /// Overrides the record count written to the header.
    pub fn record_count(mut self, n: u32) -> Self {
        self.record_count = Some(n);
        self
    }

    pub fn row(mut self, values: Vec<Value>) -> Self {
        let columns = self.columns();
        assert_eq!(values.len(), columns.len(), "one value per column");

        let mut row = ROW_PREFIX.to_vec();
        for (column, value) in columns.iter().zip(&values) {
            row.extend(encode_field(column, value, WINDOWS_1252).expect("encodable value"));
        }
        self.rows.push(row);
        self
    }

    /// Overwrites the bytes of one field in an already added row.
    pub fn patch(mut self, row: usize, column: usize, bytes: &[u8]) -> Self {
        let offset = self.field_offset(column);
        self.rows[row][offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn columns(&self) -> Vec<Column> {
        self.descriptors
            .iter()
            .filter(|d| d.length > 0)
            .map(|d| Column::new(&d.name, ColumnType::from(d.type_code), d.length).expect("valid column"))
            .collect()
    }

    pub fn field_offset(&self, column: usize) -> usize {
        ROW_PREFIX.len()
            + self
                .descriptors
                .iter()
                .take(column)
                .map(|d| d.length as usize)
                .sum::<usize>()
    }

    pub fn record_length(&self) -> usize {
        ROW_PREFIX.len() + self.descriptors.iter().map(|d| d.length as usize).sum::<usize>()
    }

    pub fn data_offset(&self) -> usize {
        HEADER_SIZE + (self.descriptors.len() + self.empty_slots) * DESCRIPTOR_SIZE
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_SIZE];
        let record_count = self.record_count.unwrap_or(self.rows.len() as u32);
        LittleEndian::write_u32(&mut out[24..28], record_count);
        LittleEndian::write_u32(&mut out[32..36], self.data_offset() as u32);
        LittleEndian::write_u32(&mut out[36..40], self.record_length() as u32);

        for descriptor in &self.descriptors {
            let mut slot = vec![0u8; DESCRIPTOR_SIZE];
            let n = descriptor.name.len().min(128);
            slot[..n].copy_from_slice(&descriptor.name[..n]);
            LittleEndian::write_u16(&mut slot[129..131], descriptor.type_code);
            LittleEndian::write_u16(&mut slot[135..137], descriptor.length);
            out.extend(slot);
        }
        out.extend(vec![0u8; self.empty_slots * DESCRIPTOR_SIZE]);

        for row in &self.rows {
            out.extend(row);
        }
        out
    }

    pub fn open(&self) -> Table<Cursor<Vec<u8>>> {
        Table::from_reader(Cursor::new(self.build())).expect("open fixture")
    }

    pub fn write_temp(&self) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("customers")
            .suffix(".adt")
            .tempfile()
            .expect("create temp file");
        file.write_all(&self.build()).expect("write fixture");
        file.flush().expect("flush fixture");
        file
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Value {
    Value::Timestamp(date(y, m, d).and_hms_opt(h, min, s).unwrap())
}

/// Index of the `Birthday` column in [`customers`].
pub const BIRTHDAY: usize = 7;

/// A small customer table exercising every supported column type, with two
/// unused descriptor slots after the last column.
pub fn customers() -> AdtBuilder {
    AdtBuilder::new()
        .column("ID", AUTOINC, 4)
        .column("FIRST_NAME", CHARACTER, 20)
        .column("LastName", CICHARACTER, 20)
        .column("Balance", DOUBLE, 8)
        .column("Visits", INTEGER, 4)
        .column("Rank", SHORT, 2)
        .column("Active", LOGICAL, 1)
        .column("Birthday", DATE, 4)
        .column("Created", TIMESTAMP, 8)
        .empty_slots(2)
        .row(vec![
            Value::AutoIncrement(1),
            "Jean".into(),
            "Gray".into(),
            Value::Double(125.5),
            Value::Integer(3),
            Value::Short(7),
            Value::Logical(true),
            Value::Date(date(1987, 6, 14)),
            timestamp(2000, 1, 1, 0, 0, 0),
        ])
        .row(vec![
            Value::AutoIncrement(2),
            "Scott".into(),
            "Summers".into(),
            Value::Double(-20.25),
            Value::Integer(-12),
            Value::Short(2),
            Value::Logical(false),
            Value::Date(date(1985, 3, 2)),
            timestamp(2010, 5, 6, 7, 8, 9),
        ])
        .row(vec![
            Value::AutoIncrement(3),
            "Ororo".into(),
            "Munroe".into(),
            Value::Double(0.0),
            Value::Integer(0),
            Value::Short(1),
            Value::Logical(true),
            Value::Date(date(1990, 1, 1)),
            timestamp(2001, 2, 3, 4, 5, 6),
        ])
}
