//! # Row Decoding
//!
//! Turns the raw bytes of one row into a [`Record`]. A row is a reserved
//! prefix followed by every column's field, back to back, in declaration
//! order:
//!
//! ```text
//! [5 bytes]          reserved row prefix (not interpreted)
//! [column 0 length]  field 0
//! [column 1 length]  field 1
//! ...
//! ```
//!
//! ## Wire rules
//! - character / cicharacter: `length` bytes of text, padding trimmed
//! - logical: `length` bytes of flag text, see [`utils::decode_boolean`]
//! - double: 8-byte little-endian IEEE-754
//! - integer / autoinc: 4-byte little-endian signed / unsigned
//! - short: 2-byte little-endian unsigned
//! - date / time / timestamp: packed Julian day and milliseconds since
//!   midnight, see [`decode_datetime`]
//!
//! An invalid packed date is not an error: the field decodes to
//! [`Value::Null`] and the rest of the row is unaffected.

use byteorder::{ByteOrder, LittleEndian};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use encoding_rs::Encoding;
use log::{debug, trace};

use crate::adt::layout::Layout;
use crate::adt::types::column::{Column, ColumnType};
use crate::adt::types::error::{AdtError, Result};
use crate::adt::types::models::{Record, Value};
use crate::adt::utils;

/// Julian day number of 0000-12-31, the day before `NaiveDate`'s day 1 of the common era.
const JULIAN_DAY_BEFORE_CE: i32 = 1_721_425;
const MS_PER_SECOND: i32 = 1000;
/// Julian day number of 1582-10-15, the first day of the Gregorian calendar.
const GREGORIAN_REFORM: i32 = 2_299_161;

/// Decodes one row into a record.
///
/// # Errors
/// - [`AdtError::TruncatedRecord`] if `row` ends before every column is consumed
/// - [`AdtError::FieldTooShort`] / [`AdtError::UnsupportedType`] from a single field
pub fn decode(row: &[u8], columns: &[Column], layout: &Layout) -> Result<Record> {
    if row.len() < layout.row_prefix_size {
        return Err(AdtError::TruncatedRecord {
            column: "<row prefix>".to_string(),
            expected: layout.row_prefix_size,
            found: row.len(),
        });
    }

    let mut rest = &row[layout.row_prefix_size..];
    let mut record = Record::with_capacity(columns.len());

    for column in columns {
        let width = column.length();
        if rest.len() < width {
            return Err(AdtError::TruncatedRecord {
                column: column.name().to_string(),
                expected: width,
                found: rest.len(),
            });
        }
        let (field, tail) = rest.split_at(width);
        record.insert(column, decode_field(column, field, layout.encoding)?);
        rest = tail;
    }

    if !rest.is_empty() {
        trace!("{} trailing bytes after the last column ignored", rest.len());
    }
    Ok(record)
}

/// Decodes one field, routing date types through the packed date path.
pub fn decode_field(column: &Column, bytes: &[u8], encoding: &'static Encoding) -> Result<Value> {
    if column.column_type().is_packed_date() {
        decode_packed(column, bytes)
    } else {
        decode_fixed(column, bytes, encoding)
    }
}

/// Decodes a field with the generic fixed-width rule of its type.
///
/// # Errors
/// - [`AdtError::UnsupportedType`] for date, time, timestamp and unknown types,
///   which have no generic rule
/// - [`AdtError::FieldTooShort`] if the field is narrower than the type's wire width
pub fn decode_fixed(column: &Column, bytes: &[u8], encoding: &'static Encoding) -> Result<Value> {
    let column_type = column.column_type();
    if column_type.is_text() {
        return Ok(Value::Text(utils::decode_text(bytes, encoding)));
    }
    if column_type == ColumnType::Logical {
        let flag = utils::decode_text(bytes, encoding);
        return Ok(Value::Logical(utils::decode_boolean(&flag)));
    }

    let width = column_type.fixed_width().ok_or_else(|| unsupported(column))?;
    let bytes = take_width(column, bytes, width)?;

    let value = match column_type {
        ColumnType::Double => Value::Double(LittleEndian::read_f64(bytes)),
        ColumnType::Integer => Value::Integer(LittleEndian::read_i32(bytes)),
        ColumnType::AutoIncrement => Value::AutoIncrement(LittleEndian::read_u32(bytes)),
        ColumnType::Short => Value::Short(LittleEndian::read_u16(bytes)),
        _ => return Err(unsupported(column)),
    };
    Ok(value)
}

/// Decodes a date, time or timestamp field.
///
/// Eight or more bytes hold a Julian day and a millisecond count; a four-byte
/// date holds only the day and a four-byte time only the milliseconds.
fn decode_packed(column: &Column, bytes: &[u8]) -> Result<Value> {
    let column_type = column.column_type();
    let value = if bytes.len() >= 8 {
        let days = LittleEndian::read_i32(&bytes[0..4]);
        let ms = LittleEndian::read_i32(&bytes[4..8]);
        decode_datetime(days, ms).map(|dt| match column_type {
            ColumnType::Time => Value::Time(dt.time()),
            _ => Value::Timestamp(dt),
        })
    } else {
        match column_type {
            ColumnType::Date => {
                let days = LittleEndian::read_i32(take_width(column, bytes, 4)?);
                julian_day_to_date(days).map(Value::Date)
            }
            ColumnType::Time => {
                let ms = LittleEndian::read_i32(take_width(column, bytes, 4)?);
                time_from_millis(ms).map(Value::Time)
            }
            _ => return Err(too_short(column, bytes.len(), 8)),
        }
    };

    Ok(value.unwrap_or_else(|| {
        debug!(
            "Column '{}' holds an invalid packed date {:02x?}, decoded as null",
            column.name(),
            bytes
        );
        Value::Null
    }))
}

/// Builds a date-time from a Julian day number and milliseconds since midnight.
///
/// Returns `None` when the day has no calendar mapping or the time
/// components are out of range.
pub fn decode_datetime(days: i32, milliseconds: i32) -> Option<NaiveDateTime> {
    let date = julian_day_to_date(days)?;
    let time = time_from_millis(milliseconds)?;
    Some(date.and_time(time))
}

/// Maps a Julian day number onto a calendar date.
///
/// Days from 1582-10-15 on use the Gregorian calendar. Earlier days use the
/// Julian calendar, so JD 2299160 is 1582-10-04. A Julian leap day with no
/// Gregorian counterpart (e.g. 1500-02-29) has no mapping.
pub fn julian_day_to_date(days: i32) -> Option<NaiveDate> {
    if days >= GREGORIAN_REFORM {
        return NaiveDate::from_num_days_from_ce_opt(days - JULIAN_DAY_BEFORE_CE);
    }

    let c = i64::from(days) + 32_082;
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2).div_euclid(153);
    let day = e - (153 * m + 2).div_euclid(5) + 1;
    let month = m + 3 - 12 * m.div_euclid(10);
    let year = d - 4800 + m.div_euclid(10);

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// Splits milliseconds since midnight into a time of day, dropping sub-second precision.
pub fn time_from_millis(milliseconds: i32) -> Option<NaiveTime> {
    let seconds = milliseconds / MS_PER_SECOND;
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;
    NaiveTime::from_hms_opt(
        u32::try_from(hours).ok()?,
        u32::try_from(minutes).ok()?,
        u32::try_from(secs).ok()?,
    )
}

/// Encodes a value with the wire rule of `column`, producing exactly
/// `column.length()` bytes.
///
/// Text is space padded (and cut to the column width); numeric fields wider
/// than their wire width are zero filled. This is the inverse of
/// [`decode_field`] and exists for building fixtures; the reader never
/// writes files.
///
/// # Errors
/// [`AdtError::UnsupportedType`] if `value` does not fit the column's type, and
/// [`AdtError::FieldTooShort`] if the column is narrower than the wire width.
pub fn encode_field(column: &Column, value: &Value, encoding: &'static Encoding) -> Result<Vec<u8>> {
    let length = column.length();
    let column_type = column.column_type();

    if column_type.is_text() {
        let mut out = vec![b' '; length];
        if let Value::Text(text) = value {
            let (bytes, _, _) = encoding.encode(text);
            let n = bytes.len().min(length);
            out[..n].copy_from_slice(&bytes[..n]);
        } else if !value.is_null() {
            return Err(unsupported(column));
        }
        return Ok(out);
    }

    let mut out = vec![0u8; length];
    match (column_type, value) {
        (ColumnType::Logical, Value::Logical(b)) => {
            check_width(column, 1)?;
            out[0] = if *b { b'T' } else { b'F' };
        }
        (ColumnType::Double, Value::Double(v)) => {
            check_width(column, 8)?;
            LittleEndian::write_f64(&mut out[..8], *v);
        }
        (ColumnType::Integer, Value::Integer(v)) => {
            check_width(column, 4)?;
            LittleEndian::write_i32(&mut out[..4], *v);
        }
        (ColumnType::AutoIncrement, Value::AutoIncrement(v)) => {
            check_width(column, 4)?;
            LittleEndian::write_u32(&mut out[..4], *v);
        }
        (ColumnType::Short, Value::Short(v)) => {
            check_width(column, 2)?;
            LittleEndian::write_u16(&mut out[..2], *v);
        }
        (ColumnType::Date, Value::Date(d)) if length < 8 => {
            check_width(column, 4)?;
            LittleEndian::write_i32(&mut out[..4], date_to_julian_day(*d));
        }
        (ColumnType::Time, Value::Time(t)) if length < 8 => {
            check_width(column, 4)?;
            LittleEndian::write_i32(&mut out[..4], time_to_millis(*t));
        }
        (ColumnType::Date | ColumnType::Time | ColumnType::Timestamp, _) => {
            check_width(column, 8)?;
            let dt = match value {
                Value::Timestamp(dt) => *dt,
                Value::Date(d) => d.and_time(NaiveTime::MIN),
                _ => return Err(unsupported(column)),
            };
            LittleEndian::write_i32(&mut out[0..4], date_to_julian_day(dt.date()));
            LittleEndian::write_i32(&mut out[4..8], time_to_millis(dt.time()));
        }
        _ => return Err(unsupported(column)),
    }
    Ok(out)
}

fn date_to_julian_day(date: NaiveDate) -> i32 {
    let days = date.num_days_from_ce() + JULIAN_DAY_BEFORE_CE;
    if days >= GREGORIAN_REFORM {
        return days;
    }

    let a = (14 - date.month() as i32) / 12;
    let y = date.year() + 4800 - a;
    let m = date.month() as i32 + 12 * a - 3;
    date.day() as i32 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32_083
}

fn time_to_millis(time: NaiveTime) -> i32 {
    time.num_seconds_from_midnight() as i32 * MS_PER_SECOND
}

fn take_width<'a>(column: &Column, bytes: &'a [u8], width: usize) -> Result<&'a [u8]> {
    bytes
        .get(..width)
        .ok_or_else(|| too_short(column, bytes.len(), width))
}

fn check_width(column: &Column, width: usize) -> Result<()> {
    if column.length() < width {
        return Err(too_short(column, column.length(), width));
    }
    Ok(())
}

fn too_short(column: &Column, length: usize, width: usize) -> AdtError {
    AdtError::FieldTooShort {
        column: column.name().to_string(),
        length,
        width,
    }
}

fn unsupported(column: &Column) -> AdtError {
    AdtError::UnsupportedType {
        column: column.name().to_string(),
        type_name: column.column_type().to_string(),
    }
}
