//! Column descriptors and their logical types.

use std::fmt;

use super::error::{AdtError, Result};
use crate::adt::utils;

/// Logical type of a column, derived from the 16-bit type code of its descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Logical,
    Date,
    Character,
    Double,
    Integer,
    Short,
    Time,
    Timestamp,
    AutoIncrement,
    /// Character data compared case-insensitively by the database engine.
    CiCharacter,
    /// A type code this reader has no decoding rule for.
    Unknown(u16),
}

impl From<u16> for ColumnType {
    fn from(code: u16) -> Self {
        match code {
            1 => Self::Logical,
            3 => Self::Date,
            4 => Self::Character,
            10 => Self::Double,
            11 => Self::Integer,
            12 => Self::Short,
            13 => Self::Time,
            14 => Self::Timestamp,
            15 => Self::AutoIncrement,
            20 => Self::CiCharacter,
            other => Self::Unknown(other),
        }
    }
}

impl ColumnType {
    /// The type code as stored in the descriptor.
    pub fn code(&self) -> u16 {
        match self {
            Self::Logical => 1,
            Self::Date => 3,
            Self::Character => 4,
            Self::Double => 10,
            Self::Integer => 11,
            Self::Short => 12,
            Self::Time => 13,
            Self::Timestamp => 14,
            Self::AutoIncrement => 15,
            Self::CiCharacter => 20,
            Self::Unknown(code) => *code,
        }
    }

    /// Byte width of the generic fixed-width wire rule.
    ///
    /// `None` for text and logical flags (whose width is the column length),
    /// packed date types and unknown codes.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            Self::Double => Some(8),
            Self::Integer | Self::AutoIncrement => Some(4),
            Self::Short => Some(2),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Character | Self::CiCharacter)
    }

    /// Date, time and timestamp columns, which use the packed Julian-day format.
    pub fn is_packed_date(&self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical => write!(f, "logical"),
            Self::Date => write!(f, "date"),
            Self::Character => write!(f, "character"),
            Self::Double => write!(f, "double"),
            Self::Integer => write!(f, "integer"),
            Self::Short => write!(f, "short"),
            Self::Time => write!(f, "time"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::AutoIncrement => write!(f, "autoinc"),
            Self::CiCharacter => write!(f, "cicharacter"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// One column of a table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    underscored: String,
    column_type: ColumnType,
    length: u16,
}

impl Column {
    /// Builds a column from its raw name field, type and byte width.
    ///
    /// The name is normalized to printable ASCII (see [`utils::normalize_name`]).
    ///
    /// # Errors
    /// - [`AdtError::InvalidColumnLength`] if `length` is 0
    /// - [`AdtError::EmptyColumnName`] if nothing printable is left of the name
    pub fn new(name: impl AsRef<[u8]>, column_type: ColumnType, length: u16) -> Result<Self> {
        let name = utils::normalize_name(name.as_ref());

        if length == 0 {
            return Err(AdtError::InvalidColumnLength { name });
        }
        if name.is_empty() {
            return Err(AdtError::EmptyColumnName);
        }

        let underscored = utils::underscore(&name);
        Ok(Self {
            name,
            underscored,
            column_type,
            length,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower snake case alias of the name, used as the normalized attribute key.
    pub fn underscored_name(&self) -> &str {
        &self.underscored
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Byte width of the stored value.
    pub fn length(&self) -> usize {
        self.length as usize
    }

    /// Column type for a schema definition.
    pub fn schema_data_type(&self) -> String {
        match self.column_type {
            ColumnType::Double => ":float".to_string(),
            ColumnType::Integer | ColumnType::AutoIncrement | ColumnType::Short => {
                ":integer".to_string()
            }
            ColumnType::Date => ":date".to_string(),
            ColumnType::Time | ColumnType::Timestamp => ":timestamp".to_string(),
            ColumnType::Logical => ":boolean".to_string(),
            ColumnType::Character | ColumnType::CiCharacter | ColumnType::Unknown(_) => {
                format!(":string, :limit => {}", self.length)
            }
        }
    }

    /// One line of a schema definition: `"name", :type`.
    pub fn schema_definition(&self) -> String {
        format!("\"{}\", {}\n", self.underscored, self.schema_data_type())
    }
}
