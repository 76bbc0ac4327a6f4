//! SQL value types for database-agnostic data exchange.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Declared type of a [`DataFrame`](crate::DataFrame) column.
///
/// Drives the fixed type-mapping table used by `create_table` (see
/// [`crate::dialect`]) and validation of the values stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Character data (`VARCHAR(255)`).
    Text,
    /// 64-bit signed integer (`INT`).
    Integer,
    /// Floating point (`DECIMAL` in the fixed MySQL map).
    Real,
    /// Exact decimal.
    Decimal,
    /// Boolean.
    Bool,
    /// Date without time component.
    Date,
    /// Timestamp without timezone.
    DateTime,
    /// Raw binary data. Deliberately absent from the DDL type maps.
    Bytes,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Decimal => "decimal",
            ColumnType::Bool => "bool",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// A single value in a [`DataFrame`](crate::DataFrame) cell or a bound
/// statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Real(f64),
    /// Exact decimal.
    Decimal(Decimal),
    /// Text data.
    Text(String),
    /// Date without time component.
    Date(NaiveDate),
    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
    /// Binary data.
    Bytes(Vec<u8>),
}

impl SqlValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// The [`ColumnType`] this value belongs to, or `None` for NULL.
    #[must_use]
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            SqlValue::Null => None,
            SqlValue::Bool(_) => Some(ColumnType::Bool),
            SqlValue::Int(_) => Some(ColumnType::Integer),
            SqlValue::Real(_) => Some(ColumnType::Real),
            SqlValue::Decimal(_) => Some(ColumnType::Decimal),
            SqlValue::Text(_) => Some(ColumnType::Text),
            SqlValue::Date(_) => Some(ColumnType::Date),
            SqlValue::DateTime(_) => Some(ColumnType::DateTime),
            SqlValue::Bytes(_) => Some(ColumnType::Bytes),
        }
    }

    /// Parse a textual engine value into the value shape declared for its
    /// column. Unparseable input degrades to NULL for typed columns and to
    /// text otherwise.
    #[must_use]
    pub fn parse_typed(text: Option<String>, ty: ColumnType) -> SqlValue {
        let Some(s) = text else {
            return SqlValue::Null;
        };

        match ty {
            ColumnType::Bool => match s.as_str() {
                "1" | "true" | "True" | "TRUE" => SqlValue::Bool(true),
                "0" | "false" | "False" | "FALSE" => SqlValue::Bool(false),
                _ => SqlValue::Null,
            },
            ColumnType::Integer => s.parse::<i64>().map(SqlValue::Int).unwrap_or(SqlValue::Null),
            ColumnType::Real => s.parse::<f64>().map(SqlValue::Real).unwrap_or(SqlValue::Null),
            ColumnType::Decimal => Decimal::from_str_exact(&s)
                .or_else(|_| s.parse::<Decimal>())
                .map(SqlValue::Decimal)
                .unwrap_or(SqlValue::Null),
            ColumnType::Date => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map(SqlValue::Date)
                .unwrap_or(SqlValue::Null),
            ColumnType::DateTime => NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S"))
                .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
                .map(SqlValue::DateTime)
                .unwrap_or(SqlValue::Null),
            ColumnType::Bytes => SqlValue::Bytes(s.into_bytes()),
            ColumnType::Text => SqlValue::Text(s),
        }
    }

    /// Render this value as a field of a `;`-delimited staging or loader data
    /// file. NULL renders as an empty field (the loader's `TRAILING NULLCOLS`
    /// tolerance covers trailing ones). Binary data has no delimited
    /// representation and returns `None`.
    #[must_use]
    pub fn as_delimited_field(&self) -> Option<String> {
        match self {
            SqlValue::Null => Some(String::new()),
            SqlValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            SqlValue::Int(i) => Some(i.to_string()),
            SqlValue::Real(f) => Some(f.to_string()),
            SqlValue::Decimal(d) => Some(d.to_string()),
            SqlValue::Text(s) => Some(s.clone()),
            SqlValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            SqlValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            SqlValue::Bytes(_) => None,
        }
    }
}

// From implementations for common types
impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::DateTime(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}
