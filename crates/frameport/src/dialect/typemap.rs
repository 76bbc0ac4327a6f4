//! Fixed type-mapping tables from declared column types to SQL column types.
//!
//! The maps are intentionally closed: a [`ColumnType`] without an entry for
//! the target dialect (currently [`ColumnType::Bytes`] on both engines) makes
//! `create_table` fail with `UnsupportedType` rather than guessing a DDL
//! representation.

use crate::core::value::ColumnType;

/// Map a declared column type to its MySQL DDL type.
#[must_use]
pub fn mysql_column_type(ty: ColumnType) -> Option<&'static str> {
    match ty {
        ColumnType::Text => Some("VARCHAR(255)"),
        ColumnType::Integer => Some("INT"),
        ColumnType::Real => Some("DECIMAL"),
        ColumnType::Decimal => Some("DECIMAL(38,10)"),
        ColumnType::Bool => Some("TINYINT(1)"),
        ColumnType::Date => Some("DATE"),
        ColumnType::DateTime => Some("DATETIME"),
        ColumnType::Bytes => None,
    }
}

/// Map a declared column type to its Oracle DDL type.
#[must_use]
pub fn oracle_column_type(ty: ColumnType) -> Option<&'static str> {
    match ty {
        ColumnType::Text => Some("VARCHAR2(255)"),
        ColumnType::Integer => Some("NUMBER(10)"),
        ColumnType::Real => Some("NUMBER"),
        ColumnType::Decimal => Some("NUMBER(38,10)"),
        ColumnType::Bool => Some("NUMBER(1)"),
        ColumnType::Date => Some("DATE"),
        ColumnType::DateTime => Some("TIMESTAMP"),
        ColumnType::Bytes => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_map_matches_fixed_table() {
        assert_eq!(mysql_column_type(ColumnType::Text), Some("VARCHAR(255)"));
        assert_eq!(mysql_column_type(ColumnType::Integer), Some("INT"));
        assert_eq!(mysql_column_type(ColumnType::Real), Some("DECIMAL"));
    }

    #[test]
    fn test_bytes_has_no_mapping() {
        assert_eq!(mysql_column_type(ColumnType::Bytes), None);
        assert_eq!(oracle_column_type(ColumnType::Bytes), None);
    }

    #[test]
    fn test_oracle_map() {
        assert_eq!(oracle_column_type(ColumnType::Text), Some("VARCHAR2(255)"));
        assert_eq!(oracle_column_type(ColumnType::DateTime), Some("TIMESTAMP"));
    }
}
