//! Reflection metadata for database tables and columns.
//!
//! These types carry schema metadata retrieved on demand from the live
//! database catalog. They are not cached beyond the call that requested them.

use serde::{Deserialize, Serialize};

/// Table metadata reflected from the database catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    /// Schema (owner) name.
    pub schema: String,

    /// Table name.
    pub name: String,

    /// Column definitions in ordinal order.
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Column names in ordinal order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Column metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,

    /// Engine data type (e.g. "VARCHAR2", "NUMBER").
    pub data_type: String,

    /// Declared length for character types.
    pub max_length: i32,

    /// Numeric precision.
    pub precision: i32,

    /// Numeric scale.
    pub scale: i32,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Ordinal position (1-based).
    pub ordinal_pos: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let table = TableInfo {
            schema: "APP".to_string(),
            name: "EVENTS".to_string(),
            columns: vec![],
        };
        assert_eq!(table.full_name(), "APP.EVENTS");
    }

    #[test]
    fn test_column_names_preserve_order() {
        let table = TableInfo {
            schema: "APP".to_string(),
            name: "EVENTS".to_string(),
            columns: vec![
                ColumnInfo {
                    name: "ID".to_string(),
                    data_type: "NUMBER".to_string(),
                    max_length: 22,
                    precision: 10,
                    scale: 0,
                    is_nullable: false,
                    ordinal_pos: 1,
                },
                ColumnInfo {
                    name: "LABEL".to_string(),
                    data_type: "VARCHAR2".to_string(),
                    max_length: 255,
                    precision: 0,
                    scale: 0,
                    is_nullable: true,
                    ordinal_pos: 2,
                },
            ],
        };
        assert_eq!(table.column_names(), vec!["ID", "LABEL"]);
    }
}
