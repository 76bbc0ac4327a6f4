//! In-memory tabular structure exchanged between callers and the gateways.
//!
//! A [`DataFrame`] is an ordered collection of named, typed columns plus the
//! name of the database table it addresses. Shape invariants (unique column
//! names, equal column lengths, values matching their column's declared type)
//! are enforced at construction, before any database interaction.

use crate::core::value::{ColumnType, SqlValue};
use crate::error::{GatewayError, Result};

/// A single named, typed column of a [`DataFrame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    name: String,
    ty: ColumnType,
    values: Vec<SqlValue>,
}

impl FrameColumn {
    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared column type.
    pub fn column_type(&self) -> ColumnType {
        self.ty
    }

    /// Column values, in row order.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }
}

/// An ordered set of named, typed columns addressed at a database table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    name: String,
    columns: Vec<FrameColumn>,
}

impl DataFrame {
    /// Create an empty frame addressed at the given table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column, consuming and returning the frame for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TypeMismatch`] when the column name collides
    /// with an existing one (case-insensitive), when the column length
    /// differs from the frame's existing columns, or when a non-NULL value
    /// does not match the declared column type.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        ty: ColumnType,
        values: Vec<SqlValue>,
    ) -> Result<Self> {
        let name = name.into();

        if self
            .columns
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&name))
        {
            return Err(GatewayError::type_mismatch(format!(
                "duplicate column name '{}' in frame '{}'",
                name, self.name
            )));
        }

        if let Some(first) = self.columns.first() {
            if first.values.len() != values.len() {
                return Err(GatewayError::type_mismatch(format!(
                    "column '{}' has {} values but frame '{}' has {} rows",
                    name,
                    values.len(),
                    self.name,
                    first.values.len()
                )));
            }
        }

        for (row, value) in values.iter().enumerate() {
            if let Some(actual) = value.column_type() {
                if actual != ty {
                    return Err(GatewayError::type_mismatch(format!(
                        "value at row {} of column '{}' is {} but the column is declared {}",
                        row, name, actual, ty
                    )));
                }
            }
        }

        self.columns.push(FrameColumn { name, ty, values });
        Ok(self)
    }

    /// Build a frame from row-major data.
    ///
    /// Used by the gateways to materialize result sets. Fails with
    /// [`GatewayError::TypeMismatch`] when a row's width differs from the
    /// column specification.
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<(String, ColumnType)>,
        rows: Vec<Vec<SqlValue>>,
    ) -> Result<Self> {
        let name = name.into();

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(GatewayError::type_mismatch(format!(
                    "row {} has {} values but {} columns are declared",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
        }

        let mut values: Vec<Vec<SqlValue>> = columns.iter().map(|_| Vec::new()).collect();
        for row in rows {
            for (col, value) in row.into_iter().enumerate() {
                values[col].push(value);
            }
        }

        let mut frame = DataFrame::new(name);
        for ((col_name, ty), col_values) in columns.into_iter().zip(values) {
            frame = frame.with_column(col_name, ty, col_values)?;
        }
        Ok(frame)
    }

    /// The destination table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[FrameColumn] {
        &self.columns
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<&FrameColumn> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// The values of row `idx`, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&SqlValue>> {
        if idx >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }

    /// Iterate over rows in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&SqlValue>> + '_ {
        (0..self.num_rows()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }

    /// Check that the frame can address a table at all.
    ///
    /// Operations that build DDL or DML from the frame require at least one
    /// column; a zero-column frame is a shape error.
    pub(crate) fn ensure_columns(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(GatewayError::type_mismatch(format!(
                "frame '{}' has no columns",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new("t")
            .with_column("id", ColumnType::Integer, vec![1.into(), 2.into()])
            .unwrap()
            .with_column("name", ColumnType::Text, vec!["a".into(), "b".into()])
            .unwrap()
    }

    #[test]
    fn test_builds_with_matching_columns() {
        let frame = sample_frame();
        assert_eq!(frame.name(), "t");
        assert_eq!(frame.num_rows(), 2);
        assert_eq!(frame.num_columns(), 2);
        assert_eq!(frame.column_names(), vec!["id", "name"]);
    }

    #[test]
    fn test_rejects_duplicate_column_names() {
        let err = sample_frame()
            .with_column("ID", ColumnType::Integer, vec![3.into(), 4.into()])
            .unwrap_err();
        assert!(matches!(err, GatewayError::TypeMismatch(_)));
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = sample_frame()
            .with_column("extra", ColumnType::Integer, vec![3.into()])
            .unwrap_err();
        assert!(matches!(err, GatewayError::TypeMismatch(_)));
    }

    #[test]
    fn test_rejects_value_type_disagreement() {
        let err = DataFrame::new("t")
            .with_column("id", ColumnType::Integer, vec!["oops".into()])
            .unwrap_err();
        assert!(matches!(err, GatewayError::TypeMismatch(_)));
    }

    #[test]
    fn test_null_matches_any_declared_type() {
        let frame = DataFrame::new("t")
            .with_column("id", ColumnType::Integer, vec![SqlValue::Null, 2.into()])
            .unwrap();
        assert_eq!(frame.num_rows(), 2);
    }

    #[test]
    fn test_row_access() {
        let frame = sample_frame();
        let row = frame.row(1).unwrap();
        assert_eq!(row, vec![&SqlValue::Int(2), &SqlValue::Text("b".into())]);
        assert!(frame.row(2).is_none());
    }

    #[test]
    fn test_from_rows_round_trip() {
        let frame = DataFrame::from_rows(
            "t",
            vec![
                ("id".to_string(), ColumnType::Integer),
                ("name".to_string(), ColumnType::Text),
            ],
            vec![
                vec![1.into(), "a".into()],
                vec![2.into(), "b".into()],
            ],
        )
        .unwrap();
        assert_eq!(frame, sample_frame());
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = DataFrame::from_rows(
            "t",
            vec![("id".to_string(), ColumnType::Integer)],
            vec![vec![1.into(), "a".into()]],
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::TypeMismatch(_)));
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let frame = sample_frame();
        assert!(frame.column("NAME").is_some());
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn test_ensure_columns() {
        assert!(DataFrame::new("t").ensure_columns().is_err());
        assert!(sample_frame().ensure_columns().is_ok());
    }
}
