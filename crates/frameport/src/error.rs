//! Error types for the gateway library.

use thiserror::Error;

use crate::core::value::ColumnType;

/// Main error type for gateway operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration error (malformed descriptor, unsupported protocol,
    /// missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A column's declared type has no SQL type mapping in the target dialect
    #[error("No {dialect} type mapping for column {column} of type {data_type}")]
    UnsupportedType {
        dialect: &'static str,
        column: String,
        data_type: ColumnType,
    },

    /// An argument has the wrong shape (ragged columns, duplicate names,
    /// value not matching its column's declared type, …)
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Reflection against a table that does not exist
    #[error("Table {schema}.{table} not found in the database catalog")]
    SchemaLookup { schema: String, table: String },

    /// MySQL connection or execution error
    #[error("MySQL database error: {0}")]
    Mysql(#[from] mysql_async::Error),

    /// Oracle (ODBC) connection or execution error
    #[error("Oracle database error: {0}")]
    Odbc(#[from] odbc_api::Error),

    /// Bulk load via the external loader failed
    #[error("Bulk load failed for table {table}: {message}")]
    Loader { table: String, message: String },

    /// IO error (staging and loader file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Delimited file error (staging and loader data files)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GatewayError {
    /// Create a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        GatewayError::Config(message.into())
    }

    /// Create a TypeMismatch error.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        GatewayError::TypeMismatch(message.into())
    }

    /// Create an UnsupportedType error.
    pub fn unsupported_type(
        dialect: &'static str,
        column: impl Into<String>,
        data_type: ColumnType,
    ) -> Self {
        GatewayError::UnsupportedType {
            dialect,
            column: column.into(),
            data_type,
        }
    }

    /// Create a SchemaLookup error.
    pub fn schema_lookup(schema: impl Into<String>, table: impl Into<String>) -> Self {
        GatewayError::SchemaLookup {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Create a Loader error.
    pub fn loader(table: impl Into<String>, message: impl Into<String>) -> Self {
        GatewayError::Loader {
            table: table.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
