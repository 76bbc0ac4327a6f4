//! Oracle gateway implementation over ODBC.
//!
//! The gateway owns an ODBC environment plus connection string and opens a
//! connection per operation. Operations are serialized behind a mutex since
//! ODBC driver managers are not fully thread-safe.

use std::sync::Arc;

use odbc_api::buffers::TextRowSet;
use odbc_api::parameter::{InputParameter, VarCharBox};
use odbc_api::{
    ConnectionOptions, Cursor, DataType, Environment, IntoParameter, ResultSetMetadata,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::config::OracleConfig;
use crate::core::frame::DataFrame;
use crate::core::schema::{ColumnInfo, TableInfo};
use crate::core::value::{ColumnType, SqlValue};
use crate::error::{GatewayError, Result};

use super::loader::{self, LoadReport, LoadRequest};

/// Rows fetched per ODBC round trip.
const FETCH_BATCH_SIZE: usize = 1000;

/// Maximum bytes buffered per text cell.
const MAX_CELL_BYTES: usize = 4096;

/// Frame name used for materialized result sets.
const RESULT_NAME: &str = "result";

/// Oracle gateway with a per-instance connection.
///
/// Construction is eager: the connection string is verified before the value
/// is returned. The default working schema is the uppercased user name.
pub struct OracleGateway {
    env: Arc<Environment>,
    connection_string: String,
    schema: String,
    encoding: String,
    /// Serializes ODBC operations (ODBC is not fully thread-safe).
    conn_mutex: Mutex<()>,
}

impl OracleGateway {
    /// Connect to an Oracle instance.
    pub async fn connect(
        user: &str,
        password: &str,
        host: &str,
        port: u16,
        service_name: &str,
        encoding: &str,
    ) -> Result<Self> {
        let config = OracleConfig {
            host: host.to_string(),
            port,
            service_name: service_name.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            encoding: encoding.to_string(),
            driver: "Oracle 21 ODBC driver".to_string(),
        };
        Self::from_config(&config).await
    }

    /// Connect from a validated configuration.
    pub async fn from_config(config: &OracleConfig) -> Result<Self> {
        config.validate()?;

        let env = Environment::new().map_err(|e| {
            GatewayError::config(format!(
                "Failed to create ODBC environment: {}. \
                 Make sure an ODBC driver manager and the Oracle ODBC driver are installed.",
                e
            ))
        })?;

        let connection_string = config.connection_string();

        // Test connection - use a scope so conn is dropped before we move env
        {
            let conn = env
                .connect_with_connection_string(&connection_string, ConnectionOptions::default())
                .map_err(|e| {
                    GatewayError::config(format!(
                        "Failed to connect to Oracle via ODBC: {}. \
                         Check the credentials, service name, and driver name.",
                        e
                    ))
                })?;
            let _ = conn.execute("SELECT 1 FROM DUAL", ());
        }

        info!(
            "Connected to Oracle via ODBC: {}:{}/{}",
            config.host, config.port, config.service_name
        );

        Ok(Self {
            env: Arc::new(env),
            connection_string,
            schema: config.user.to_uppercase(),
            encoding: config.encoding.clone(),
            conn_mutex: Mutex::new(()),
        })
    }

    /// The default working schema (uppercased user name).
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The charset encoding used for loader files.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Reflect a table's column metadata from the live catalog.
    ///
    /// # Errors
    ///
    /// [`GatewayError::SchemaLookup`] when the table does not exist in the
    /// given (or default) schema.
    pub async fn get_table(&self, name: &str, schema: Option<&str>) -> Result<TableInfo> {
        let _lock = self.conn_mutex.lock().await;
        self.get_table_sync(name, schema)
    }

    /// Execute a DDL or DML statement with bound parameters inside a
    /// transaction.
    ///
    /// Commits on success. When the statement produces rows they are
    /// materialized into a frame with column names taken from the result-set
    /// metadata; otherwise an empty frame is returned. On any database
    /// failure the transaction is rolled back, the failure logged, and the
    /// error returned. The connection is released at scope exit either way.
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<DataFrame> {
        let _lock = self.conn_mutex.lock().await;
        self.execute_sync(sql, params)
    }

    /// Drop a table if it exists.
    ///
    /// Reflects first; an absent table is not an error.
    pub async fn drop_table(&self, name: &str, schema: Option<&str>) -> Result<()> {
        let _lock = self.conn_mutex.lock().await;

        let table = match self.get_table_sync(name, schema) {
            Ok(table) => table,
            Err(GatewayError::SchemaLookup { schema, table }) => {
                debug!("Table {}.{} absent, nothing to drop", schema, table);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let sql = format!(
            "DROP TABLE {}.{}",
            quote_ident(&table.schema),
            quote_ident(&table.name)
        );
        self.execute_sync(&sql, &[])?;
        info!("Table {}.{} dropped", table.schema, table.name);
        Ok(())
    }

    /// Bulk-load a frame into an existing table via the external `sqlldr`
    /// program.
    ///
    /// Writes the loader control and data files, spawns `sqlldr` with the
    /// requested environment overrides, awaits its completion, and parses
    /// the loader log into a [`LoadReport`]. The destination table must
    /// already exist.
    pub async fn load_data(request: &LoadRequest<'_>) -> Result<LoadReport> {
        loader::load_data(request).await
    }

    fn get_connection(&self) -> Result<odbc_api::Connection<'_>> {
        let conn = self
            .env
            .connect_with_connection_string(&self.connection_string, ConnectionOptions::default())?;
        Ok(conn)
    }

    fn execute_sync(&self, sql: &str, params: &[SqlValue]) -> Result<DataFrame> {
        let conn = self.get_connection()?;
        conn.set_autocommit(false)?;

        let bound: Vec<Box<dyn InputParameter>> = params.iter().map(to_odbc_parameter).collect();

        let outcome = match conn.execute(sql, bound.as_slice()) {
            Ok(Some(cursor)) => materialize_cursor(cursor),
            Ok(None) => Ok(DataFrame::new(RESULT_NAME)),
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(frame) => {
                conn.commit()?;
                debug!("Statement committed, {} rows returned", frame.num_rows());
                Ok(frame)
            }
            Err(e) => {
                error!("Statement failed, rolling back: {}", e);
                if let Err(rollback_err) = conn.rollback() {
                    error!("Rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    fn get_table_sync(&self, name: &str, schema: Option<&str>) -> Result<TableInfo> {
        let schema = schema.unwrap_or(&self.schema).to_uppercase();
        let table = name.to_uppercase();

        let sql = "SELECT COLUMN_NAME, DATA_TYPE, DATA_LENGTH, \
                   NVL(DATA_PRECISION, 0), NVL(DATA_SCALE, 0), NULLABLE, COLUMN_ID \
                   FROM ALL_TAB_COLUMNS WHERE OWNER = ? AND TABLE_NAME = ? \
                   ORDER BY COLUMN_ID";

        let rows = self.query_sync(
            sql,
            &[
                SqlValue::Text(schema.clone()),
                SqlValue::Text(table.clone()),
            ],
        )?;

        if rows.is_empty() {
            return Err(GatewayError::schema_lookup(schema, table));
        }

        let columns = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| column_info_from_row(row, idx as i32 + 1))
            .collect();

        Ok(TableInfo {
            schema,
            name: table,
            columns,
        })
    }

    /// Execute a catalog query outside the transactional path and return
    /// rows as text.
    fn query_sync(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Vec<Option<String>>>> {
        let conn = self.get_connection()?;
        let bound: Vec<Box<dyn InputParameter>> = params.iter().map(to_odbc_parameter).collect();

        let mut rows = Vec::new();
        if let Some(mut cursor) = conn.execute(sql, bound.as_slice())? {
            let num_cols = cursor.num_result_cols()? as usize;
            let mut buffers =
                TextRowSet::for_cursor(FETCH_BATCH_SIZE, &mut cursor, Some(MAX_CELL_BYTES))?;
            let mut row_cursor = cursor.bind_buffer(&mut buffers)?;

            while let Some(batch) = row_cursor.fetch()? {
                for row_idx in 0..batch.num_rows() {
                    let mut row = Vec::with_capacity(num_cols);
                    for col_idx in 0..num_cols {
                        let value = batch
                            .at(col_idx, row_idx)
                            .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
                        row.push(value);
                    }
                    rows.push(row);
                }
            }
        }
        Ok(rows)
    }
}

/// Quote an Oracle identifier.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Materialize a result set into a frame, taking column names and types from
/// the result-set metadata.
fn materialize_cursor<C>(mut cursor: C) -> Result<DataFrame>
where
    C: Cursor,
{
    let num_cols = cursor.num_result_cols()? as usize;

    let mut specs = Vec::with_capacity(num_cols);
    for col in 0..num_cols {
        let column_number = (col + 1) as u16;
        let name = cursor.col_name(column_number)?;
        let ty = column_type_from_odbc(cursor.col_data_type(column_number)?);
        specs.push((name, ty));
    }

    let mut buffers = TextRowSet::for_cursor(FETCH_BATCH_SIZE, &mut cursor, Some(MAX_CELL_BYTES))?;
    let mut row_cursor = cursor.bind_buffer(&mut buffers)?;

    let mut rows = Vec::new();
    while let Some(batch) = row_cursor.fetch()? {
        for row_idx in 0..batch.num_rows() {
            let mut row = Vec::with_capacity(num_cols);
            for col_idx in 0..num_cols {
                let text = batch
                    .at(col_idx, row_idx)
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
                row.push(SqlValue::parse_typed(text, specs[col_idx].1));
            }
            rows.push(row);
        }
    }

    DataFrame::from_rows(RESULT_NAME, specs, rows)
}

/// Convert a frame value to a bound ODBC parameter.
fn to_odbc_parameter(value: &SqlValue) -> Box<dyn InputParameter> {
    match value {
        SqlValue::Null => Box::new(VarCharBox::null()),
        SqlValue::Bool(b) => Box::new(i32::from(*b)),
        SqlValue::Int(i) => Box::new(*i),
        SqlValue::Real(f) => Box::new(*f),
        SqlValue::Decimal(d) => Box::new(d.to_string().into_parameter()),
        SqlValue::Text(s) => Box::new(s.clone().into_parameter()),
        SqlValue::Date(d) => Box::new(d.format("%Y-%m-%d").to_string().into_parameter()),
        SqlValue::DateTime(dt) => {
            Box::new(dt.format("%Y-%m-%d %H:%M:%S").to_string().into_parameter())
        }
        SqlValue::Bytes(b) => Box::new(b.clone().into_parameter()),
    }
}

/// Map an ODBC column type to a declared frame column type.
fn column_type_from_odbc(data_type: DataType) -> ColumnType {
    match data_type {
        DataType::TinyInt | DataType::SmallInt | DataType::Integer | DataType::BigInt => {
            ColumnType::Integer
        }
        // Oracle reports NUMBER columns as Numeric/Decimal; scale 0 means
        // integral.
        DataType::Numeric { scale, .. } | DataType::Decimal { scale, .. } => {
            if scale == 0 {
                ColumnType::Integer
            } else {
                ColumnType::Decimal
            }
        }
        DataType::Real | DataType::Float { .. } | DataType::Double => ColumnType::Real,
        DataType::Bit => ColumnType::Bool,
        DataType::Date => ColumnType::Date,
        DataType::Timestamp { .. } => ColumnType::DateTime,
        DataType::Binary { .. } | DataType::Varbinary { .. } | DataType::LongVarbinary { .. } => {
            ColumnType::Bytes
        }
        _ => ColumnType::Text,
    }
}

/// Build a [`ColumnInfo`] from an `ALL_TAB_COLUMNS` row.
fn column_info_from_row(row: &[Option<String>], ordinal_fallback: i32) -> ColumnInfo {
    let text = |idx: usize| row.get(idx).and_then(|v| v.clone());
    let int = |idx: usize| {
        row.get(idx)
            .and_then(|v| v.as_ref())
            .and_then(|s| s.parse().ok())
    };

    ColumnInfo {
        name: text(0).unwrap_or_default(),
        data_type: text(1).unwrap_or_default(),
        max_length: int(2).unwrap_or(0),
        precision: int(3).unwrap_or(0),
        scale: int(4).unwrap_or(0),
        is_nullable: text(5).map(|s| s == "Y").unwrap_or(true),
        ordinal_pos: int(6).unwrap_or(ordinal_fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("EVENTS"), "\"EVENTS\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_column_type_from_odbc_number_scale() {
        assert_eq!(
            column_type_from_odbc(DataType::Numeric {
                precision: 10,
                scale: 0
            }),
            ColumnType::Integer
        );
        assert_eq!(
            column_type_from_odbc(DataType::Numeric {
                precision: 10,
                scale: 2
            }),
            ColumnType::Decimal
        );
    }

    #[test]
    fn test_column_type_from_odbc_temporal() {
        assert_eq!(column_type_from_odbc(DataType::Date), ColumnType::Date);
        assert_eq!(
            column_type_from_odbc(DataType::Timestamp { precision: 6 }),
            ColumnType::DateTime
        );
    }

    #[test]
    fn test_column_info_from_row() {
        let row = vec![
            Some("ID".to_string()),
            Some("NUMBER".to_string()),
            Some("22".to_string()),
            Some("10".to_string()),
            Some("0".to_string()),
            Some("N".to_string()),
            Some("1".to_string()),
        ];
        let info = column_info_from_row(&row, 7);
        assert_eq!(info.name, "ID");
        assert_eq!(info.data_type, "NUMBER");
        assert_eq!(info.max_length, 22);
        assert_eq!(info.precision, 10);
        assert!(!info.is_nullable);
        assert_eq!(info.ordinal_pos, 1);
    }

    #[test]
    fn test_column_info_from_row_uses_ordinal_fallback() {
        let row = vec![
            Some("LABEL".to_string()),
            Some("VARCHAR2".to_string()),
            None,
            None,
            None,
            Some("Y".to_string()),
            None,
        ];
        let info = column_info_from_row(&row, 3);
        assert_eq!(info.ordinal_pos, 3);
        assert!(info.is_nullable);
        assert_eq!(info.max_length, 0);
    }
}
