//! # frameport
//!
//! Thin database-access helpers (CRUD operations, bulk loading) over two
//! relational engines, exchanging data through an in-memory tabular
//! structure:
//!
//! - [`MysqlGateway`]: MySQL through a native async driver. Builds
//!   CREATE/SELECT/INSERT/UPDATE/DELETE statements from a [`DataFrame`] and
//!   executes them with bound parameters against a connection pool owned by
//!   the gateway value.
//! - [`OracleGateway`]: Oracle through ODBC. Supports table reflection,
//!   transactional raw-SQL execution, conditional drops, and bulk loading
//!   delegated to the external `sqlldr` program via generated control and
//!   data files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frameport::{ColumnType, DataFrame, MysqlGateway, SelectTarget};
//!
//! #[tokio::main]
//! async fn main() -> frameport::Result<()> {
//!     let gateway = MysqlGateway::connect("mysql://user:pw@127.0.0.1:3306/testdb").await?;
//!
//!     let frame = DataFrame::new("t")
//!         .with_column("id", ColumnType::Integer, vec![1.into(), 2.into()])?
//!         .with_column("name", ColumnType::Text, vec!["a".into(), "b".into()])?;
//!
//!     gateway.insert(&frame, None).await?;
//!     let rows = gateway.select(SelectTarget::Table("t"), &[]).await?;
//!     println!("{} rows", rows.num_rows());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod dialect;
pub mod drivers;
pub mod error;

// Re-exports for convenient access
pub use crate::core::frame::DataFrame;
pub use crate::core::schema::{ColumnInfo, TableInfo};
pub use crate::core::value::{ColumnType, SqlValue};
pub use config::{ConnectionDescriptor, MysqlConfig, OracleConfig};
pub use drivers::mysql::{MysqlGateway, SelectTarget};
pub use drivers::oracle::{LoadMode, LoadReport, LoadRequest, OracleGateway};
pub use error::{GatewayError, Result};
