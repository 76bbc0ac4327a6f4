//! Core data types exchanged between callers and the gateways.

pub mod frame;
pub mod schema;
pub mod value;

pub use frame::DataFrame;
pub use schema::{ColumnInfo, TableInfo};
pub use value::{ColumnType, SqlValue};
