//! Per-engine SQL type mapping.

mod typemap;

pub use typemap::{mysql_column_type, oracle_column_type};
