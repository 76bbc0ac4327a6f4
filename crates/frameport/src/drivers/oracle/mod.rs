//! Oracle gateway.
//!
//! Reaches Oracle through ODBC and delegates bulk loading to the external
//! `sqlldr` command-line program.
//!
//! **Requirements:**
//! - An Oracle ODBC driver must be installed and registered with the driver
//!   manager (the driver name is configurable via [`OracleConfig`]).
//! - Bulk loading additionally requires the Oracle client tools (`sqlldr`)
//!   reachable through the search path handed to
//!   [`OracleGateway::load_data`].
//!
//! [`OracleConfig`]: crate::OracleConfig

mod gateway;
mod loader;

pub use gateway::OracleGateway;
pub use loader::{LoadMode, LoadReport, LoadRequest};
