//! Configuration type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// MySQL gateway configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct MysqlConfig {
    /// Database host.
    pub host: String,

    /// Database port (default: 3306).
    #[serde(default = "default_mysql_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Username.
    pub user: String,

    /// Password.
    pub password: String,
}

impl fmt::Debug for MysqlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Oracle gateway configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Database host.
    pub host: String,

    /// Listener port (default: 1521).
    #[serde(default = "default_oracle_port")]
    pub port: u16,

    /// Oracle instance service name.
    pub service_name: String,

    /// Username. Also determines the default working schema (uppercased).
    pub user: String,

    /// Password.
    pub password: String,

    /// Charset encoding used for loader files (default: "utf8").
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Installed ODBC driver name (default: "Oracle 21 ODBC driver").
    #[serde(default = "default_driver")]
    pub driver: String,
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service_name", &self.service_name)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("encoding", &self.encoding)
            .field("driver", &self.driver)
            .finish()
    }
}

fn default_mysql_port() -> u16 {
    3306
}

fn default_oracle_port() -> u16 {
    1521
}

fn default_encoding() -> String {
    "utf8".to_string()
}

fn default_driver() -> String {
    "Oracle 21 ODBC driver".to_string()
}
