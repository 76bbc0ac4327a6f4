//! Connection configuration loading and validation.

mod descriptor;
mod types;
mod validation;

pub use descriptor::ConnectionDescriptor;
pub use types::{MysqlConfig, OracleConfig};

use std::path::Path;

use crate::error::Result;

impl MysqlConfig {
    /// Load a MySQL configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a MySQL configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: MysqlConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate_mysql(self)
    }

    /// Build the connection descriptor accepted by
    /// [`MysqlGateway::connect`](crate::MysqlGateway::connect).
    pub fn descriptor(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

impl OracleConfig {
    /// Load an Oracle configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse an Oracle configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: OracleConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate_oracle(self)
    }

    /// Build an ODBC connection string for the configured instance.
    pub fn connection_string(&self) -> String {
        format!(
            "Driver={{{}}};DBQ=//{}:{}/{};UID={};PWD={};",
            self.driver, self.host, self.port, self.service_name, self.user, self.password
        )
    }
}
