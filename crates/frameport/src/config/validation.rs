//! Configuration validation.

use super::{MysqlConfig, OracleConfig};
use crate::error::{GatewayError, Result};

/// Validate a MySQL configuration.
pub fn validate_mysql(config: &MysqlConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(GatewayError::config("mysql host is required"));
    }
    if config.database.is_empty() {
        return Err(GatewayError::config("mysql database is required"));
    }
    if config.user.is_empty() {
        return Err(GatewayError::config("mysql user is required"));
    }
    Ok(())
}

/// Validate an Oracle configuration.
pub fn validate_oracle(config: &OracleConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(GatewayError::config("oracle host is required"));
    }
    if config.service_name.is_empty() {
        return Err(GatewayError::config("oracle service_name is required"));
    }
    if config.user.is_empty() {
        return Err(GatewayError::config("oracle user is required"));
    }
    if config.driver.is_empty() {
        return Err(GatewayError::config("oracle driver is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_mysql() -> MysqlConfig {
        MysqlConfig {
            host: "localhost".to_string(),
            port: 3306,
            database: "testdb".to_string(),
            user: "app".to_string(),
            password: "password".to_string(),
        }
    }

    fn valid_oracle() -> OracleConfig {
        OracleConfig {
            host: "localhost".to_string(),
            port: 1521,
            service_name: "ORCL".to_string(),
            user: "app".to_string(),
            password: "password".to_string(),
            encoding: "utf8".to_string(),
            driver: "Oracle 21 ODBC driver".to_string(),
        }
    }

    #[test]
    fn test_valid_configs() {
        assert!(validate_mysql(&valid_mysql()).is_ok());
        assert!(validate_oracle(&valid_oracle()).is_ok());
    }

    #[test]
    fn test_missing_mysql_host() {
        let mut config = valid_mysql();
        config.host = "".to_string();
        assert!(validate_mysql(&config).is_err());
    }

    #[test]
    fn test_missing_mysql_database() {
        let mut config = valid_mysql();
        config.database = "".to_string();
        assert!(validate_mysql(&config).is_err());
    }

    #[test]
    fn test_missing_oracle_service_name() {
        let mut config = valid_oracle();
        config.service_name = "".to_string();
        assert!(validate_oracle(&config).is_err());
    }

    #[test]
    fn test_missing_oracle_user() {
        let mut config = valid_oracle();
        config.user = "".to_string();
        assert!(validate_oracle(&config).is_err());
    }
}
