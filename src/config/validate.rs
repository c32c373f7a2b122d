//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};
use std::net::SocketAddr;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_data(config)?;
    validate_server(config)?;
    validate_sites(config)?;
    Ok(())
}

fn validate_data(config: &Config) -> Result<()> {
    if config.data.detections_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "data.detections_dir must not be empty".to_string(),
        });
    }
    Ok(())
}

fn validate_server(config: &Config) -> Result<()> {
    parse_bind_addr(&config.server.bind).map(|_| ())
}

fn validate_sites(config: &Config) -> Result<()> {
    if config.sites.habitat.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "sites.habitat must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Parse the configured bind address.
pub fn parse_bind_addr(bind: &str) -> Result<SocketAddr> {
    bind.parse().map_err(|_| Error::ConfigValidation {
        message: format!("server.bind is not a valid socket address: '{bind}'"),
    })
}
