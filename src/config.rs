//! Configuration management for the revgate service.
//!
//! This module provides configuration handling through multiple sources:
//! 1. Default configuration (embedded in binary)
//! 2. System-wide configuration file (`/etc/revgate/config.toml`)
//! 3. User-specified configuration file
//! 4. Environment variables (prefixed with `REVGATE_`, `__` as separator)
//! 5. Command-line arguments
//!
//! Configuration options are loaded in order of precedence, with later sources
//! overriding earlier ones.
//!
//! # Environment Variables
//!
//! Warehouse credentials should be provided via environment variables rather
//! than the config file:
//! - `REVGATE_WAREHOUSE_USER` - warehouse username
//! - `REVGATE_WAREHOUSE_PASSWORD` - warehouse password
//!
//! The warehouse connection bundle is validated exactly once, at startup; a
//! missing required field is fatal and names the offending key.

use crate::error::{Error, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Listen address in host:port format
    #[arg(long, value_name = "HOST:PORT")]
    pub listen: Option<String>,

    /// Path to the ADBC driver shared library
    #[arg(long, value_name = "PATH")]
    pub driver_path: Option<String>,
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Warehouse connection configuration
    #[serde(default)]
    pub warehouse: WarehouseConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Listen address in host:port form
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Warehouse connection bundle.
///
/// All fields are required; `validate` is the single startup-time check and
/// connection attempts never re-validate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Path to the ADBC driver shared library (e.g. the Snowflake driver)
    #[serde(default)]
    pub driver_path: String,
    /// Warehouse account identifier
    #[serde(default)]
    pub account: String,
    /// Username
    #[serde(default)]
    pub user: String,
    /// Password
    #[serde(default)]
    pub password: String,
    /// Target database
    #[serde(default)]
    pub database: String,
    /// Compute-context (warehouse) name
    #[serde(default)]
    pub warehouse: String,
    /// Schema name
    #[serde(default)]
    pub schema: String,
}

impl WarehouseConfig {
    /// Check that every required field is present.
    ///
    /// Returns `Error::Config` naming each missing field so the operator can
    /// fix all of them in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("warehouse.driver_path", &self.driver_path),
            ("warehouse.account", &self.account),
            ("warehouse.user", &self.user),
            ("warehouse.password", &self.password),
            ("warehouse.database", &self.database),
            ("warehouse.warehouse", &self.warehouse),
            ("warehouse.schema", &self.schema),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::config(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }
}

impl ServiceConfig {
    /// Load configuration from all sources
    pub fn load(args: &Args) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name("/etc/revgate/config.toml").required(false));

        // Load user config if specified
        if let Some(path) = &args.config {
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        // Add environment variables
        builder = builder.add_source(config::Environment::with_prefix("REVGATE").separator("__"));

        // Build config
        let mut config: ServiceConfig = builder
            .build()
            .map_err(|e| Error::config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| Error::config(e.to_string()))?;

        // Override with command line args
        if let Some(listen) = &args.listen {
            let (host, port) = listen
                .rsplit_once(':')
                .ok_or_else(|| Error::config(format!("invalid listen address: {listen}")))?;
            config.server.host = host.to_string();
            config.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("invalid listen port: {port}")))?;
        }
        if let Some(driver_path) = &args.driver_path {
            config.warehouse.driver_path = driver_path.clone();
        }

        // Credentials from dedicated environment variables win over the file
        if let Ok(user) = env::var("REVGATE_WAREHOUSE_USER") {
            config.warehouse.user = user;
        }
        if let Ok(password) = env::var("REVGATE_WAREHOUSE_PASSWORD") {
            config.warehouse.password = password;
        }

        Ok(config)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> Args {
        Args {
            config: None,
            listen: None,
            driver_path: None,
        }
    }

    fn full_warehouse() -> WarehouseConfig {
        WarehouseConfig {
            driver_path: "/usr/lib/libadbc_driver_snowflake.so".into(),
            account: "org-acct".into(),
            user: "reporting".into(),
            password: "secret".into(),
            database: "REVRYZE".into(),
            warehouse: "COMPUTE_WH".into(),
            schema: "RAW".into(),
        }
    }

    #[test]
    fn defaults_load() {
        let config = ServiceConfig::load(&empty_args()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn listen_override() {
        let args = Args {
            listen: Some("0.0.0.0:8080".into()),
            ..empty_args()
        };
        let config = ServiceConfig::load(&args).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn user_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9100\n\n[warehouse]\naccount = \"org-acct\"\n",
        )
        .unwrap();

        let args = Args {
            config: Some(path),
            ..empty_args()
        };
        let config = ServiceConfig::load(&args).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.warehouse.account, "org-acct");
    }

    #[test]
    fn bad_listen_rejected() {
        let args = Args {
            listen: Some("no-port".into()),
            ..empty_args()
        };
        assert!(ServiceConfig::load(&args).is_err());
    }

    #[test]
    fn validate_accepts_complete_bundle() {
        assert!(full_warehouse().validate().is_ok());
    }

    #[test]
    fn validate_names_every_missing_field() {
        let mut warehouse = full_warehouse();
        warehouse.password = String::new();
        warehouse.schema = "  ".into();

        let err = warehouse.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("warehouse.password"), "{msg}");
        assert!(msg.contains("warehouse.schema"), "{msg}");
        assert!(!msg.contains("warehouse.account"), "{msg}");
    }

    #[test]
    fn validate_rejects_empty_bundle() {
        assert!(WarehouseConfig::default().validate().is_err());
    }
}
