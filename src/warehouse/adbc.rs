//! ADBC-backed warehouse sessions.
//!
//! Connects to Snowflake through the ADBC driver manager: the driver shared
//! library is loaded from `warehouse.driver_path` and the connection bundle
//! is applied as database options. Statements on one connection cannot
//! overlap, so execution serializes on a per-session lock.

use crate::config::WarehouseConfig;
use crate::error::{Error, Result};
use crate::warehouse::{Connector, Session};
use adbc_core::{
    driver_manager::{ManagedConnection, ManagedDriver},
    error::Status,
    options::{AdbcVersion, OptionDatabase, OptionValue},
    Connection, Database, Driver, Optionable, Statement,
};
use arrow_array::RecordBatch;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::info;

/// Opens Snowflake sessions from a validated connection bundle.
pub struct AdbcConnector {
    config: WarehouseConfig,
}

impl AdbcConnector {
    pub fn new(config: WarehouseConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for AdbcConnector {
    type Session = AdbcSession;

    async fn connect(&self) -> Result<AdbcSession> {
        info!("connecting to warehouse (database: {})", self.config.database);

        let mut driver = ManagedDriver::load_dynamic_from_filename(
            &self.config.driver_path,
            None,
            AdbcVersion::V100,
        )
        .map_err(|e| Error::connection(format!("failed to load ADBC driver: {}", e)))?;

        let mut database = Driver::new_database(&mut driver)
            .map_err(|e| Error::connection(format!("failed to create database handle: {}", e)))?;

        database
            .set_option(
                OptionDatabase::Username,
                OptionValue::String(self.config.user.clone()),
            )
            .map_err(|e| Error::connection(format!("failed to set username: {}", e)))?;

        database
            .set_option(
                OptionDatabase::Password,
                OptionValue::String(self.config.password.clone()),
            )
            .map_err(|e| Error::connection(format!("failed to set password: {}", e)))?;

        database
            .set_option(
                OptionDatabase::Other("adbc.snowflake.sql.account".into()),
                OptionValue::String(self.config.account.clone()),
            )
            .map_err(|e| Error::connection(format!("failed to set account: {}", e)))?;

        database
            .set_option(
                OptionDatabase::Other("adbc.snowflake.sql.db".into()),
                OptionValue::String(self.config.database.clone()),
            )
            .map_err(|e| Error::connection(format!("failed to set database: {}", e)))?;

        database
            .set_option(
                OptionDatabase::Other("adbc.snowflake.sql.schema".into()),
                OptionValue::String(self.config.schema.clone()),
            )
            .map_err(|e| Error::connection(format!("failed to set schema: {}", e)))?;

        let connection = database
            .new_connection()
            .map_err(|e| Error::connection(format!("failed to open connection: {}", e)))?;

        info!("warehouse session established");
        Ok(AdbcSession::new(connection))
    }
}

/// One live Snowflake session.
pub struct AdbcSession {
    conn: Mutex<ManagedConnection>,
    alive: AtomicBool,
}

impl AdbcSession {
    fn new(conn: ManagedConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
            alive: AtomicBool::new(true),
        }
    }

    /// Wrap a driver error, downgrading the session when the failure
    /// indicates the connection itself is gone. Permission and statement
    /// errors leave the session usable.
    fn statement_error(&self, action: &str, err: adbc_core::error::Error) -> Error {
        if matches!(err.status, Status::IO) {
            self.alive.store(false, Ordering::Release);
        }
        Error::query(format!("failed to {}: {}", action, err))
    }
}

#[async_trait]
impl Session for AdbcSession {
    async fn execute(&self, sql: &str) -> Result<Vec<RecordBatch>> {
        let mut conn = self.conn.lock().await;

        let mut stmt = conn
            .new_statement()
            .map_err(|e| self.statement_error("create statement", e))?;

        stmt.set_sql_query(sql)
            .map_err(|e| self.statement_error("set SQL query", e))?;

        let reader = stmt
            .execute()
            .map_err(|e| self.statement_error("execute query", e))?;

        let mut batches = Vec::new();
        for batch in reader {
            batches
                .push(batch.map_err(|e| Error::query(format!("failed to read result batch: {}", e)))?);
        }
        Ok(batches)
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}
