//! Warehouse connectivity.
//!
//! The gateway keeps a single authenticated session to the cloud data
//! warehouse, created on first use and reused across requests. [`Connector`]
//! opens sessions, [`ConnectionManager`] owns the one live session, and
//! [`QueryExecutor`] runs statements on it. The HTTP layer only sees the
//! [`Warehouse`] query surface, so handlers never touch session lifecycle.

pub mod adbc;
mod executor;
mod manager;
mod rows;

pub use executor::QueryExecutor;
pub use manager::ConnectionManager;
pub use rows::{rows, Row};

use crate::error::Result;
use arrow_array::RecordBatch;
use async_trait::async_trait;

/// Opens authenticated warehouse sessions.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Session: Session;

    /// Establish a new session. Fails with a connection error when the
    /// warehouse is unreachable or rejects the credentials.
    async fn connect(&self) -> Result<Self::Session>;
}

/// An authenticated warehouse session.
#[async_trait]
pub trait Session: Send + Sync + 'static {
    /// Run one SQL statement and collect its result batches. A statement
    /// that returns no rows yields an empty vec, never an error.
    async fn execute(&self, sql: &str) -> Result<Vec<RecordBatch>>;

    /// Cheap local liveness check. A session that has seen a
    /// connection-class failure reports dead and is replaced by the
    /// manager on the next acquire.
    fn is_alive(&self) -> bool;
}

/// Query surface consumed by the HTTP layer.
#[async_trait]
pub trait Warehouse: Send + Sync {
    async fn query(&self, sql: &str) -> Result<Vec<RecordBatch>>;
}
