//! Single-attempt query execution on the managed session.

use crate::error::Result;
use crate::warehouse::{ConnectionManager, Connector, Session, Warehouse};
use arrow_array::RecordBatch;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

/// Runs one statement per call against the shared session.
///
/// No retry: a failed statement is reported as-is, and a session the
/// warehouse dropped is only replaced on the next call through the
/// manager's liveness check.
pub struct QueryExecutor<C: Connector> {
    manager: Arc<ConnectionManager<C>>,
}

impl<C: Connector> QueryExecutor<C> {
    pub fn new(manager: Arc<ConnectionManager<C>>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl<C: Connector> Warehouse for QueryExecutor<C> {
    async fn query(&self, sql: &str) -> Result<Vec<RecordBatch>> {
        let session = self.manager.acquire().await?;
        debug!("executing warehouse query");
        match session.execute(sql).await {
            Ok(batches) => Ok(batches),
            Err(e) => {
                error!("warehouse query failed: {}", e);
                Err(e)
            }
        }
    }
}
