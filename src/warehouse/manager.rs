//! Warehouse session lifecycle.

use crate::error::Result;
use crate::warehouse::{Connector, Session};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Owns the process-wide warehouse session.
///
/// The session is created on first acquire and reused while it stays
/// healthy. The slot lock is held across connection establishment, so
/// concurrent callers are all satisfied by one in-flight attempt and the
/// warehouse never sees duplicate handshakes.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    context: Option<String>,
    slot: Mutex<Option<Arc<C::Session>>>,
}

impl<C: Connector> ConnectionManager<C> {
    /// `warehouse` and `schema` are the configured identifiers used to pick
    /// the post-connect context statement; the statement is fixed here, once.
    pub fn new(connector: C, warehouse: &str, schema: &str) -> Self {
        Self {
            connector,
            context: compute_context(warehouse, schema),
            slot: Mutex::new(None),
        }
    }

    /// Return the live session, connecting first if none exists or the
    /// cached one failed its liveness check.
    pub async fn acquire(&self) -> Result<Arc<C::Session>> {
        let mut slot = self.slot.lock().await;

        if let Some(session) = slot.as_ref() {
            if session.is_alive() {
                return Ok(Arc::clone(session));
            }
            warn!("cached warehouse session is no longer alive, reconnecting");
            *slot = None;
        }

        let session = Arc::new(self.connector.connect().await?);
        if let Some(context) = &self.context {
            // Best effort: a failure here still leaves a usable session.
            match session.execute(context).await {
                Ok(_) => info!("warehouse context set: {}", context),
                Err(e) => warn!("failed to set warehouse context: {}", e),
            }
        }
        *slot = Some(Arc::clone(&session));
        Ok(session)
    }
}

/// Pick the post-connect context statement.
///
/// The configured warehouse name is used when it is identifier-safe;
/// otherwise the schema name is tried in its place. When neither passes,
/// context selection is skipped and the session runs with whatever
/// defaults the warehouse assigned at login.
fn compute_context(warehouse: &str, schema: &str) -> Option<String> {
    if is_safe_identifier(warehouse) {
        return Some(format!("USE WAREHOUSE \"{warehouse}\""));
    }
    if is_safe_identifier(schema) {
        warn!(
            "warehouse name {:?} is not identifier-safe, falling back to schema {:?}",
            warehouse, schema
        );
        return Some(format!("USE WAREHOUSE \"{schema}\""));
    }
    warn!(
        "neither warehouse {:?} nor schema {:?} is identifier-safe, skipping context selection",
        warehouse, schema
    );
    None
}

/// ASCII letters, digits and underscore only, at least one character.
fn is_safe_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
