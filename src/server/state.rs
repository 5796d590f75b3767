//! Shared request-handler state.

use crate::warehouse::Warehouse;
use std::sync::Arc;

/// State handed to every request handler.
///
/// Handlers only get the query surface; session lifecycle stays behind it.
#[derive(Clone)]
pub struct AppState {
    pub warehouse: Arc<dyn Warehouse>,
}

impl AppState {
    pub fn new(warehouse: Arc<dyn Warehouse>) -> Self {
        Self { warehouse }
    }
}
