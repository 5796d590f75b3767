//! Shared helpers for integration tests.

use arrow_array::{
    Array, ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray,
    TimestampMillisecondArray,
};
use arrow_schema::{Field, Schema};
use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use axum::Router;
use revgate_core::error::{Error, Result};
use revgate_core::server::{create_router, AppState};
use revgate_core::warehouse::Warehouse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Build a one-batch result from named columns.
pub fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

/// The single aggregate row the summary query produces.
pub fn summary_batch(total: i64, won: i64, lost: i64, open: i64, value: f64) -> RecordBatch {
    batch(vec![
        ("TOTAL_DEALS", Arc::new(Int64Array::from(vec![total])) as ArrayRef),
        ("WON_DEALS", Arc::new(Int64Array::from(vec![won]))),
        ("LOST_DEALS", Arc::new(Int64Array::from(vec![lost]))),
        ("OPEN_DEALS", Arc::new(Int64Array::from(vec![open]))),
        ("TOTAL_VALUE", Arc::new(Float64Array::from(vec![value]))),
    ])
}

/// Funnel rows as (pipeline, stage, count, value) tuples.
pub fn funnel_batch(rows: &[(Option<&str>, Option<&str>, i64, f64)]) -> RecordBatch {
    let pipelines: Vec<Option<&str>> = rows.iter().map(|r| r.0).collect();
    let stages: Vec<Option<&str>> = rows.iter().map(|r| r.1).collect();
    let counts: Vec<i64> = rows.iter().map(|r| r.2).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.3).collect();
    batch(vec![
        ("PIPELINE_NAME", Arc::new(StringArray::from(pipelines)) as ArrayRef),
        ("PIPELINE_STAGE_NAME", Arc::new(StringArray::from(stages))),
        ("OPP_COUNT", Arc::new(Int64Array::from(counts))),
        ("TOTAL_VALUE", Arc::new(Float64Array::from(values))),
    ])
}

/// Recent-deal rows as (name, stage, status, value, updated_at millis).
pub fn recent_batch(
    rows: &[(Option<&str>, Option<&str>, Option<&str>, f64, Option<i64>)],
) -> RecordBatch {
    let names: Vec<Option<&str>> = rows.iter().map(|r| r.0).collect();
    let stages: Vec<Option<&str>> = rows.iter().map(|r| r.1).collect();
    let statuses: Vec<Option<&str>> = rows.iter().map(|r| r.2).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.3).collect();
    let timestamps: Vec<Option<i64>> = rows.iter().map(|r| r.4).collect();
    batch(vec![
        ("NAME", Arc::new(StringArray::from(names)) as ArrayRef),
        ("PIPELINE_STAGE_NAME", Arc::new(StringArray::from(stages))),
        ("STATUS", Arc::new(StringArray::from(statuses))),
        ("MONETARY_VALUE", Arc::new(Float64Array::from(values))),
        ("UPDATED_AT_TS", Arc::new(TimestampMillisecondArray::from(timestamps))),
    ])
}

/// Warehouse stub serving canned results keyed by exact SQL text.
///
/// Unconfigured statements return an empty result set.
pub struct StubWarehouse {
    responses: Mutex<HashMap<String, Result<Vec<RecordBatch>>>>,
}

impl StubWarehouse {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
        }
    }

    pub fn with(self, sql: &str, batches: Vec<RecordBatch>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(sql.to_string(), Ok(batches));
        self
    }

    pub fn with_error(self, sql: &str, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(sql.to_string(), Err(Error::query(message)));
        self
    }
}

#[async_trait]
impl Warehouse for StubWarehouse {
    async fn query(&self, sql: &str) -> Result<Vec<RecordBatch>> {
        self.responses
            .lock()
            .unwrap()
            .get(sql)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Router under test, wired to the given stub.
pub fn app(stub: StubWarehouse) -> Router {
    create_router(AppState::new(Arc::new(stub)))
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
