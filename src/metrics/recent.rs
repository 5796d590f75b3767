//! Recent deal activity.

use crate::warehouse::rows;
use arrow_array::RecordBatch;
use serde::Serialize;

/// Most recently touched deals, newest first.
pub const SQL: &str = "\
SELECT NAME, PIPELINE_STAGE_NAME, STATUS, MONETARY_VALUE, UPDATED_AT_TS
FROM REVRYZE.RAW.GHL_OPPORTUNITIES
ORDER BY UPDATED_AT_TS DESC
LIMIT 10";

/// The limit lives in the SQL, but it is applied here again so the
/// response stays capped even when a driver ignores LIMIT.
const MAX_ENTRIES: usize = 10;

/// Deal row shape served at `/api/recent`. `updated_at` is an ISO-8601
/// string, or null when the warehouse has no timestamp for the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentDeal {
    pub name: String,
    pub stage_name: String,
    pub status: String,
    pub value: f64,
    pub updated_at: Option<String>,
}

pub fn normalize(batches: &[RecordBatch]) -> Vec<RecentDeal> {
    rows(batches)
        .take(MAX_ENTRIES)
        .map(|row| RecentDeal {
            name: row.text("NAME").unwrap_or("Unnamed").to_string(),
            stage_name: row
                .text("PIPELINE_STAGE_NAME")
                .unwrap_or("Unknown")
                .to_string(),
            status: row.text("STATUS").unwrap_or("unknown").to_string(),
            value: row.float("MONETARY_VALUE"),
            updated_at: row.timestamp("UPDATED_AT_TS"),
        })
        .collect()
}
