//! Pipeline funnel aggregation.

use crate::warehouse::rows;
use arrow_array::RecordBatch;
use serde::Serialize;

/// One row per (pipeline, stage) pair, lost deals excluded. Ordered by
/// pipeline name, then by count descending within each pipeline; ties keep
/// whatever order the warehouse returned.
pub const SQL: &str = "\
SELECT
  PIPELINE_NAME,
  PIPELINE_STAGE_NAME,
  COUNT(*)                         AS OPP_COUNT,
  COALESCE(SUM(MONETARY_VALUE), 0) AS TOTAL_VALUE
FROM REVRYZE.RAW.GHL_OPPORTUNITIES
WHERE STATUS != 'lost'
GROUP BY PIPELINE_NAME, PIPELINE_STAGE_NAME
ORDER BY PIPELINE_NAME, OPP_COUNT DESC";

/// Funnel row shape served at `/api/funnel`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStage {
    pub pipeline_name: String,
    pub stage_name: String,
    pub count: i64,
    pub total_value: f64,
}

pub fn normalize(batches: &[RecordBatch]) -> Vec<FunnelStage> {
    rows(batches)
        .map(|row| FunnelStage {
            pipeline_name: row.text("PIPELINE_NAME").unwrap_or("Unknown").to_string(),
            stage_name: row
                .text("PIPELINE_STAGE_NAME")
                .unwrap_or("Unknown")
                .to_string(),
            count: row.int("OPP_COUNT"),
            total_value: row.float("TOTAL_VALUE"),
        })
        .collect()
}
