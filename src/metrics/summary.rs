//! Deal summary aggregation.

use crate::warehouse::rows;
use arrow_array::RecordBatch;
use serde::Serialize;

/// Counts and total value across the whole opportunity relation, one row.
///
/// Derived ratios (conversion rate, cost per deal) are left to the
/// consumer so the warehouse never divides by zero.
pub const SQL: &str = "\
SELECT
  COUNT(*)                                          AS TOTAL_DEALS,
  SUM(CASE WHEN STATUS = 'won' THEN 1 ELSE 0 END)   AS WON_DEALS,
  SUM(CASE WHEN STATUS = 'lost' THEN 1 ELSE 0 END)  AS LOST_DEALS,
  SUM(CASE WHEN STATUS = 'open' THEN 1 ELSE 0 END)  AS OPEN_DEALS,
  COALESCE(SUM(MONETARY_VALUE), 0)                  AS TOTAL_VALUE
FROM REVRYZE.RAW.GHL_OPPORTUNITIES";

/// Summary shape served at `/api/metrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_deals: i64,
    pub open_deals: i64,
    pub won_deals: i64,
    pub lost_deals: i64,
    pub total_value: f64,
}

/// Fold the single aggregate row into the external shape.
///
/// An empty result degrades to all zeroes rather than an error.
pub fn normalize(batches: &[RecordBatch]) -> SummaryMetrics {
    match rows(batches).next() {
        Some(row) => SummaryMetrics {
            total_deals: row.int("TOTAL_DEALS"),
            open_deals: row.int("OPEN_DEALS"),
            won_deals: row.int("WON_DEALS"),
            lost_deals: row.int("LOST_DEALS"),
            total_value: row.float("TOTAL_VALUE"),
        },
        None => SummaryMetrics::default(),
    }
}
