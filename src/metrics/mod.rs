//! Fixed aggregation queries and their result normalization.
//!
//! Each aggregator pairs one SQL statement with a pure function from raw
//! result batches to the external JSON contract. Normalization is total:
//! a malformed row degrades to zeroed or placeholder fields instead of
//! failing the whole response, and the warehouse's uppercase column names
//! never leak into the output.

pub mod funnel;
pub mod recent;
pub mod summary;

pub use funnel::FunnelStage;
pub use recent::RecentDeal;
pub use summary::SummaryMetrics;
