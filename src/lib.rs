//! Revgate: read-only analytics gateway over a cloud data warehouse.
//!
//! The service aggregates CRM opportunity facts stored in the warehouse
//! into a small set of precomputed dashboard metrics and serves them over
//! HTTP as JSON. One warehouse session is shared by the whole process,
//! lazily created and reused until it goes stale.

pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod warehouse;

pub use error::{Error, Result};
