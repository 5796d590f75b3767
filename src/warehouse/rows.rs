//! Null-safe access to warehouse result rows.

use arrow_array::{
    Array, ArrayRef, Decimal128Array, Float32Array, Float64Array, Int32Array, Int64Array,
    RecordBatch, StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray,
};
use chrono::{DateTime, SecondsFormat};

/// Iterate the rows of a result set across all of its batches.
pub fn rows(batches: &[RecordBatch]) -> impl Iterator<Item = Row<'_>> {
    batches
        .iter()
        .flat_map(|batch| (0..batch.num_rows()).map(move |index| Row { batch, index }))
}

/// Borrowed view of one row within a record batch.
///
/// Warehouse drivers report columns in dialect casing (uppercase for
/// Snowflake) and with driver-dependent physical types. Accessors locate
/// columns case-insensitively and coerce values instead of erroring: a
/// missing column, a null, or an unconvertible value reads as zero for
/// numbers and as absent for text. Callers apply their own placeholder
/// for absent text.
pub struct Row<'a> {
    batch: &'a RecordBatch,
    index: usize,
}

impl<'a> Row<'a> {
    fn column(&self, name: &str) -> Option<&'a ArrayRef> {
        if let Some(col) = self.batch.column_by_name(name) {
            return Some(col);
        }
        let schema = self.batch.schema();
        let index = schema
            .fields()
            .iter()
            .position(|field| field.name().eq_ignore_ascii_case(name))?;
        Some(self.batch.column(index))
    }

    /// Numeric value of the named column, or 0.0.
    ///
    /// Integer, float and decimal columns convert directly; string columns
    /// are parsed. NaN and infinities also read as 0.0 so every numeric
    /// field in the external contract stays finite.
    pub fn float(&self, name: &str) -> f64 {
        let Some(col) = self.column(name) else {
            return 0.0;
        };
        if col.is_null(self.index) {
            return 0.0;
        }
        let any = col.as_any();
        let value = if let Some(a) = any.downcast_ref::<Float64Array>() {
            a.value(self.index)
        } else if let Some(a) = any.downcast_ref::<Float32Array>() {
            a.value(self.index) as f64
        } else if let Some(a) = any.downcast_ref::<Int64Array>() {
            a.value(self.index) as f64
        } else if let Some(a) = any.downcast_ref::<Int32Array>() {
            a.value(self.index) as f64
        } else if let Some(a) = any.downcast_ref::<Decimal128Array>() {
            a.value(self.index) as f64 / 10f64.powi(a.scale() as i32)
        } else if let Some(a) = any.downcast_ref::<StringArray>() {
            a.value(self.index).trim().parse().unwrap_or(0.0)
        } else {
            0.0
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Integer value of the named column, or 0.
    ///
    /// Goes through the same coercion as [`Row::float`]; warehouse counts
    /// arrive as NUMBER columns whose physical type varies by driver.
    pub fn int(&self, name: &str) -> i64 {
        self.float(name) as i64
    }

    /// Text value of the named column.
    ///
    /// Nulls, empty strings and non-text columns read as `None`.
    pub fn text(&self, name: &str) -> Option<&'a str> {
        let col = self.column(name)?;
        if col.is_null(self.index) {
            return None;
        }
        let value = col.as_any().downcast_ref::<StringArray>()?.value(self.index);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Timestamp of the named column as an ISO-8601 string.
    ///
    /// Timestamp columns render in UTC with millisecond precision; string
    /// columns pass through untouched. Nulls read as `None`.
    pub fn timestamp(&self, name: &str) -> Option<String> {
        let col = self.column(name)?;
        if col.is_null(self.index) {
            return None;
        }
        let any = col.as_any();
        if let Some(a) = any.downcast_ref::<StringArray>() {
            return Some(a.value(self.index).to_string());
        }
        let utc = if let Some(a) = any.downcast_ref::<TimestampSecondArray>() {
            DateTime::from_timestamp(a.value(self.index), 0)?
        } else if let Some(a) = any.downcast_ref::<TimestampMillisecondArray>() {
            DateTime::from_timestamp_millis(a.value(self.index))?
        } else if let Some(a) = any.downcast_ref::<TimestampMicrosecondArray>() {
            DateTime::from_timestamp_micros(a.value(self.index))?
        } else if let Some(a) = any.downcast_ref::<TimestampNanosecondArray>() {
            DateTime::from_timestamp_nanos(a.value(self.index))
        } else {
            return None;
        };
        Some(utc.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
