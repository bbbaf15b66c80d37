//! Query model and the time-bucketed aggregation engine.

pub mod engine;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which statistic a sub-query plots.
///
/// On the wire this is the integer selector the query editor sends:
/// `0` for aggregate size, `1` for key count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum Metric {
    #[default]
    TotalSize,
    KeyCount,
}

impl TryFrom<u8> for Metric {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Metric::TotalSize),
            1 => Ok(Metric::KeyCount),
            other => Err(format!("unknown metric selector: {}", other)),
        }
    }
}

impl Metric {
    /// Pick this metric's value out of a partition stat.
    pub fn select(&self, stat: &PartitionStat) -> i64 {
        match self {
            Metric::TotalSize => stat.total_size,
            Metric::KeyCount => stat.key_count,
        }
    }
}

/// Half-open query window `[from, to)`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// One sub-query of a query request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuery {
    /// Unique identifier within the request; results are keyed by it.
    pub ref_id: String,
    #[serde(default)]
    pub bucket: String,
    /// Prefix template, e.g. `client=1000/<yyyy-MM-dd>/hour=<HH>`.
    pub prefix: String,
    #[serde(default)]
    pub metric: Metric,
    pub time_range: TimeRange,
}

/// Aggregate over all objects in one partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionStat {
    pub total_size: i64,
    pub key_count: i64,
}

impl PartitionStat {
    /// Fold another stat into this one.
    pub fn add(&mut self, other: PartitionStat) {
        self.total_size += other.total_size;
        self.key_count += other.key_count;
    }
}

/// Time-ordered series of `(timestamp, value)` pairs, exposed as two
/// index-aligned columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub times: Vec<DateTime<Utc>>,
    pub values: Vec<i64>,
}

impl TimeSeries {
    pub fn push(&mut self, time: DateTime<Utc>, value: i64) {
        self.times.push(time);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
