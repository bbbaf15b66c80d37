//! The range-walk aggregation loop.
//!
//! Walks the query window `[from, to)` at the template's granularity, lists
//! the partition behind each rendered prefix, and folds the per-step stats
//! into calendar-day buckets. One output point is emitted per calendar day
//! touched by the walk.

use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use tidemark_storage::PartitionLister;

use crate::error::Result;
use crate::query::{Metric, PartitionStat, TimeRange, TimeSeries};
use crate::template::PrefixTemplate;

/// Accumulator for one calendar day of the walk.
///
/// The representative timestamp is the instant of the first step folded in.
/// A bucket is closed exactly once, either on a day-boundary crossing or at
/// the end of the window; closed buckets are immutable.
struct DayBucket {
    timestamp: DateTime<Utc>,
    year: i32,
    month: u32,
    day: u32,
    stat: PartitionStat,
}

impl DayBucket {
    fn open(instant: DateTime<Utc>, stat: PartitionStat) -> Self {
        Self {
            timestamp: instant,
            year: instant.year(),
            month: instant.month(),
            day: instant.day(),
            stat,
        }
    }

    fn same_day(&self, instant: DateTime<Utc>) -> bool {
        self.day == instant.day() && self.month == instant.month() && self.year == instant.year()
    }

    fn fold(&mut self, stat: PartitionStat) {
        self.stat.add(stat);
    }

    fn close(self, metric: Metric, series: &mut TimeSeries) {
        series.push(self.timestamp, metric.select(&self.stat));
    }
}

/// Sum sizes and count keys over one concrete prefix.
pub async fn partition_stat(
    lister: &dyn PartitionLister,
    bucket: &str,
    prefix: &str,
) -> Result<PartitionStat> {
    let objects = lister.list_objects(bucket, prefix).await?;

    let mut stat = PartitionStat::default();
    for object in &objects {
        stat.total_size += object.size;
        stat.key_count += 1;
    }

    Ok(stat)
}

/// Aggregate a sub-query's window into a time series.
///
/// The walk is strictly sequential: each fetch completes before the next
/// prefix is rendered, and buckets close in chronological order by
/// construction. Any fetch failure aborts the whole aggregation; a partial
/// series would silently corrupt the totals. The final in-progress day is
/// flushed too, so the most recent partial day shows up in the series. An
/// empty window yields an empty series.
pub async fn aggregate(
    template: &PrefixTemplate,
    range: &TimeRange,
    metric: Metric,
    bucket: &str,
    lister: &dyn PartitionLister,
) -> Result<TimeSeries> {
    let granularity = template.granularity();
    debug!(
        "Walking window {} to {} at {:?} granularity",
        range.from, range.to, granularity
    );

    let mut series = TimeSeries::default();
    let mut open: Option<DayBucket> = None;
    let mut current = range.from;

    while current < range.to {
        let prefix = template.render(current);
        let stat = partition_stat(lister, bucket, &prefix).await?;

        match open.take() {
            Some(mut day) if day.same_day(current) => {
                day.fold(stat);
                open = Some(day);
            }
            Some(day) => {
                day.close(metric, &mut series);
                open = Some(DayBucket::open(current, stat));
            }
            None => {
                open = Some(DayBucket::open(current, stat));
            }
        }

        current += granularity.step();
    }

    if let Some(day) = open {
        day.close(metric, &mut series);
    }

    Ok(series)
}
