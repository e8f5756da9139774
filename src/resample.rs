//! Aggregation of hourly tables into coarser periods
//!
//! Demand is additive over time, so buckets are summed; comparing across
//! units at one instant is the job of [`Envelope`](crate::reduce::Envelope)
//! instead.

use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use strum_macros::EnumIter;

use crate::table::TimeTable;

/// Resampling period
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}
impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Weekly => write!(f, "weekly"),
            Granularity::Monthly => write!(f, "monthly"),
        }
    }
}
impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            other => Err(format!(
                "expected daily, weekly or monthly, got `{}`",
                other
            )),
        }
    }
}
impl Granularity {
    /// The timestamp labelling the bucket of `time`: midnight of the day,
    /// the Sunday ending the week or the last day of the month
    pub fn bucket(&self, time: NaiveDateTime) -> NaiveDateTime {
        let date = time.date();
        let label = match self {
            Granularity::Daily => date,
            Granularity::Weekly => {
                date + Duration::days(6 - date.weekday().num_days_from_monday() as i64)
            }
            Granularity::Monthly => {
                let (year, month) = (date.year(), date.month());
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                }
                .unwrap();
                next - Duration::days(1)
            }
        };
        label.and_time(NaiveTime::MIN)
    }
}

/// Sums `table` into `granularity` buckets
///
/// A bucket sums the present values only; a bucket with no present value at
/// all stays missing. The output is sanitized, dropping columns that became
/// entirely missing or all-zero.
pub fn resample(table: &TimeTable, granularity: Granularity) -> TimeTable {
    let mut buckets: Vec<NaiveDateTime> = Vec::new();
    // bucket index of every input row; the input index is increasing so
    // buckets come out in order
    let slots: Vec<usize> = table
        .time()
        .iter()
        .map(|&t| {
            let bucket = granularity.bucket(t);
            if buckets.last() != Some(&bucket) {
                buckets.push(bucket);
            }
            buckets.len() - 1
        })
        .collect();
    let columns: BTreeMap<String, Vec<Option<f64>>> = table
        .labels()
        .map(|label| {
            let mut sums = vec![None; buckets.len()];
            for (&slot, cell) in slots.iter().zip(
                table
                    .column(label)
                    .expect("label comes from the table itself")
                    .iter(),
            ) {
                if let Some(value) = cell {
                    sums[slot] = Some(sums[slot].unwrap_or(0f64) + value);
                }
            }
            (label.to_string(), sums)
        })
        .collect();
    TimeTable::from_parts(buckets, columns).sanitize()
}

/// The daily, weekly and monthly sums of `table`, in that order
pub fn resample_all(table: &TimeTable) -> (TimeTable, TimeTable, TimeTable) {
    (
        resample(table, Granularity::Daily),
        resample(table, Granularity::Weekly),
        resample(table, Granularity::Monthly),
    )
}
