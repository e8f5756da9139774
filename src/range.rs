//! Inclusive calendar intervals

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

#[derive(thiserror::Error, Debug)]
pub enum RangeError {
    #[error("cannot parse `{date}` as a YYYY-MM-DD date")]
    Date {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
}
type Result<T> = std::result::Result<T, RangeError>;

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|source| RangeError::Date {
        date: date.to_string(),
        source,
    })
}

/// A closed interval `[start, end]` of timestamps
///
/// A range with `start > end` selects nothing; it is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}
impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }
    /// Builds the range from `YYYY-MM-DD` bounds, the start day binding at
    /// 00:00:00 and the end day at 23:59:59 so both calendar days are
    /// included
    pub fn from_dates(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_date(start)?.and_time(NaiveTime::MIN),
            end: parse_date(end)?
                .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap()),
        })
    }
    /// The 24 hours of a single `YYYY-MM-DD` day
    pub fn day(date: &str) -> Result<Self> {
        Self::from_dates(date, date)
    }
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
    pub fn contains(&self, time: NaiveDateTime) -> bool {
        time >= self.start && time <= self.end
    }
    /// Hours elapsed from the range start, the x coordinate of the charts
    pub fn hours_from_start(&self, time: NaiveDateTime) -> f64 {
        (time - self.start).num_seconds() as f64 / 3600f64
    }
    /// Width of the range in hours
    pub fn span_hours(&self) -> f64 {
        self.hours_from_start(self.end)
    }
}
