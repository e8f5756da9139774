//! Min/mean/max indicator tables
//!
//! Tabulates the reduced envelopes of one or more demand tables over date
//! ranges, one labelled column per input table, ready for CSV export or
//! plotting.

use std::{collections::BTreeMap, path::Path};

use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::{range::DateRange, reduce::Envelope, table::TimeTable};

#[derive(thiserror::Error, Debug)]
pub enum IndicatorError {
    #[error("got {tables} tables for {labels} labels, a one-to-one pairing is required")]
    LengthMismatch { tables: usize, labels: usize },
    #[error("failed to write the indicator CSV file")]
    Csv(#[from] csv::Error),
}
type Result<T> = std::result::Result<T, IndicatorError>;

/// The three statistics of a reduction, tabulated side by side
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub min: TimeTable,
    pub mean: TimeTable,
    pub max: TimeTable,
}
impl IndicatorSet {
    /// Writes one statistic table as CSV, one `Time` column followed by one
    /// column per label; missing cells are left empty
    pub fn write_csv<P: AsRef<Path>>(table: &TimeTable, path: P) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        let headers: Vec<String> = std::iter::once("Time".to_string())
            .chain(table.labels().map(String::from))
            .collect();
        wtr.write_record(&headers)?;
        for k in 0..table.len() {
            let record: Vec<String> = std::iter::once(table.time()[k].to_string())
                .chain(
                    table
                        .row(k)
                        .map(|cell| cell.map(|v| v.to_string()).unwrap_or_default()),
                )
                .collect();
            wtr.write_record(&record)?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Reduces each table, restricts the envelopes to `range` and lines them up
/// as one column per label
///
/// Tables and labels must pair one-to-one; the check happens before any
/// reduction. Differing time coverage is aligned on the sorted union of the
/// filtered indexes, with missing cells where a table has no row.
pub fn range_indicators(
    tables: &[TimeTable],
    labels: &[&str],
    range: &DateRange,
) -> Result<IndicatorSet> {
    if tables.len() != labels.len() {
        return Err(IndicatorError::LengthMismatch {
            tables: tables.len(),
            labels: labels.len(),
        });
    }
    let envelopes: Vec<Envelope> = tables
        .iter()
        .map(|table| Envelope::of(table).between(range))
        .collect();
    let time: Vec<NaiveDateTime> = envelopes
        .iter()
        .flat_map(|envelope| envelope.time.iter().copied())
        .sorted()
        .dedup()
        .collect();
    let lined_up = |stat: fn(&Envelope) -> &[Option<f64>]| -> TimeTable {
        let columns: BTreeMap<String, Vec<Option<f64>>> = labels
            .iter()
            .zip(envelopes.iter())
            .map(|(&label, envelope)| {
                let column = time
                    .iter()
                    .map(|t| {
                        envelope
                            .time
                            .binary_search(t)
                            .ok()
                            .and_then(|k| stat(envelope)[k])
                    })
                    .collect();
                (label.to_string(), column)
            })
            .collect();
        TimeTable::from_parts(time.clone(), columns)
    };
    Ok(IndicatorSet {
        min: lined_up(|e| &e.min),
        mean: lined_up(|e| &e.mean),
        max: lined_up(|e| &e.max),
    })
}

/// Sanitizes and reduces `table` once, then concatenates the envelope
/// slices of every range along time into single-column tables named `name`
///
/// Used for side-by-side seasonal comparisons, e.g. one representative day
/// per season; ranges selecting no rows contribute nothing.
pub fn period_indicators(table: &TimeTable, name: &str, ranges: &[DateRange]) -> IndicatorSet {
    let envelope = Envelope::of(&table.clone().sanitize());
    let mut time = Vec::new();
    let (mut min, mut mean, mut max) = (Vec::new(), Vec::new(), Vec::new());
    for range in ranges {
        let slice = envelope.between(range);
        time.extend(slice.time);
        min.extend(slice.min);
        mean.extend(slice.mean);
        max.extend(slice.max);
    }
    let single = |values: Vec<Option<f64>>| {
        TimeTable::from_parts(
            time.clone(),
            std::iter::once((name.to_string(), values)).collect(),
        )
    };
    IndicatorSet {
        min: single(min),
        mean: single(mean),
        max: single(max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::table_of;

    #[test]
    fn mismatched_labels_fail_before_any_reduction() {
        let table = table_of("2100-01-01", &[("A", vec![Some(1f64)])]);
        let range = DateRange::day("2100-01-01").unwrap();
        assert!(matches!(
            range_indicators(&[table], &["one", "two"], &range),
            Err(IndicatorError::LengthMismatch {
                tables: 1,
                labels: 2
            })
        ));
    }
    #[test]
    fn one_column_per_label() {
        let heat = table_of(
            "2100-01-01",
            &[("U1", vec![Some(1f64); 24]), ("U2", vec![Some(3f64); 24])],
        );
        let electricity = table_of("2100-01-01", &[("U1", vec![Some(4f64); 24])]);
        let range = DateRange::day("2100-01-01").unwrap();
        let set = range_indicators(&[heat, electricity], &["heat", "electricity"], &range).unwrap();
        assert_eq!(set.mean.labels().collect::<Vec<_>>(), vec!["electricity", "heat"]);
        assert_eq!(set.mean.column("heat").unwrap()[0], Some(2f64));
        assert_eq!(set.min.column("heat").unwrap()[0], Some(1f64));
        assert_eq!(set.max.column("heat").unwrap()[0], Some(3f64));
        assert_eq!(set.mean.column("electricity").unwrap()[0], Some(4f64));
    }
    #[test]
    fn range_restriction_is_inclusive() {
        let table = table_of("2100-01-01", &[("U1", (0..48).map(|v| Some(v as f64)).collect())]);
        let range = DateRange::day("2100-01-02").unwrap();
        let set = range_indicators(&[table], &["day2"], &range).unwrap();
        assert_eq!(set.mean.len(), 24);
        assert_eq!(set.mean.column("day2").unwrap()[0], Some(24f64));
    }
    #[test]
    fn period_indicators_concatenate_ranges() {
        let table = table_of("2100-01-01", &[("U1", vec![Some(1f64); 24 * 4])]);
        let ranges = [
            DateRange::day("2100-01-01").unwrap(),
            DateRange::day("2100-01-03").unwrap(),
        ];
        let set = period_indicators(&table, "winter", &ranges);
        assert_eq!(set.mean.len(), 48);
        assert_eq!(set.mean.labels().collect::<Vec<_>>(), vec!["winter"]);
    }
    #[test]
    fn indicator_tables_export_to_csv() {
        // the electricity table stops one hour short, so the union-aligned
        // mean table has a missing cell in its last row
        let heat = table_of("2100-01-01", &[("U1", vec![Some(1f64), Some(2f64)])]);
        let electricity = table_of("2100-01-01", &[("U1", vec![Some(3f64)])]);
        let range = DateRange::day("2100-01-01").unwrap();
        let set = range_indicators(&[heat, electricity], &["heat", "electricity"], &range).unwrap();

        let path = std::env::temp_dir().join(format!(
            "demand-profiles-{}-indicators.csv",
            std::process::id()
        ));
        IndicatorSet::write_csv(&set.mean, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Time,electricity,heat"));
        assert_eq!(lines.next(), Some("2100-01-01 00:00:00,3,1"));
        // missing electricity cell is an empty field, not a zero
        assert_eq!(lines.next(), Some("2100-01-01 01:00:00,,2"));
        assert_eq!(lines.next(), None);
    }
    #[test]
    fn empty_ranges_contribute_nothing() {
        let table = table_of("2100-01-01", &[("U1", vec![Some(1f64); 24])]);
        let ranges = [DateRange::from_dates("2099-01-01", "2099-01-02").unwrap()];
        let set = period_indicators(&table, "none", &ranges);
        assert!(set.mean.is_empty());
    }
}
