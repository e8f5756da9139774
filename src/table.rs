//! Time-indexed observation tables
//!
//! A [`TimeTable`] holds the hourly demand profiles of a neighborhood, one
//! column per unit, with missing cells kept as missing rather than zero.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::range::DateRange;

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("column `{0}` not found")]
    MissingColumn(String),
    #[error("column `{label}` has {len} values for {index_len} time steps")]
    RaggedColumn {
        label: String,
        len: usize,
        index_len: usize,
    },
    #[error("time index is not strictly increasing at row {0}")]
    UnorderedIndex(usize),
}
type Result<T> = std::result::Result<T, TableError>;

/// Numeric observations indexed by a strictly increasing timestamp
///
/// Rows are time steps, columns are independent series (e.g. per-unit
/// demand). A missing cell is `None`.
#[derive(Debug, Default, Clone)]
pub struct TimeTable {
    time: Vec<NaiveDateTime>,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}
impl TimeTable {
    /// Builds a table, checking that every column matches the index length
    /// and that the index is strictly increasing
    pub fn new(
        time: Vec<NaiveDateTime>,
        columns: BTreeMap<String, Vec<Option<f64>>>,
    ) -> Result<Self> {
        if let Some(k) = time.windows(2).position(|w| w[0] >= w[1]) {
            return Err(TableError::UnorderedIndex(k + 1));
        }
        for (label, values) in &columns {
            if values.len() != time.len() {
                return Err(TableError::RaggedColumn {
                    label: label.clone(),
                    len: values.len(),
                    index_len: time.len(),
                });
            }
        }
        Ok(Self { time, columns })
    }
    // Skips the index checks, for derived tables built from an already
    // validated one
    pub(crate) fn from_parts(
        time: Vec<NaiveDateTime>,
        columns: BTreeMap<String, Vec<Option<f64>>>,
    ) -> Self {
        Self { time, columns }
    }
    /// Number of time steps
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
    /// The timestamp index
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }
    /// Column labels, in lexical order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
    /// Cells of the column `label`
    pub fn column(&self, label: &str) -> Result<&[Option<f64>]> {
        self.columns
            .get(label)
            .map(Vec::as_slice)
            .ok_or_else(|| TableError::MissingColumn(label.to_string()))
    }
    /// Iterator over the cells of row `k`, in label order
    pub fn row(&self, k: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.columns.values().map(move |values| values[k])
    }
    /// Drops columns that carry no information: first columns that are
    /// entirely missing, then columns whose present values are all exactly
    /// zero (unused unit slots, not genuine zero demand)
    ///
    /// Applying it twice gives the same table as applying it once.
    pub fn sanitize(mut self) -> Self {
        self.columns.retain(|_, values| {
            values.iter().any(|v| v.is_some())
                && values.iter().flatten().any(|&v| v != 0f64)
        });
        self
    }
    /// Rows with a timestamp within `range`, both ends included
    ///
    /// An empty selection gives an empty table.
    pub fn between(&self, range: &DateRange) -> Self {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&k| range.contains(self.time[k]))
            .collect();
        let time = keep.iter().map(|&k| self.time[k]).collect();
        let columns = self
            .columns
            .iter()
            .map(|(label, values)| {
                (label.clone(), keep.iter().map(|&k| values[k]).collect())
            })
            .collect();
        Self { time, columns }
    }
    /// Prints a per-column digest of the table
    pub fn summary(&self) {
        println!("SUMMARY:");
        println!(" - # of records: {}", self.len());
        if let (Some(first), Some(last)) = (self.time.first(), self.time.last()) {
            println!(" - time range: [{} - {}]", first, last);
        }
        println!(" - # of columns: {}", self.n_columns());
        if self.columns.is_empty() {
            return;
        }
        println!(
            "    {:^16}: {:^8} {:>12} {:>12} {:>12}",
            "COLUMN", "PRESENT", "MIN", "MEAN", "MAX"
        );
        for (label, values) in &self.columns {
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            if present.is_empty() {
                println!("  - {:16}: {:>8}", label, 0);
                continue;
            }
            let min = present.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = present.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = present.iter().sum::<f64>() / present.len() as f64;
            println!(
                "  - {:16}: {:>8} {:>12.6} {:>12.6} {:>12.6}",
                label,
                present.len(),
                min,
                mean,
                max
            );
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub fn hourly_index(date: &str, n: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n)
            .map(|h| start + chrono::Duration::hours(h as i64))
            .collect()
    }
    pub fn table_of(date: &str, columns: &[(&str, Vec<Option<f64>>)]) -> TimeTable {
        let n = columns[0].1.len();
        TimeTable::new(
            hourly_index(date, n),
            columns
                .iter()
                .map(|(label, values)| (label.to_string(), values.clone()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn sanitize_drops_all_zero_column() {
        let table = table_of(
            "2100-01-01",
            &[
                ("A", vec![Some(0f64), Some(0f64), Some(0f64)]),
                ("B", vec![Some(1f64), Some(2f64), Some(3f64)]),
            ],
        )
        .sanitize();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["B"]);
    }
    #[test]
    fn sanitize_drops_all_missing_column() {
        let table = table_of(
            "2100-01-01",
            &[
                ("A", vec![None, None]),
                ("B", vec![Some(0f64), Some(2f64)]),
            ],
        )
        .sanitize();
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["B"]);
    }
    #[test]
    fn sanitize_is_idempotent() {
        let table = table_of(
            "2100-01-01",
            &[
                ("A", vec![Some(0f64), None, Some(0f64)]),
                ("B", vec![Some(1f64), None, Some(3f64)]),
                ("C", vec![None, None, None]),
            ],
        );
        let once = table.sanitize();
        let twice = once.clone().sanitize();
        assert_eq!(
            once.labels().collect::<Vec<_>>(),
            twice.labels().collect::<Vec<_>>()
        );
        assert_eq!(once.len(), twice.len());
    }
    #[test]
    fn sanitize_may_empty_the_table() {
        let table = table_of("2100-01-01", &[("A", vec![Some(0f64), None])]).sanitize();
        assert_eq!(table.n_columns(), 0);
        assert_eq!(table.len(), 2);
    }
    #[test]
    fn missing_column_is_an_error() {
        let table = table_of("2100-01-01", &[("A", vec![Some(1f64)])]);
        assert!(matches!(
            table.column("Z"),
            Err(TableError::MissingColumn(label)) if label == "Z"
        ));
    }
    #[test]
    fn ragged_column_is_an_error() {
        let result = TimeTable::new(
            hourly_index("2100-01-01", 3),
            [("A".to_string(), vec![Some(1f64)])].into_iter().collect(),
        );
        assert!(matches!(result, Err(TableError::RaggedColumn { .. })));
    }
    #[test]
    fn unordered_index_is_an_error() {
        let mut time = hourly_index("2100-01-01", 3);
        time.swap(0, 2);
        let result = TimeTable::new(time, BTreeMap::new());
        assert!(matches!(result, Err(TableError::UnorderedIndex(1))));
    }
}
