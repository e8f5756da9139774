//! Day by hour-of-day demand profiles
//!
//! Reshapes one unit column of an hourly table into a calendar-day grid,
//! one row per day and one column per hour, feeding the distribution
//! heatmap and hour-banded comparisons.

use chrono::{NaiveDate, Timelike};

use crate::table::{TableError, TimeTable};

pub const HOURS_PER_DAY: usize = 24;

/// A day x hour-of-day grid of one observation series
///
/// Hours without an observation (gaps in the source index) stay missing.
#[derive(Debug, Clone)]
pub struct DayHourGrid {
    label: String,
    days: Vec<NaiveDate>,
    cells: Vec<[Option<f64>; HOURS_PER_DAY]>,
}
impl DayHourGrid {
    /// Pivots the column `label` of `table`
    ///
    /// Fails with [`TableError::MissingColumn`] when the table has no such
    /// column.
    pub fn from_table(table: &TimeTable, label: &str) -> Result<Self, TableError> {
        let column = table.column(label)?;
        let mut this = Self {
            label: label.to_string(),
            days: Vec::new(),
            cells: Vec::new(),
        };
        for (&time, &value) in table.time().iter().zip(column.iter()) {
            let day = time.date();
            if this.days.last() != Some(&day) {
                this.days.push(day);
                this.cells.push([None; HOURS_PER_DAY]);
            }
            let row = this.cells.last_mut().unwrap();
            row[time.hour() as usize] = value;
        }
        Ok(this)
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn n_days(&self) -> usize {
        self.days.len()
    }
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }
    /// The cell at (`day`, `hour`), `None` outside the grid or where the
    /// source series has a gap
    pub fn get(&self, day: usize, hour: usize) -> Option<f64> {
        self.cells.get(day).and_then(|row| {
            row.get(hour).copied().flatten()
        })
    }
    /// Iterator over the daily rows of 24 hourly cells
    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>; HOURS_PER_DAY]> {
        self.cells.iter()
    }
    /// Smallest and largest present cell, `None` for an all-missing grid
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.cells.iter().flatten().flatten();
        let first = *values.next()?;
        Some(values.fold((first, first), |(min, max), &v| {
            (min.min(v), max.max(v))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::{hourly_index, table_of};
    use crate::table::TimeTable;

    #[test]
    fn two_days_pivot_to_two_rows_of_24_hours() {
        let values: Vec<_> = (0..48).map(|v| Some(v as f64)).collect();
        let table = table_of("2100-01-01", &[("UEU1_ht", values)]);
        let grid = DayHourGrid::from_table(&table, "UEU1_ht").unwrap();
        assert_eq!(grid.n_days(), 2);
        assert!(grid.rows().all(|row| row.len() == HOURS_PER_DAY));
        assert_eq!(grid.get(0, 5), Some(5f64));
        assert_eq!(grid.get(1, 0), Some(24f64));
    }
    #[test]
    fn index_gaps_leave_missing_cells() {
        // drop hour 2 of a single day
        let time: Vec<_> = hourly_index("2100-01-01", 24)
            .into_iter()
            .enumerate()
            .filter(|&(h, _)| h != 2)
            .map(|(_, t)| t)
            .collect();
        let table = TimeTable::new(
            time,
            [("A".to_string(), vec![Some(1f64); 23])].into_iter().collect(),
        )
        .unwrap();
        let grid = DayHourGrid::from_table(&table, "A").unwrap();
        assert_eq!(grid.n_days(), 1);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(0, 3), Some(1f64));
    }
    #[test]
    fn unknown_label_is_a_hard_failure() {
        let table = table_of("2100-01-01", &[("A", vec![Some(1f64)])]);
        assert!(matches!(
            DayHourGrid::from_table(&table, "B"),
            Err(TableError::MissingColumn(label)) if label == "B"
        ));
    }
}
