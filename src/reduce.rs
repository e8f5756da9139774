//! Row-wise reduction of an observation table
//!
//! For every time step, the minimum, arithmetic mean and maximum of the
//! present values across all units. The envelope of a neighborhood is what
//! the demand charts draw: the mean line inside the min/max band.

use chrono::NaiveDateTime;

use crate::{range::DateRange, table::TimeTable};

/// Aligned min/mean/max series, one entry per input row
///
/// A row with no present value reduces to `None` in all three series,
/// showing up as a gap in the plotted lines rather than a spurious zero.
#[derive(Debug, Default, Clone)]
pub struct Envelope {
    pub time: Vec<NaiveDateTime>,
    pub min: Vec<Option<f64>>,
    pub mean: Vec<Option<f64>>,
    pub max: Vec<Option<f64>>,
}
impl Envelope {
    /// Reduces `table` row by row; the input is left untouched
    pub fn of(table: &TimeTable) -> Self {
        let mut this = Self {
            time: table.time().to_vec(),
            ..Default::default()
        };
        for k in 0..table.len() {
            let present: Vec<f64> = table.row(k).flatten().collect();
            if present.is_empty() {
                this.min.push(None);
                this.mean.push(None);
                this.max.push(None);
            } else {
                this.min
                    .push(Some(present.iter().cloned().fold(f64::INFINITY, f64::min)));
                this.mean
                    .push(Some(present.iter().sum::<f64>() / present.len() as f64));
                this.max.push(Some(
                    present.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                ));
            }
        }
        this
    }
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
    /// Entries with a timestamp within `range`, both ends included
    pub fn between(&self, range: &DateRange) -> Self {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&k| range.contains(self.time[k]))
            .collect();
        let pick = |values: &[Option<f64>]| keep.iter().map(|&k| values[k]).collect();
        Self {
            time: keep.iter().map(|&k| self.time[k]).collect(),
            min: pick(&self.min),
            mean: pick(&self.mean),
            max: pick(&self.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::table_of;

    #[test]
    fn min_never_exceeds_mean_nor_mean_max() {
        let table = table_of(
            "2100-01-01",
            &[
                ("U1", vec![Some(3f64), Some(-1f64), None, Some(0f64)]),
                ("U2", vec![Some(1f64), None, None, Some(5f64)]),
                ("U3", vec![Some(2f64), Some(4f64), None, Some(2.5)]),
            ],
        );
        let envelope = Envelope::of(&table);
        for k in 0..envelope.len() {
            if let (Some(min), Some(mean), Some(max)) =
                (envelope.min[k], envelope.mean[k], envelope.max[k])
            {
                assert!(min <= mean && mean <= max, "row {}", k);
            }
        }
    }
    #[test]
    fn mean_ignores_missing_values() {
        let table = table_of(
            "2100-01-01",
            &[("U1", vec![Some(2f64)]), ("U2", vec![None])],
        );
        let envelope = Envelope::of(&table);
        assert_eq!(envelope.mean[0], Some(2f64));
    }
    #[test]
    fn row_without_values_reduces_to_missing() {
        let table = table_of(
            "2100-01-01",
            &[("U1", vec![None, Some(1f64)]), ("U2", vec![None, Some(2f64)])],
        );
        let envelope = Envelope::of(&table);
        assert_eq!(envelope.min[0], None);
        assert_eq!(envelope.mean[0], None);
        assert_eq!(envelope.max[0], None);
        assert_eq!(envelope.mean[1], Some(1.5));
    }
    #[test]
    fn one_day_two_units() {
        // U2 drops to zero at noon: zero is valid data, not missing
        let u1 = vec![Some(1f64); 24];
        let u2: Vec<_> = (0..24)
            .map(|h| if h < 12 { Some(2f64) } else { Some(0f64) })
            .collect();
        let table = table_of("2100-01-01", &[("U1", u1), ("U2", u2)]).sanitize();
        let envelope = Envelope::of(&table);
        assert_eq!(envelope.min[0], Some(1f64));
        assert_eq!(envelope.mean[0], Some(1.5));
        assert_eq!(envelope.max[0], Some(2f64));
        assert_eq!(envelope.min[15], Some(0f64));
        assert_eq!(envelope.mean[15], Some(0.5));
        assert_eq!(envelope.max[15], Some(1f64));
    }
}
