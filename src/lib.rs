//! Neighborhood energy-demand profile statistics
//!
//! Reduces simulated hourly demand tables (one column per urban energy
//! unit) to per-time-step min/mean/max envelopes, resamples them to daily,
//! weekly and monthly sums, pivots single units into day x hour grids and
//! renders the comparison charts.

pub mod config;
pub mod error;
pub mod indicators;
pub mod loader;
pub mod plot;
pub mod profile;
pub mod range;
pub mod reduce;
pub mod resample;
pub mod table;

pub use config::DataRepo;
pub use error::Error;
pub use indicators::{period_indicators, range_indicators, IndicatorSet};
pub use loader::{DemandKind, ProfilesLoader};
pub use profile::DayHourGrid;
pub use range::DateRange;
pub use reduce::Envelope;
pub use resample::{resample, resample_all, Granularity};
pub use table::TimeTable;
