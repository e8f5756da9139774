//! Demand profile CSV ingestion
//!
//! Reads a simulated demand export into a [`TimeTable`]: one `timestamp`
//! column followed by one column per unit (`UEU1_ht`, `UEU2_el`, ...).
//! Cells that do not parse as numbers become missing, never zero.

use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::NaiveDateTime;
use flate2::read::GzDecoder;
use regex::Regex;
use strum_macros::EnumIter;

use crate::{
    range::{DateRange, RangeError},
    table::{TableError, TimeTable},
};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to open the demand profile file")]
    Io(#[from] std::io::Error),
    #[error("failed to read the CSV file")]
    Csv(#[from] csv::Error),
    #[error("invalid header filter")]
    Regex(#[from] regex::Error),
    #[error("invalid date bound")]
    Range(#[from] RangeError),
    #[error("expected first column `{expected}`, the file starts with `{found}`")]
    Schema { expected: String, found: String },
    #[error("cannot parse the timestamp `{value}` at row {row}")]
    Timestamp {
        value: String,
        row: usize,
        #[source]
        source: chrono::ParseError,
    },
    #[error("the loaded rows do not form a valid table")]
    Table(#[from] TableError),
}
type Result<T> = std::result::Result<T, LoadError>;

/// Demand category of a unit column family
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum DemandKind {
    Heat,
    Electricity,
}
impl fmt::Display for DemandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandKind::Heat => write!(f, "ht"),
            DemandKind::Electricity => write!(f, "el"),
        }
    }
}
impl std::str::FromStr for DemandKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heat" | "ht" => Ok(DemandKind::Heat),
            "electricity" | "el" => Ok(DemandKind::Electricity),
            other => Err(format!("expected heat or electricity, got `{}`", other)),
        }
    }
}
impl DemandKind {
    /// Header filter matching the unit columns of this category
    pub fn header_filter(&self) -> String {
        format!(r"_{}$", self)
    }
}

fn parse_timestamp(value: &str, row: usize) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|source| LoadError::Timestamp {
            value: value.to_string(),
            row,
            source,
        })
}

/// Demand profile loader
///
/// ```no_run
/// # fn main() -> Result<(), demand_profiles::loader::LoadError> {
/// use demand_profiles::loader::{DemandKind, ProfilesLoader};
///
/// let table = ProfilesLoader::default()
///     .data_path("input/neighborhood.csv")
///     .header_filter(DemandKind::Heat.header_filter())
///     .start_date("2100-01-01")
///     .end_date("2100-12-31")
///     .load()?
///     .sanitize();
/// # Ok(()) }
/// ```
pub struct ProfilesLoader {
    path: PathBuf,
    timestamp_header: String,
    header_regex: String,
    start_date: Option<String>,
    end_date: Option<String>,
}
impl Default for ProfilesLoader {
    fn default() -> Self {
        Self {
            path: PathBuf::from("profiles.csv"),
            timestamp_header: String::from("timestamp"),
            header_regex: String::from(r"\w+"),
            start_date: None,
            end_date: None,
        }
    }
}
impl ProfilesLoader {
    pub fn data_path<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..self
        }
    }
    /// Name of the timestamp column, `timestamp` unless overridden
    pub fn timestamp_header<S: Into<String>>(self, timestamp_header: S) -> Self {
        Self {
            timestamp_header: timestamp_header.into(),
            ..self
        }
    }
    /// Unit columns regular expression filter
    pub fn header_filter<S: Into<String>>(self, header_regex: S) -> Self {
        Self {
            header_regex: header_regex.into(),
            ..self
        }
    }
    /// First day to load, `YYYY-MM-DD`
    pub fn start_date<S: Into<String>>(self, date: S) -> Self {
        Self {
            start_date: Some(date.into()),
            ..self
        }
    }
    /// Last day to load, `YYYY-MM-DD`
    pub fn end_date<S: Into<String>>(self, date: S) -> Self {
        Self {
            end_date: Some(date.into()),
            ..self
        }
    }
    fn date_window(&self) -> Result<Option<DateRange>> {
        Ok(match (&self.start_date, &self.end_date) {
            (None, None) => None,
            (start, end) => Some(DateRange::from_dates(
                start.as_deref().unwrap_or("0001-01-01"),
                end.as_deref().unwrap_or("9999-12-31"),
            )?),
        })
    }
    pub fn load(self) -> Result<TimeTable> {
        let file = File::open(&self.path)?;
        log::info!("Loading {:?}...", self.path);
        let now = Instant::now();
        let mut contents = String::new();
        if self.path.extension().and_then(|ext| ext.to_str()) == Some("gz") {
            GzDecoder::new(BufReader::new(file)).read_to_string(&mut contents)?;
        } else {
            BufReader::new(file).read_to_string(&mut contents)?;
        }
        let mut rdr = csv::Reader::from_reader(contents.as_bytes());

        let headers: Vec<String> = rdr
            .headers()?
            .into_iter()
            .map(|h| h.to_string())
            .collect();
        match headers.first() {
            Some(first) if *first == self.timestamp_header => (),
            first => {
                return Err(LoadError::Schema {
                    expected: self.timestamp_header,
                    found: first.cloned().unwrap_or_default(),
                })
            }
        }
        let re_header = Regex::new(&self.header_regex)?;
        let window = self.date_window()?;

        let kept: Vec<usize> = (1..headers.len())
            .filter(|&k| re_header.is_match(&headers[k]))
            .collect();
        let mut time = Vec::new();
        let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); kept.len()];
        for (row, result) in rdr.records().enumerate() {
            let record = result?;
            let timestamp = parse_timestamp(record.get(0).unwrap_or_default(), row + 1)?;
            if let Some(window) = &window {
                if !window.contains(timestamp) {
                    continue;
                }
            }
            time.push(timestamp);
            for (column, &k) in columns.iter_mut().zip(kept.iter()) {
                // non-numeric placeholders become missing cells
                column.push(record.get(k).and_then(|cell| cell.trim().parse::<f64>().ok()));
            }
        }
        let table = TimeTable::new(
            time,
            kept.iter()
                .zip(columns)
                .map(|(&k, column)| (headers[k].clone(), column))
                .collect(),
        )?;
        log::info!(
            "... {} rows x {} columns loaded in {}ms",
            table.len(),
            table.n_columns(),
            now.elapsed().as_millis()
        );
        Ok(table)
    }
}
