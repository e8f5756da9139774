use crate::{
    indicators::IndicatorError, loader::LoadError, plot::PlotError, range::RangeError,
    table::TableError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `table` module")]
    Table(#[from] TableError),
    #[error("Error in the `range` module")]
    Range(#[from] RangeError),
    #[error("Error in the `indicators` module")]
    Indicator(#[from] IndicatorError),
    #[error("Error in the `loader` module")]
    Load(#[from] LoadError),
    #[error("Error in the `plot` module")]
    Plot(#[from] PlotError),
}
