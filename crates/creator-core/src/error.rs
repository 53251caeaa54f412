use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("series length must be between 1 and {max}: {requested}")]
    InvalidSeriesLength { requested: usize, max: usize },
    #[error("series date out of range")]
    SeriesDateOutOfRange,
}
