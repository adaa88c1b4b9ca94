use stravapr_core::{ApiError, UnitError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("usage: {0}")]
    Usage(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("CSV output: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("write report: {0}")]
    Io(#[from] std::io::Error),
}
