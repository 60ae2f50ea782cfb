use thiserror::Error;

/// Errors surfaced by the comparison core.
///
/// Per-indicator fetch failures never appear here: the fetcher records them as
/// empty series with [`crate::models::SeriesStatus::Failed`] instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// A response body that does not have the expected shape.
    #[error("unexpected response shape: {0}")]
    DataShape(String),

    #[error("country {0} is already selected")]
    AlreadySelected(String),

    #[error("at most {limit} countries can be compared at once")]
    LimitExceeded { limit: usize },

    #[error("country {0} is not in the catalog")]
    UnknownCountry(String),

    #[error("select at least one country to compare")]
    EmptySelection,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether retrying the same operation later could succeed.
    ///
    /// Catalog load failures are fatal for a session but retryable by the user.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::DataShape(e.to_string())
        } else {
            Error::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::DataShape(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
