use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series count changed across redraw: expected {expected}, got {actual}")]
    SeriesCountMismatch { expected: usize, actual: usize },

    #[error("endpoint action `{action}` failed: {detail}")]
    Endpoint { action: String, detail: String },
}

impl DashError {
    /// True for failures the embedding host must surface as a blocking alert
    /// instead of logging and moving on.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SeriesCountMismatch { .. })
    }

    /// Text for the host's alert dialog, phrased for the person looking at
    /// the page rather than at a log.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::SeriesCountMismatch { expected, actual } => format!(
                "The graph has {actual} data series where {expected} were drawn; \
                 it cannot be updated in place."
            ),
            other => other.to_string(),
        }
    }
}
