use thiserror::Error;

/// Everything that can go wrong between a snapshot root and a rendered report.
#[derive(Error, Debug)]
pub enum SnitchError {
    #[error("No snapshot found: {0}")]
    NotFound(String),
    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Malformed timestamp {0:?}, expected YYYY-MM-DD_HH-MM-SS.")]
    Timestamp(String),
    #[error("Unable to read snapshot: {0}")]
    Io(#[from] std::io::Error),
}

impl SnitchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SnitchError::NotFound(_))
    }
}
