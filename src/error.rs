use thiserror::Error;

pub type Result<T> = std::result::Result<T, JournalError>;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("Malformed trade record, field `{field}`: {reason}")]
    MalformedRecord { field: String, reason: String },

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("{0} export is not implemented yet")]
    NotImplemented(String),

    #[error("Trade {trade_id} not found or not owned by user")]
    TradeNotFound { trade_id: u64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JournalError {
    pub fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        JournalError::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(field: &str, reason: impl Into<String>) -> Self {
        JournalError::MalformedRecord {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
