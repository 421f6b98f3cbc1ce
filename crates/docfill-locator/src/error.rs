use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("key column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("no record found with {column} = {key:?}")]
    RecordNotFound { column: String, key: String },

    #[error("AppSheet API returned status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("unrecognized AppSheet response shape: {0}")]
    UnexpectedShape(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("sheet access error: {0}")]
    Sheet(String),

    #[error("link-back is not supported by this source")]
    WriteBackUnsupported,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
