use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {name}")]
    NotFound { name: String },

    #[error("copy error: {0}")]
    Copy(String),

    #[error("list error: {0}")]
    List(String),

    #[error("replace error: {0}")]
    Replace(String),

    #[error("save error: {0}")]
    Save(String),

    #[error("PDF export error: {0}")]
    Export(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("trash error: {0}")]
    Trash(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
