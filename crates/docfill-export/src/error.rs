use thiserror::Error;

use docfill_core::error::CoreError;
use docfill_locator::error::LocatorError;
use docfill_store::error::StoreError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("record lookup failed: {0}")]
    Locate(#[from] LocatorError),

    #[error("cannot access {resource}: {cause}")]
    Resource { resource: String, cause: String },

    #[error("rendering failed: {0}")]
    Render(StoreError),

    #[error("PDF export failed: {0}")]
    Export(StoreError),
}
