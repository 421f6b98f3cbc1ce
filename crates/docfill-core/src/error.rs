use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("expected {expected} positional arguments, got {actual}")]
    ArgumentCount { expected: &'static str, actual: usize },
}
