use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while reading inputs, generating rows or writing outputs.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("input CSV not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("{} has no header row", .path.display())]
    MissingHeader { path: PathBuf },
    #[error(
        "required column '{column}' not found in {}. Headers: [{}]",
        .path.display(),
        .headers.join(", ")
    )]
    MissingColumn {
        column: String,
        path: PathBuf,
        headers: Vec<String>,
    },
    #[error("no '{column}' values found in {}", .path.display())]
    EmptyColumn { column: String, path: PathBuf },
    #[error("invalid {column} value '{value}' in {}", .path.display())]
    InvalidValue {
        column: String,
        value: String,
        path: PathBuf,
    },
    #[error(transparent)]
    Core(#[from] mockseed_core::Error),
    #[error("password hashing is unavailable: built without the `bcrypt` feature")]
    HashingUnavailable,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::Core(mockseed_core::Error::InvalidArgument(message.into()))
    }
}
