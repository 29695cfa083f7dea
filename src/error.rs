use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackfigError {
    #[error("cannot parse '{raw}' as {expected} for field '{path}'")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        raw: String,
    },

    #[error("required field '{path}' is not set")]
    MissingRequired { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no adapter for config file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("cannot overlay source onto config object: {reason}")]
    Merge { reason: String },
}
