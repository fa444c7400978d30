use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to run pdftotext on {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pdftotext exited with {status} for {path}: {stderr}")]
    CommandFailed {
        path: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Invalid year range: {0}")]
    InvalidYear(String),

    #[error("Invalid price range: {0}")]
    InvalidPrice(String),
}
