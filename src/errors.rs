use camino::Utf8PathBuf;
use thiserror::Error;

/// Error taxonomy of the fetch pipeline.
///
/// Only [`OrbitsError::UnknownPhase`] and data-directory creation abort a
/// run. Transport and persistence failures are surfaced to the caller of
/// the individual operation, logged there, and the run continues with
/// whatever data was gathered.
#[derive(Error, Debug)]
pub enum OrbitsError {
    #[error("unknown phase: {0}")]
    UnknownPhase(String),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("output file {0} missing or empty after write")]
    EmptyOutput(Utf8PathBuf),
}
