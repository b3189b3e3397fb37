use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Usage(String),

    #[error("Input {path:?} not found: {reason}.")]
    InputNotFound { path: PathBuf, reason: String },

    #[error("Missing dependency: {0} was not found on PATH.")]
    MissingDependency(&'static str),

    #[error("Unable to read the duration of {path:?}: {reason}.")]
    DurationUnreadable { path: PathBuf, reason: String },

    #[error("Bitrate planning failed: duration {0}s gives no usable bitrate.")]
    Planning(f64),

    #[error("ffmpeg pass {pass} failed: {reason}.")]
    EncodePass { pass: u8, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl JobError {
    pub fn is_usage(&self) -> bool {
        matches!(self, JobError::Usage(_))
    }
}
