use std::path::PathBuf;
use tracing::debug;

use crate::error::JobError;

pub mod encoder;
pub mod parameters;
pub mod probe;

pub const ENCODER: &str = "ffmpeg";
pub const PROBER: &str = "ffprobe";

/// Resolved locations of the external media tools.
#[derive(Clone, Debug)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Toolchain {
    /// Resolves every tool on `PATH`, failing on the first one missing.
    pub fn locate() -> Result<Self, JobError> {
        Ok(Toolchain {
            ffmpeg: resolve(ENCODER)?,
            ffprobe: resolve(PROBER)?,
        })
    }
}

fn resolve(tool: &'static str) -> Result<PathBuf, JobError> {
    match which::which(tool) {
        Ok(path) => {
            debug!(tool, path = %path.display(), "resolved external tool");
            Ok(path)
        },
        Err(_) => Err(JobError::MissingDependency(tool)),
    }
}
