use std::fmt::Display;
use std::path::Path;
use human_repr::HumanCount;

use crate::error::JobError;
use crate::fstools::file_size;

pub const WINDOW_LOW_MB: f64 = 15.0;
pub const WINDOW_HIGH_MB: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeVerdict {
    Below,
    Within,
    Above,
}

impl SizeVerdict {
    pub fn classify(bytes: u64) -> Self {
        let mb = bytes_to_mb(bytes);
        if mb > WINDOW_HIGH_MB {
            SizeVerdict::Above
        } else if mb < WINDOW_LOW_MB {
            SizeVerdict::Below
        } else {
            SizeVerdict::Within
        }
    }
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Advisory outcome of an encode; every verdict is a successful run.
#[derive(Debug)]
pub struct SizeReport {
    pub bytes: u64,
    pub verdict: SizeVerdict,
}

impl SizeReport {
    pub fn for_bytes(bytes: u64) -> Self {
        SizeReport {
            bytes,
            verdict: SizeVerdict::classify(bytes),
        }
    }

    pub fn for_file(path: &Path) -> Result<Self, JobError> {
        Ok(SizeReport::for_bytes(file_size(path)?))
    }

    pub fn mb(&self) -> f64 {
        bytes_to_mb(self.bytes)
    }
}

impl Display for SizeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = format!("{:.2} MB ({})", self.mb(), self.bytes.human_count_bytes());
        match self.verdict {
            SizeVerdict::Within => write!(f, "Output is {size}, within the {WINDOW_LOW_MB}-{WINDOW_HIGH_MB} MB window."),
            SizeVerdict::Above => write!(f, "Warning: output is {size}, above {WINDOW_HIGH_MB} MB. Re-run with a lower --target-mb."),
            SizeVerdict::Below => write!(f, "Note: output is {size}, below {WINDOW_LOW_MB} MB. Re-run with a higher --target-mb for better quality."),
        }
    }
}
