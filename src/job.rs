use std::path::{Path, PathBuf};

use crate::error::JobError;

pub const DEFAULT_TARGET_MB: f64 = 15.5;
pub const DEFAULT_AUDIO_KBPS: f64 = 96.0;
const OUTPUT_SUFFIX: &str = "-16mb.mp4";
const PASSLOG_SUFFIX: &str = "-2pass";

/// Raw command-line values, before validation.
#[derive(Debug)]
pub struct JobOptions {
    pub input: Option<String>,
    pub output: Option<String>,
    pub target_mb: f64,
    pub audio_kbps: f64,
    pub keep_logs: bool,
    pub dry_run: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EncodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub target_mb: f64,
    pub audio_kbps: f64,
    pub keep_logs: bool,
    pub dry_run: bool,
}

impl EncodeJob {
    pub fn from_options(options: JobOptions) -> Result<Self, JobError> {
        let input = match options.input {
            Some(input) if !input.is_empty() => PathBuf::from(input),
            _ => return Err(JobError::Usage(String::from("Missing required option -i/--input."))),
        };
        require_positive("--target-mb", options.target_mb)?;
        require_positive("--audio-kbps", options.audio_kbps)?;

        let output = match options.output {
            Some(output) if !output.is_empty() => PathBuf::from(output),
            _ => default_output_path(&input),
        };

        Ok(EncodeJob {
            input,
            output,
            target_mb: options.target_mb,
            audio_kbps: options.audio_kbps,
            keep_logs: options.keep_logs,
            dry_run: options.dry_run,
        })
    }

    /// Prefix handed to ffmpeg's `-passlogfile`, next to the output file.
    pub fn passlog_prefix(&self) -> PathBuf {
        let stem = self.output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("ffmpeg2pass"));
        self.output.with_file_name(format!("{stem}{PASSLOG_SUFFIX}"))
    }
}

pub fn default_output_path(input: &Path) -> PathBuf {
    match input.file_stem() {
        Some(file_stem) => input.with_file_name(format!("{}{OUTPUT_SUFFIX}", file_stem.to_string_lossy())),
        None => PathBuf::from(format!("output{OUTPUT_SUFFIX}")),
    }
}

fn require_positive(flag: &str, value: f64) -> Result<(), JobError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(JobError::Usage(format!("{flag} must be a positive number, got {value}.")))
    }
}
