use std::path::Path;
use std::process::Command;
use serde::Deserialize;
use tracing::debug;

use crate::error::JobError;

#[derive(Deserialize, Debug)]
struct FFProbeJsonOutput {
    pub format: Option<FFProbeJsonFormat>,
}

#[derive(Deserialize, Debug)]
struct FFProbeJsonFormat {
    pub duration: Option<String>,
}

/// Container-level duration of `path` in seconds.
pub fn probe_duration(ffprobe: &Path, path: &Path) -> Result<f64, JobError> {
    let output = Command::new(ffprobe)
        .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
        .arg(path)
        .output()?;
    if !output.status.success() {
        return Err(unreadable(path, &format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let duration = parse_duration(&stdout).map_err(|reason| unreadable(path, &reason))?;
    debug!(duration, path = %path.display(), "probed duration");
    Ok(duration)
}

pub fn parse_duration(json: &str) -> Result<f64, String> {
    let deserialized = serde_json::from_str::<FFProbeJsonOutput>(json)
        .map_err(|e| format!("unexpected ffprobe output ({e})"))?;
    let text = deserialized.format
        .and_then(|f| f.duration)
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(String::from("no duration reported"));
    }
    match text.parse::<f64>() {
        Ok(duration) if duration.is_finite() => Ok(duration),
        _ => Err(format!("duration '{text}' is not a number")),
    }
}

fn unreadable(path: &Path, reason: &str) -> JobError {
    JobError::DurationUnreadable {
        path: path.to_path_buf(),
        reason: String::from(reason),
    }
}
