use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Suffixes x264 appends to the `-passlogfile` prefix.
pub const LOG_SUFFIXES: [&str; 2] = ["-0.log", "-0.log.mbtree"];

/// Owns the two-pass statistics files for the lifetime of an encode.
///
/// The files are only removed once [`PassLog::mark_complete`] has been called
/// (after the final pass succeeded) and `keep` is false. Removal happens on
/// drop, so it still runs when a later step returns early.
#[derive(Debug)]
pub struct PassLog {
    prefix: PathBuf,
    keep: bool,
    complete: bool,
}

impl PassLog {
    pub fn new(prefix: PathBuf, keep: bool) -> Self {
        PassLog {
            prefix,
            keep,
            complete: false,
        }
    }

    pub fn files(&self) -> Vec<PathBuf> {
        LOG_SUFFIXES
            .iter()
            .map(|suffix| {
                let mut name = OsString::from(self.prefix.as_os_str());
                name.push(suffix);
                PathBuf::from(name)
            })
            .collect()
    }

    pub fn mark_complete(&mut self) {
        self.complete = true;
    }
}

impl Drop for PassLog {
    fn drop(&mut self) {
        if !self.complete || self.keep {
            return;
        }
        for file in self.files() {
            match fs::remove_file(&file) {
                Ok(()) => debug!(file = %file.display(), "removed two-pass log"),
                Err(err) if err.kind() == ErrorKind::NotFound => (),
                Err(err) => warn!(file = %file.display(), %err, "unable to remove two-pass log"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(name: &str, keep: bool) -> PassLog {
        let prefix = std::env::temp_dir().join(format!("encode-16mb-passlog-{}-{name}", std::process::id()));
        let log = PassLog::new(prefix, keep);
        for file in log.files() {
            fs::write(file, b"stats").unwrap();
        }
        log
    }

    #[test]
    fn test_file_names() {
        let log = PassLog::new(PathBuf::from("out/clip-16mb-2pass"), false);
        assert_eq!(log.files(), vec![
            PathBuf::from("out/clip-16mb-2pass-0.log"),
            PathBuf::from("out/clip-16mb-2pass-0.log.mbtree"),
        ]);
    }

    #[test]
    fn test_removed_after_success() {
        let mut log = seeded("removed", false);
        let files = log.files();
        log.mark_complete();
        drop(log);
        assert!(files.iter().all(|f| !f.exists()));
    }

    #[test]
    fn test_kept_with_keep_logs() {
        let mut log = seeded("kept", true);
        let files = log.files();
        log.mark_complete();
        drop(log);
        assert!(files.iter().all(|f| f.exists()));
        for file in files {
            fs::remove_file(file).unwrap();
        }
    }

    #[test]
    fn test_kept_when_encode_never_finished() {
        let log = seeded("unfinished", false);
        let files = log.files();
        drop(log);
        assert!(files.iter().all(|f| f.exists()));
        for file in files {
            fs::remove_file(file).unwrap();
        }
    }

    #[test]
    fn test_missing_files_are_ignored() {
        let mut log = PassLog::new(std::env::temp_dir().join("encode-16mb-passlog-never-written"), false);
        log.mark_complete();
        drop(log);
    }
}
