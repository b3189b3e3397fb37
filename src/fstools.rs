use std::fs;
use std::path::Path;

use crate::error::JobError;

#[derive(Debug, PartialEq)]
pub enum DirEntryCategory {
    DoesNotExist,
    RegularFile,
    SymbolicLink,
    Directory,
    Unknown,
}

pub fn classify_file(path: &Path) -> DirEntryCategory {
    // symlink_metadata so a dangling link is reported as a link, not as missing
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => match fs::metadata(path) {
            Ok(target) if target.is_file() => DirEntryCategory::RegularFile,
            Ok(_) => DirEntryCategory::SymbolicLink,
            Err(_) => DirEntryCategory::DoesNotExist,
        },
        Ok(metadata) => {
            if metadata.is_file() {
                DirEntryCategory::RegularFile
            } else if metadata.is_dir() {
                DirEntryCategory::Directory
            } else {
                DirEntryCategory::Unknown
            }
        },
        Err(_) => DirEntryCategory::DoesNotExist,
    }
}

/// Fails unless `path` names a readable regular file (or a link to one).
pub fn require_regular_file(path: &Path) -> Result<(), JobError> {
    let reason = match classify_file(path) {
        DirEntryCategory::RegularFile => return Ok(()),
        DirEntryCategory::DoesNotExist => "does not exist",
        DirEntryCategory::Directory => "is a directory",
        DirEntryCategory::SymbolicLink => "is a symlink to something other than a file",
        DirEntryCategory::Unknown => "is not a regular file",
    };
    Err(JobError::InputNotFound {
        path: path.to_path_buf(),
        reason: String::from(reason),
    })
}

pub fn file_size(path: &Path) -> Result<u64, JobError> {
    Ok(fs::metadata(path)?.len())
}
