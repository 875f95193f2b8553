use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// What the checker was pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Directory(PathBuf),
}

impl Target {
    /// Classify a path, rejecting anything that is neither a regular file
    /// nor a directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Target::Directory(path.to_path_buf())),
            Ok(meta) if meta.is_file() => Ok(Target::File(path.to_path_buf())),
            _ => Err(Error::TargetNotFileOrDir(path.to_path_buf())),
        }
    }
}

/// Whether a path carries one of the given extensions (case-sensitive).
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

/// Every matching file below `root`, in file-name order.
///
/// Entries that cannot be read are logged and skipped so one bad
/// subdirectory does not abort the walk.
pub fn walk(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("{}", Error::Walk(e));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        if has_extension(entry.path(), extensions) {
            documents.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), documents = documents.len(), "walked directory");
    documents
}
