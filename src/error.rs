use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the dictionary loader, the document checker and the
/// configuration layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The dictionary stream failed part-way; no partial dictionary is usable.
    #[error("failed to read dictionary: {0}")]
    DictionaryRead(#[source] io::Error),

    #[error("unable to access dictionary file {path}: {source}")]
    DictionaryOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("the dictionary path provided is not a file: {0}")]
    DictionaryNotFile(PathBuf),

    /// A document failed to open or became unreadable mid-stream.
    #[error("failed to read file {path}: {source}")]
    DocumentRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("the path provided is not a file or directory: {0}")]
    TargetNotFileOrDir(PathBuf),

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
