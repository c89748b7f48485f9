//! Error taxonomy for fragment loading.
//!
//! Only caller mistakes are fatal: a bad root path, a malformed override
//! pattern, or a request that selects nothing. Every environment-dependent
//! condition (git unavailable or timing out, a file vanishing between listing
//! and read, binary or oversized files) is absorbed by the pipeline and
//! degrades to fewer fragments instead of an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid fragment request '{0}': expected <mode>:<path>[?glob=<patterns>] with mode 'folder' or 'project'")]
    InvalidRequest(String),

    #[error("no text files found in '{0}'")]
    NoFilesFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
