//! Core data types used throughout the fragment pipeline.
//!
//! These types represent the candidates and fragments that flow through the
//! discovery, gating, and assembly stages.

use std::path::PathBuf;

/// How a request derives its candidate file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Recursive traversal of all recognized text files.
    Folder,
    /// Version-control aware discovery with a leading tree summary.
    Project,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Folder => "folder",
            Mode::Project => "project",
        }
    }
}

/// A file selected by a discovery strategy, before the safety gates.
///
/// Ephemeral: produced by discovery, consumed by the gating stage, never
/// retained across calls.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Path relative to the request root, forward-slash separated on all
    /// platforms.
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub byte_size: u64,
}

/// One unit of output: a whole file's contents wrapped with a path header,
/// or the tree summary in project mode.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub relative_path: String,
    pub content: String,
    pub ordinal: usize,
}
