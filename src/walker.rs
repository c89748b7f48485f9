//! Directory traversal and the uniform safety gates.
//!
//! Traversal prunes skip-list directories before descending, so excluded
//! trees such as dependency caches are never read. The gates (binary, size,
//! count) apply after candidate selection regardless of which discovery
//! strategy produced the set.

use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::classify;
use crate::config::Limits;
use crate::models::Candidate;
use crate::patterns::RuleSet;


/// Per-file selection policy applied during traversal.
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// Caller override patterns replace the default allowlist entirely.
    Override(&'a RuleSet),
    /// Default classification, optionally behind compiled ignore rules.
    Default { ignore: Option<&'a RuleSet> },
}

impl Selection<'_> {
    /// Whether a file passes this policy. `relative_path` uses forward
    /// slashes; `absolute_path` is only consulted for the shebang sniff.
    pub fn selects(&self, relative_path: &str, absolute_path: &Path) -> bool {
        match self {
            Selection::Override(rules) => rules.allows(relative_path),
            Selection::Default { ignore } => {
                if ignore.is_some_and(|rules| rules.ignores(relative_path)) {
                    return false;
                }
                classify::is_default_included(absolute_path)
            }
        }
    }
}

/// Depth-first traversal from `root`, yielding unordered candidates.
///
/// Skip-list directories are pruned before descent; files that fail the
/// selection policy or whose metadata cannot be read are dropped silently.
pub fn walk_candidates(root: &Path, selection: Selection<'_>) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !entry
                .file_name()
                .to_str()
                .is_some_and(classify::is_skip_dir)
    });

    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = rel_string(relative);

        if !selection.selects(&rel_str, path) {
            continue;
        }

        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        candidates.push(Candidate {
            relative_path: rel_str,
            absolute_path: path.to_path_buf(),
            byte_size: metadata.len(),
        });
    }

    candidates
}

/// Materialize a tracked listing into candidates.
///
/// The built-in skip-directory set still applies defensively, as does the
/// selection policy; listed paths that vanished before stat are dropped.
pub fn candidates_from_listing(
    root: &Path,
    listing: &[String],
    selection: Selection<'_>,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for rel_str in listing {
        if classify::has_skip_segment(rel_str) {
            continue;
        }
        let absolute = root.join(rel_str);
        if !selection.selects(rel_str, &absolute) {
            continue;
        }
        let Ok(metadata) = std::fs::metadata(&absolute) else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        candidates.push(Candidate {
            relative_path: rel_str.clone(),
            absolute_path: absolute,
            byte_size: metadata.len(),
        });
    }
    candidates
}

/// Apply the binary, size, and count gates and fix the output order.
///
/// Candidates are sorted lexicographically by relative path first, so the
/// count gate's truncation is deterministic: the first N sorted paths are
/// kept and the remainder dropped without error.
pub fn apply_gates(mut candidates: Vec<Candidate>, limits: &Limits) -> Vec<Candidate> {
    candidates.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    candidates.retain(|candidate| {
        if candidate.byte_size > limits.max_file_bytes {
            debug!(
                path = %candidate.relative_path,
                size = candidate.byte_size,
                "file exceeds size limit, skipped"
            );
            return false;
        }
        // Unconditional: applies even to override-matched paths.
        if is_binary(&candidate.absolute_path, limits.max_file_bytes) {
            warn!(path = %candidate.relative_path, "skipping binary file");
            return false;
        }
        true
    });

    if candidates.len() > limits.max_file_count {
        debug!(
            dropped = candidates.len() - limits.max_file_count,
            "file count limit reached, truncating"
        );
        candidates.truncate(limits.max_file_count);
    }

    candidates
}

/// Check the file for null bytes.
///
/// The read is bounded by `max_bytes`: the size gate runs first, so any
/// surviving candidate is inspected in full and no emitted content can
/// carry a null byte. Read failures count as binary so the file is
/// excluded either way; the handle is released when the function returns.
fn is_binary(path: &Path, max_bytes: u64) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return true;
    };
    let mut bytes = Vec::new();
    let mut bounded = file.take(max_bytes);
    if bounded.read_to_end(&mut bytes).is_err() {
        return true;
    }
    bytes.contains(&0)
}

/// Join path components with forward slashes regardless of host OS.
pub fn rel_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
