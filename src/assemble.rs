//! Fragment assembly.
//!
//! Reads each gated file and wraps its content with a filename header.
//! A file that cannot be read anymore (permissions changed, removed between
//! listing and read) is skipped; one bad file never aborts the batch.

use tracing::warn;

use crate::models::{Candidate, Fragment};

/// Name given to the tree-summary fragment in project mode.
pub const TREE_SUMMARY_NAME: &str = "FILE_TREE";

/// Header wrapper for one file's content.
pub fn wrap_content(relative_path: &str, content: &str) -> String {
    format!("--- {relative_path} ---\n{content}")
}

/// Read the gated candidates and emit the final ordered fragment sequence.
///
/// Ordinals run 0..n-1 in input order; when a tree summary is present it
/// occupies ordinal 0 and file fragments shift by one. Content is decoded as
/// lossy UTF-8 (the binary gate already rejected files with null bytes).
pub fn assemble(candidates: &[Candidate], tree_summary: Option<String>) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(candidates.len() + 1);

    if let Some(summary) = tree_summary {
        fragments.push(Fragment {
            relative_path: TREE_SUMMARY_NAME.to_string(),
            content: summary,
            ordinal: 0,
        });
    }

    for candidate in candidates {
        let raw = match std::fs::read(&candidate.absolute_path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %candidate.relative_path, %err, "unreadable file skipped");
                continue;
            }
        };
        let content = String::from_utf8_lossy(&raw);
        fragments.push(Fragment {
            relative_path: candidate.relative_path.clone(),
            content: wrap_content(&candidate.relative_path, &content),
            ordinal: fragments.len(),
        });
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn candidate(dir: &TempDir, rel: &str, content: &str) -> Candidate {
        let abs = dir.path().join(rel);
        fs::write(&abs, content).unwrap();
        Candidate {
            relative_path: rel.to_string(),
            absolute_path: abs,
            byte_size: content.len() as u64,
        }
    }

    #[test]
    fn fragments_are_wrapped_and_ordered() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![
            candidate(&dir, "a.md", "alpha"),
            candidate(&dir, "b.md", "beta"),
        ];

        let fragments = assemble(&candidates, None);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].content, "--- a.md ---\nalpha");
        assert_eq!(fragments[0].ordinal, 0);
        assert_eq!(fragments[1].content, "--- b.md ---\nbeta");
        assert_eq!(fragments[1].ordinal, 1);
    }

    #[test]
    fn tree_summary_takes_ordinal_zero() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![candidate(&dir, "a.md", "alpha")];

        let fragments = assemble(&candidates, Some("Project: demo\n\na.md".to_string()));
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].relative_path, TREE_SUMMARY_NAME);
        assert_eq!(fragments[0].ordinal, 0);
        assert_eq!(fragments[1].relative_path, "a.md");
        assert_eq!(fragments[1].ordinal, 1);
    }

    #[test]
    fn vanished_file_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let mut gone = candidate(&dir, "gone.md", "x");
        fs::remove_file(&gone.absolute_path).unwrap();
        gone.byte_size = 1;
        let candidates = vec![gone, candidate(&dir, "here.md", "still here")];

        let fragments = assemble(&candidates, None);
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].relative_path, "here.md");
        assert_eq!(fragments[0].ordinal, 0);
    }
}
