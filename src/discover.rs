//! Candidate discovery strategies.
//!
//! Two strategies share one contract (produce the candidate path set):
//!
//! 1. `TrackedListing` — ask `git ls-files` for the tracked working set,
//!    bounded by a timeout. Any failure (git missing, non-zero exit,
//!    timeout, undecodable output) silently falls back to the walk; it is
//!    never surfaced as an error.
//! 2. `ManualWalk` — recursive traversal filtered by compiled ignore rules
//!    (see [`crate::walker`]).
//!
//! This module also locates nested ignore files and merges their rules in
//! ascending depth order, so deeper, more specific rules take precedence.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;
use walkdir::WalkDir;

use crate::classify;
use crate::patterns::{compile_ignore_lines, RuleSet};

/// The candidate source selected for one discovery call.
#[derive(Debug)]
pub enum Strategy {
    /// Paths reported tracked (or untracked-but-not-ignored) by git.
    Tracked(Vec<String>),
    /// Fall back to manual traversal.
    Walk,
}

/// Probe git for the tracked working set of `root`.
///
/// The listing runs with `root` as the working directory, so git locates
/// the enclosing repository itself — `root` may be any directory inside a
/// work tree, and the returned paths are relative to it. A non-zero exit
/// (including "not a git repository") selects the walk strategy.
pub fn select_strategy(root: &Path, timeout: Duration) -> Strategy {
    match git_tracked_files(root, timeout) {
        Some(paths) => Strategy::Tracked(paths),
        None => {
            debug!(root = %root.display(), "git listing unavailable, falling back to walk");
            Strategy::Walk
        }
    }
}

/// Run `git ls-files --cached --others --exclude-standard` with a deadline.
///
/// Stdout is drained on a separate thread so a large listing cannot fill the
/// pipe and deadlock the wait loop. On timeout the child is killed and
/// `None` returned.
fn git_tracked_files(root: &Path, timeout: Duration) -> Option<Vec<String>> {
    let mut child = Command::new("git")
        .args(["ls-files", "--cached", "--others", "--exclude-standard"])
        .current_dir(root)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .ok()?;

    let mut stdout = child.stdout.take()?;
    let reader = std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf);
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    debug!("git ls-files exceeded {:?}, killing", timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                std::thread::sleep(Duration::from_millis(25));
            }
            Err(_) => return None,
        }
    };

    let output = reader.join().ok()?;
    if !status.success() {
        return None;
    }

    let text = String::from_utf8(output).ok()?;
    Some(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Locate ignore files from `root` downward and compile them into one
/// ordered rule set, ascending by depth.
///
/// Traversal prunes the built-in skip directories, so ignore files inside
/// dependency caches are never read. Unreadable ignore files are skipped.
pub fn compile_ignore_rules(root: &Path) -> RuleSet {
    let mut sources: Vec<(usize, String, std::path::PathBuf)> = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry
                .file_name()
                .to_str()
                .is_some_and(classify::is_skip_dir)
    });

    for entry in walker.flatten() {
        if !entry.file_type().is_file() || entry.file_name().to_str() != Some(".gitignore") {
            continue;
        }
        let dir = entry.path().parent().unwrap_or(root);
        let relative = dir.strip_prefix(root).unwrap_or(dir);
        let prefix = if relative.as_os_str().is_empty() {
            String::new()
        } else {
            format!("{}/", crate::walker::rel_string(relative))
        };
        // depth of the ignore file's directory below root
        sources.push((entry.depth().saturating_sub(1), prefix, entry.into_path()));
    }

    sources.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

    let mut set = RuleSet::default();
    for (depth, prefix, path) in sources {
        let Ok(content) = std::fs::read_to_string(&path) else {
            debug!(path = %path.display(), "unreadable ignore file skipped");
            continue;
        };
        set.extend(compile_ignore_lines(&content, &prefix, depth));
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn non_repo_falls_back_to_walk() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            select_strategy(dir.path(), Duration::from_secs(5)),
            Strategy::Walk
        ));
    }

    #[test]
    fn nested_ignore_rules_merge_in_depth_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(".gitignore"), "!keep.log\n").unwrap();

        let rules = compile_ignore_rules(dir.path());
        assert!(rules.ignores("a.log"));
        assert!(rules.ignores("sub/other.log"));
        assert!(!rules.ignores("sub/keep.log"));
    }

    #[test]
    fn ignore_files_inside_skip_dirs_are_not_read() {
        let dir = TempDir::new().unwrap();
        let nm = dir.path().join("node_modules");
        fs::create_dir_all(&nm).unwrap();
        fs::write(nm.join(".gitignore"), "*.md\n").unwrap();

        let rules = compile_ignore_rules(dir.path());
        assert!(rules.is_empty());
    }

    #[test]
    fn missing_ignore_files_yield_empty_set() {
        let dir = TempDir::new().unwrap();
        let rules = compile_ignore_rules(dir.path());
        assert!(rules.is_empty());
    }
}
