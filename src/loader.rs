//! Request parsing and pipeline orchestration.
//!
//! Coordinates the full flow: strategy selection → candidate set →
//! filtering → gates → stable ordering → assembly, with the tree summary
//! prepended in project mode. This is the only module callers need; the
//! request grammar is `<mode>:<path>[?glob=<pattern-list>]`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::assemble;
use crate::config::Limits;
use crate::discover::{self, Strategy};
use crate::error::FragmentError;
use crate::models::{Candidate, Fragment, Mode};
use crate::patterns;
use crate::tree;
use crate::walker::{self, Selection};

/// A parsed fragment request.
#[derive(Debug, Clone)]
pub struct FragmentRequest {
    pub mode: Mode,
    pub root: PathBuf,
    /// Override patterns; when present they replace the default allowlist.
    pub patterns: Option<Vec<String>>,
}

/// Parse `<mode>:<path>[?glob=<pattern-list>]`.
///
/// An empty path component defaults to `.`. Home-directory shorthand is the
/// caller's job to resolve before the request reaches the core.
pub fn parse_request(input: &str) -> Result<FragmentRequest, FragmentError> {
    let Some((mode_str, rest)) = input.split_once(':') else {
        return Err(FragmentError::InvalidRequest(input.to_string()));
    };
    let mode = match mode_str {
        "folder" => Mode::Folder,
        "project" => Mode::Project,
        _ => return Err(FragmentError::InvalidRequest(input.to_string())),
    };

    let (path_str, patterns) = match rest.split_once("?glob=") {
        Some((path, list)) => {
            let patterns: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if patterns.is_empty() {
                return Err(FragmentError::InvalidRequest(input.to_string()));
            }
            (path, Some(patterns))
        }
        None => (rest, None),
    };

    let path_str = if path_str.is_empty() { "." } else { path_str };

    Ok(FragmentRequest {
        mode,
        root: PathBuf::from(path_str),
        patterns,
    })
}

/// Run one discovery call and return the ordered fragment sequence.
///
/// Fatal errors are limited to a bad root, a malformed override pattern,
/// and an empty result set; everything else degrades to fewer fragments.
pub fn load_fragments(
    request: &FragmentRequest,
    limits: &Limits,
) -> Result<Vec<Fragment>, FragmentError> {
    if !request.root.exists() {
        return Err(FragmentError::RootNotFound(request.root.clone()));
    }
    if !request.root.is_dir() {
        return Err(FragmentError::RootNotADirectory(request.root.clone()));
    }
    let root = request.root.canonicalize()?;
    debug!(mode = request.mode.as_str(), root = %root.display(), "loading fragments");

    // Compile overrides up front so a caller mistake fails before any I/O.
    let override_rules = request
        .patterns
        .as_deref()
        .map(patterns::compile_override)
        .transpose()?;

    let candidates = discover_candidates(&root, request.mode, override_rules.as_ref(), limits);
    let candidates = walker::apply_gates(candidates, limits);
    if candidates.is_empty() {
        return Err(FragmentError::NoFilesFound(request.root.clone()));
    }

    let tree_summary = match request.mode {
        Mode::Project => Some(render_summary(&root, &candidates)),
        Mode::Folder => None,
    };

    Ok(assemble::assemble(&candidates, tree_summary))
}

fn discover_candidates(
    root: &Path,
    mode: Mode,
    override_rules: Option<&patterns::RuleSet>,
    limits: &Limits,
) -> Vec<Candidate> {
    match mode {
        Mode::Folder => {
            let selection = match override_rules {
                Some(rules) => Selection::Override(rules),
                None => Selection::Default { ignore: None },
            };
            walker::walk_candidates(root, selection)
        }
        Mode::Project => match discover::select_strategy(root, limits.git_timeout) {
            Strategy::Tracked(listing) => {
                debug!(files = listing.len(), "using tracked listing");
                // Git already honored ignore rules for this listing.
                let selection = match override_rules {
                    Some(rules) => Selection::Override(rules),
                    None => Selection::Default { ignore: None },
                };
                walker::candidates_from_listing(root, &listing, selection)
            }
            Strategy::Walk => {
                let ignore_rules = discover::compile_ignore_rules(root);
                let selection = match override_rules {
                    Some(rules) => Selection::Override(rules),
                    None => Selection::Default {
                        ignore: (!ignore_rules.is_empty()).then_some(&ignore_rules),
                    },
                };
                walker::walk_candidates(root, selection)
            }
        },
    }
}

/// Project header plus the indented tree for the final path set.
fn render_summary(root: &Path, candidates: &[Candidate]) -> String {
    let paths: Vec<String> = candidates
        .iter()
        .map(|c| c.relative_path.clone())
        .collect();
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());
    format!("Project: {}\n\n{}", name, tree::render(&paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_folder_request() {
        let req = parse_request("folder:./docs").unwrap();
        assert_eq!(req.mode, Mode::Folder);
        assert_eq!(req.root, PathBuf::from("./docs"));
        assert!(req.patterns.is_none());
    }

    #[test]
    fn parses_project_request_with_globs() {
        let req = parse_request("project:.?glob=*.md,!secret.md").unwrap();
        assert_eq!(req.mode, Mode::Project);
        assert_eq!(req.root, PathBuf::from("."));
        assert_eq!(
            req.patterns.as_deref(),
            Some(&["*.md".to_string(), "!secret.md".to_string()][..])
        );
    }

    #[test]
    fn empty_path_defaults_to_current_dir() {
        let req = parse_request("folder:").unwrap();
        assert_eq!(req.root, PathBuf::from("."));
    }

    #[test]
    fn rejects_unknown_mode_and_missing_colon() {
        assert!(matches!(
            parse_request("files:./docs"),
            Err(FragmentError::InvalidRequest(_))
        ));
        assert!(matches!(
            parse_request("no-colon-here"),
            Err(FragmentError::InvalidRequest(_))
        ));
    }

    #[test]
    fn rejects_empty_glob_list() {
        assert!(matches!(
            parse_request("folder:.?glob=,,"),
            Err(FragmentError::InvalidRequest(_))
        ));
    }
}
