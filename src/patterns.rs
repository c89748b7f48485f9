//! Gitignore-style pattern compilation and matching.
//!
//! Rules are compiled individually on top of `globset` and evaluated in
//! order with last-match-wins precedence, mirroring git's cascading
//! semantics. The same [`RuleSet`] machinery backs both caller override
//! patterns (allowlist interpretation) and ignore-file rules (denylist
//! interpretation); only the default for unmatched paths differs, and that
//! decision belongs to the discovery pipeline.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::FragmentError;

/// One compiled rule. Ordering among rules is significant.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Original pattern text, for diagnostics.
    pub pattern: String,
    /// `!`-prefixed rules flip the verdict of earlier matches.
    pub is_negation: bool,
    /// Rules with a trailing `/` match only directory prefixes.
    pub dir_only: bool,
    /// Depth of the ignore file this rule came from (0 for root and for
    /// override patterns). Deeper rules are appended later and so win ties.
    pub source_depth: usize,
    matcher: GlobMatcher,
}

/// Ordered rule sequence; the last matching rule decides.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

/// Outcome of evaluating a path against a [`RuleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No rule matched.
    None,
    /// The last matching rule was a plain pattern.
    Hit,
    /// The last matching rule was a negation.
    Negated,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    /// Evaluate a relative path (forward-slash separated) against all rules
    /// in order; the last matching rule determines the verdict.
    pub fn evaluate(&self, relative_path: &str) -> Verdict {
        let mut verdict = Verdict::None;
        for rule in &self.rules {
            if rule.matches(relative_path) {
                verdict = if rule.is_negation {
                    Verdict::Negated
                } else {
                    Verdict::Hit
                };
            }
        }
        verdict
    }

    /// Allowlist interpretation: plain pattern includes, negation excludes,
    /// unmatched paths are excluded.
    pub fn allows(&self, relative_path: &str) -> bool {
        self.evaluate(relative_path) == Verdict::Hit
    }

    /// Denylist interpretation: plain pattern ignores, negation re-includes,
    /// unmatched paths are not ignored.
    pub fn ignores(&self, relative_path: &str) -> bool {
        self.evaluate(relative_path) == Verdict::Hit
    }
}

impl Rule {
    /// Whether this rule matches a candidate file path.
    ///
    /// Directory-only rules match when the glob matches any directory prefix
    /// of the path. Plain rules also match directory prefixes, so a rule
    /// naming a directory excludes everything beneath it, as git does.
    fn matches(&self, relative_path: &str) -> bool {
        if !self.dir_only && self.matcher.is_match(relative_path) {
            return true;
        }
        for prefix in dir_prefixes(relative_path) {
            if self.matcher.is_match(prefix) {
                return true;
            }
        }
        false
    }
}

/// Proper directory prefixes of a path: for `a/b/c.txt`, yields `a`, `a/b`.
fn dir_prefixes(relative_path: &str) -> impl Iterator<Item = &str> {
    relative_path
        .char_indices()
        .filter(|&(_, c)| c == '/')
        .map(|(i, _)| &relative_path[..i])
}

/// Compile one pattern line into a rule, or `None` for blanks and comments.
///
/// `source_prefix` is the rule's source directory relative to the root
/// (empty, or `"sub/dir/"` with a trailing slash), so nested-file rules only
/// apply beneath their directory. Normalizations follow git:
/// a leading `!` marks negation; a trailing `/` marks directory-only; a
/// pattern containing no `/` floats to any depth; a leading `/` anchors it
/// to the source directory.
pub fn compile_rule(
    raw: &str,
    source_prefix: &str,
    source_depth: usize,
) -> Result<Option<Rule>, FragmentError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (is_negation, rest) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    let (dir_only, rest) = match rest.strip_suffix('/') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    if rest.is_empty() {
        return Ok(None);
    }

    let (anchored, body) = match rest.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (rest.contains('/'), rest),
    };

    let glob_text = if anchored {
        format!("{source_prefix}{body}")
    } else {
        format!("{source_prefix}**/{body}")
    };

    let matcher = GlobBuilder::new(&glob_text)
        .literal_separator(true)
        .build()
        .map_err(|source| FragmentError::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?
        .compile_matcher();

    Ok(Some(Rule {
        pattern: raw.to_string(),
        is_negation,
        dir_only,
        source_depth,
        matcher,
    }))
}

/// Compile caller override patterns into a rule set.
///
/// Any unparseable expression is fatal: it indicates a caller mistake rather
/// than environment variability.
pub fn compile_override(patterns: &[String]) -> Result<RuleSet, FragmentError> {
    let mut set = RuleSet::default();
    for pattern in patterns {
        if let Some(rule) = compile_rule(pattern, "", 0)? {
            set.push(rule);
        }
    }
    Ok(set)
}

/// Compile the body of one ignore file into rules tagged with its depth.
///
/// Lines that fail to compile are dropped rather than surfaced: a malformed
/// line in someone's `.gitignore` is environment variability, not a caller
/// mistake.
pub fn compile_ignore_lines(content: &str, source_prefix: &str, source_depth: usize) -> RuleSet {
    let mut set = RuleSet::default();
    for line in content.lines() {
        if let Ok(Some(rule)) = compile_rule(line, source_prefix, source_depth) {
            set.push(rule);
        }
    }
    set
}
