//! Tree-summary rendering for project mode.
//!
//! Builds a node forest from the final (post-gate) path set and renders it
//! depth-first with two-space indentation: directories before files at each
//! level, alphabetical within each group. Because the input is exactly the
//! emitted path set, the rendered tree is always consistent with the
//! fragments that follow it.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TreeNode {
    children: BTreeMap<String, TreeNode>,
    is_file: bool,
}

impl TreeNode {
    fn insert(&mut self, path: &str) {
        let mut node = self;
        for segment in path.split('/') {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.is_file = true;
    }

    fn render_into(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        let (dirs, files): (Vec<_>, Vec<_>) = self
            .children
            .iter()
            .partition(|(_, child)| !child.is_file);

        for (name, child) in dirs {
            out.push_str(&indent);
            out.push_str(name);
            out.push_str("/\n");
            child.render_into(depth + 1, out);
        }
        for (name, _) in files {
            out.push_str(&indent);
            out.push_str(name);
            out.push('\n');
        }
    }
}

/// Render an indented tree for the given relative paths.
///
/// Paths use forward-slash separators; the result has one line per directory
/// (with a trailing `/`) or file, and no trailing newline.
pub fn render(paths: &[String]) -> String {
    let mut root = TreeNode::default();
    for path in paths {
        root.insert(path);
    }

    let mut out = String::new();
    root.render_into(0, &mut out);
    out.truncate(out.trim_end_matches('\n').len());
    out
}
