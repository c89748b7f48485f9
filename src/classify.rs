//! Default text-file classification.
//!
//! When a request carries no override patterns, files are admitted by a fixed
//! allowlist: exact special filenames, a multi-category extension set, a
//! dotfile set, and a shebang sniff for extensionless files. The tables are
//! process-wide constants, read-only after initialization.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

/// Extensions (without the leading dot, lowercase) considered text.
static TEXT_EXTENSIONS: &[&str] = &[
    // Documents
    "md", "qmd", "txt", "rst", "adoc", "tex", "org",
    // Code
    "py", "js", "ts", "jsx", "tsx", "rb", "go", "rs", "java", "c", "cpp", "h", "hpp", "cs",
    "swift", "kt", "scala", "r", "jl", "lua", "pl", "pm", "php", "sh", "bash", "zsh", "fish",
    "ps1", "bat", "cmd",
    // Web
    "html", "htm", "css", "scss", "sass", "less", "svg", "xml", "xsl",
    // Data / Config
    "json", "yaml", "yml", "toml", "ini", "cfg", "conf", "env", "properties", "csv", "tsv",
    // Build / CI
    "dockerfile", "makefile", "cmake", "gradle", "sbt",
    // Other
    "sql", "graphql", "proto", "tf", "hcl", "ipynb", "bib", "vim", "el",
];

/// Exact filenames that are always text, regardless of extension.
static SPECIAL_FILENAMES: &[&str] = &[
    // Build / project files
    "Makefile",
    "Dockerfile",
    "Jenkinsfile",
    "Vagrantfile",
    "Procfile",
    "Gemfile",
    "Rakefile",
    "Brewfile",
    "CMakeLists.txt",
    // Documentation
    "LICENSE",
    "LICENCE",
    "COPYING",
    "README",
    "CHANGELOG",
    "CHANGES",
    "AUTHORS",
    "CONTRIBUTING",
    "CLAUDE.md",
];

/// Dotfiles that are always text.
static TEXT_DOTFILES: &[&str] = &[
    // Shell
    ".bashrc",
    ".bash_profile",
    ".bash_login",
    ".bash_logout",
    ".profile",
    ".zshrc",
    ".zprofile",
    ".zshenv",
    ".zlogin",
    ".zlogout",
    // Editor / tools
    ".vimrc",
    ".gvimrc",
    ".nanorc",
    ".inputrc",
    ".tmux.conf",
    // Git
    ".gitignore",
    ".gitconfig",
    ".gitattributes",
    ".gitmodules",
    // Other config
    ".dockerignore",
    ".editorconfig",
    ".env.example",
    ".eslintrc",
    ".prettierrc",
    ".flake8",
    ".pylintrc",
    ".npmrc",
    ".yarnrc",
    ".curlrc",
    ".wgetrc",
    ".screenrc",
    ".hushlogin",
];

/// Directory names pruned before descent, at any depth.
static SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    ".tox",
    ".nox",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    "venv",
    ".venv",
    "env",
    ".env",
    ".eggs",
    "dist",
    "build",
    ".idea",
    ".vscode",
    ".DS_Store",
];

static TEXT_EXTENSION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TEXT_EXTENSIONS.iter().copied().collect());
static SPECIAL_FILENAME_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SPECIAL_FILENAMES.iter().copied().collect());
static TEXT_DOTFILE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TEXT_DOTFILES.iter().copied().collect());
static SKIP_DIR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SKIP_DIRS.iter().copied().collect());

/// Whether a directory name should be pruned during traversal.
///
/// `*.egg-info` directories are matched by suffix in addition to the exact
/// skip set.
pub fn is_skip_dir(name: &str) -> bool {
    SKIP_DIR_SET.contains(name) || name.ends_with(".egg-info")
}

/// Whether any path segment names a skipped directory.
///
/// Applied defensively to tracked listings, which bypass traversal pruning.
pub fn has_skip_segment(relative_path: &str) -> bool {
    relative_path.split('/').any(is_skip_dir)
}

/// Whether a file is admitted by the default allowlist.
///
/// Decision order: exact special filename, extension, dotfile name, then a
/// shebang sniff (first two bytes `#!`) for extensionless files. Anything
/// else is excluded.
pub fn is_default_included(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    if SPECIAL_FILENAME_SET.contains(name) {
        return true;
    }

    let extension = path.extension().and_then(|e| e.to_str());
    if let Some(ext) = extension {
        if TEXT_EXTENSION_SET.contains(ext.to_lowercase().as_str()) {
            return true;
        }
    }

    if TEXT_DOTFILE_SET.contains(name) {
        return true;
    }

    extension.is_none() && has_shebang(path)
}

/// Read the first two bytes and check for the `#!` marker.
///
/// The read is bounded to exactly two bytes; any I/O failure counts as
/// "not a script".
fn has_shebang(path: &Path) -> bool {
    let Ok(mut file) = std::fs::File::open(path) else {
        return false;
    };
    let mut first = [0u8; 2];
    match file.read_exact(&mut first) {
        Ok(()) => first == *b"#!",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn extensions_are_recognized() {
        assert!(is_default_included(Path::new("notes.md")));
        assert!(is_default_included(Path::new("src/main.rs")));
        assert!(is_default_included(Path::new("app.py")));
        assert!(is_default_included(Path::new("config.yaml")));
        assert!(!is_default_included(Path::new("photo.png")));
        assert!(!is_default_included(Path::new("app.exe")));
        assert!(!is_default_included(Path::new("trace.log")));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_default_included(Path::new("README.MD")));
        assert!(is_default_included(Path::new("data.JSON")));
    }

    #[test]
    fn special_filenames_are_recognized() {
        assert!(is_default_included(Path::new("Makefile")));
        assert!(is_default_included(Path::new("Dockerfile")));
        assert!(is_default_included(Path::new("LICENSE")));
        assert!(is_default_included(Path::new("sub/README")));
    }

    #[test]
    fn dotfiles_are_recognized() {
        assert!(is_default_included(Path::new(".bashrc")));
        assert!(is_default_included(Path::new(".gitignore")));
        // Has a bogus "extension" but is still on the dotfile allowlist.
        assert!(is_default_included(Path::new(".env.example")));
        assert!(!is_default_included(Path::new(".unknownrc")));
    }

    #[test]
    fn shebang_admits_extensionless_scripts() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("deploy");
        fs::write(&script, "#!/bin/sh\necho hi\n").unwrap();
        assert!(is_default_included(&script));

        let plain = dir.path().join("unknownfile");
        fs::write(&plain, "just text\n").unwrap();
        assert!(!is_default_included(&plain));

        let empty = dir.path().join("emptyfile");
        fs::write(&empty, "").unwrap();
        assert!(!is_default_included(&empty));
    }

    #[test]
    fn skip_dirs_match_exact_names_and_egg_info() {
        assert!(is_skip_dir(".git"));
        assert!(is_skip_dir("node_modules"));
        assert!(is_skip_dir("mypackage.egg-info"));
        assert!(!is_skip_dir("src"));
        assert!(!is_skip_dir("gitlab"));
    }

    #[test]
    fn skip_segments_found_at_any_depth() {
        assert!(has_skip_segment(".git/config"));
        assert!(has_skip_segment("a/node_modules/pkg/index.js"));
        assert!(!has_skip_segment("a/b/c.txt"));
    }
}
