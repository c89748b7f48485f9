//! # Folder Fragments CLI (`fragments`)
//!
//! Host binary for the fragment loader. It resolves home-directory
//! shorthand, applies limit overrides, and prints the ordered fragment
//! sequence to stdout.
//!
//! ## Usage
//!
//! ```bash
//! fragments "folder:./docs"
//! fragments "project:."
//! fragments "folder:.?glob=*.md,!drafts/**"
//! fragments --paths "project:~/src/app"
//! fragments --max-files 100 --max-bytes 262144 "folder:."
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use folder_fragments::config::{self, Limits};
use folder_fragments::{load_fragments, parse_request};

/// Load a directory tree as an ordered sequence of text fragments.
///
/// The request grammar is `<mode>:<path>[?glob=<pattern-list>]` where mode
/// is `folder` (plain recursive traversal) or `project` (git-aware
/// discovery with a leading tree summary). Glob patterns are
/// comma-separated, gitignore-style, and may be negated with `!`.
#[derive(Parser)]
#[command(
    name = "fragments",
    about = "Load a directory tree as deterministic, bounded text fragments",
    version
)]
struct Cli {
    /// Fragment request, e.g. `folder:./docs` or `project:.?glob=*.rs`.
    spec: String,

    /// Path to a TOML configuration file overriding the default limits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of files to emit (default 500).
    #[arg(long)]
    max_files: Option<usize>,

    /// Maximum size in bytes of any single file (default 1 MiB).
    #[arg(long)]
    max_bytes: Option<u64>,

    /// Print the selected relative paths instead of fragment contents.
    #[arg(long)]
    paths: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut limits = match &cli.config {
        Some(path) => Limits::from(&config::load_config(path)?.limits),
        None => Limits::default(),
    };
    if let Some(max_files) = cli.max_files {
        anyhow::ensure!(max_files > 0, "--max-files must be > 0");
        limits.max_file_count = max_files;
    }
    if let Some(max_bytes) = cli.max_bytes {
        anyhow::ensure!(max_bytes > 0, "--max-bytes must be > 0");
        limits.max_file_bytes = max_bytes;
    }

    let mut request = parse_request(&cli.spec)
        .with_context(|| format!("Failed to parse request '{}'", cli.spec))?;
    request.root = expand_tilde(&request.root);

    let fragments = load_fragments(&request, &limits)?;

    if cli.paths {
        for fragment in &fragments {
            println!("{}", fragment.relative_path);
        }
        return Ok(());
    }

    for fragment in &fragments {
        println!("{}", fragment.content);
    }
    Ok(())
}

/// Resolve `~` and `~/...` against the user's home directory.
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    if text == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }
    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
