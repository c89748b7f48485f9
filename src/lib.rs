//! # Folder Fragments
//!
//! Deterministic folder-to-fragment loading for chat/completion engines.
//!
//! Given a root path and optional glob overrides, the pipeline decides
//! exactly which files are read and in what order, then emits each file as
//! a header-wrapped text fragment. Project mode derives its candidate set
//! from git metadata (with a silent fallback to traversal) and prepends an
//! indented tree summary.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────────┐   ┌─────────────┐   ┌───────────────┐
//! │  Discovery    │──▶│  Filtering   │──▶│  Safety gates  │
//! │ git / walk    │   │ globs/types │   │ binary·size·N │
//! └───────────────┘   └─────────────┘   └──────┬────────┘
//!                                              │ sorted
//!                         ┌────────────────────┤
//!                         ▼                    ▼
//!                   ┌───────────┐       ┌────────────┐
//!                   │ Tree      │       │ Fragment   │
//!                   │ summary   │       │ assembly   │
//!                   └───────────┘       └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use folder_fragments::{load_fragments, parse_request, Limits};
//!
//! let request = parse_request("project:.?glob=*.rs,!target")?;
//! let fragments = load_fragments(&request, &Limits::default())?;
//! for fragment in fragments {
//!     println!("{}", fragment.content);
//! }
//! # Ok::<(), folder_fragments::FragmentError>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`loader`] | Request grammar and pipeline orchestration |
//! | [`patterns`] | Gitignore-style rule compilation and matching |
//! | [`classify`] | Default text-file classification |
//! | [`discover`] | Tracked-listing and ignore-rule discovery |
//! | [`walker`] | Traversal and the binary/size/count gates |
//! | [`tree`] | Tree-summary rendering |
//! | [`assemble`] | Fragment assembly and header wrapping |
//! | [`config`] | Limits and TOML configuration |
//! | [`error`] | Error taxonomy |

pub mod assemble;
pub mod classify;
pub mod config;
pub mod discover;
pub mod error;
pub mod loader;
pub mod models;
pub mod patterns;
pub mod tree;
pub mod walker;

pub use config::Limits;
pub use error::FragmentError;
pub use loader::{load_fragments, parse_request, FragmentRequest};
pub use models::{Fragment, Mode};
