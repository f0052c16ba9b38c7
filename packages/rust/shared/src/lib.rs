//! Shared types, error model, and configuration for mdindex.
//!
//! This crate is the foundation depended on by all other mdindex crates.
//! It provides:
//! - [`MdIndexError`]: the unified error type
//! - Domain types ([`DocumentRef`], [`IndexTree`], [`IndexNode`], [`ChapterTitles`])
//! - Configuration ([`AppConfig`], [`ScanOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, OutputsConfig, RecipeConfig, ScanOptions, ScanSection, SiteConfig, config_dir,
    config_file_path, load_config, load_config_from,
};
pub use error::{MdIndexError, Result};
pub use types::{ChapterTitles, DirEntries, DocumentRef, FileLeaf, IndexNode, IndexTree, ROOT_DIR};
