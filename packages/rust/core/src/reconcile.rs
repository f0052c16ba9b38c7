//! Reconciliation: concatenating the documents an index tree references.
//!
//! The walk is pre-order and follows the tree's key order exactly, which is
//! the order of the (possibly hand-edited) artifact the tree was parsed from.
//! Documents that cannot be included are reported and skipped.

use std::fmt;
use std::path::{Component, Path};

use tracing::{info, instrument, warn};

use mdindex_shared::IndexTree;

use crate::pipeline::ProgressReporter;

/// Why a referenced document was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No file at the referenced path.
    Missing,
    /// The path is absolute or climbs out of the source root.
    OutsideRoot,
    /// The file exists but could not be read as UTF-8 text.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Missing => write!(f, "file not found"),
            SkipReason::OutsideRoot => write!(f, "path escapes the source root"),
            SkipReason::Unreadable(e) => write!(f, "read failed: {e}"),
        }
    }
}

/// A referenced document that was not concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub path: String,
    pub reason: SkipReason,
}

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Concatenated text; each document is framed by a blank line on both sides.
    pub content: String,
    /// Paths that were concatenated, in order.
    pub included: Vec<String>,
    /// Paths that were skipped, in order.
    pub skipped: Vec<SkippedDocument>,
}

/// Concatenate every file of `tree`, read relative to `source_root`.
#[instrument(skip_all, fields(source_root = %source_root.display()))]
pub fn reconcile(
    tree: &IndexTree,
    source_root: &Path,
    progress: &dyn ProgressReporter,
) -> Reconciliation {
    let files = tree.files();
    let total = files.len();
    let mut result = Reconciliation::default();

    for file in files {
        match read_document(source_root, file.path) {
            Ok(text) => {
                result.content.push_str("\n\n");
                result.content.push_str(&text);
                result.content.push_str("\n\n");
                result.included.push(file.path.to_string());
                progress.document_added(file.path, result.included.len(), total);
            }
            Err(reason) => {
                warn!(path = %file.path, %reason, "skipping document");
                let skipped = SkippedDocument {
                    path: file.path.to_string(),
                    reason,
                };
                progress.document_skipped(&skipped);
                result.skipped.push(skipped);
            }
        }
    }

    info!(
        included = result.included.len(),
        skipped = result.skipped.len(),
        "reconciliation complete"
    );
    result
}

fn read_document(source_root: &Path, rel: &str) -> Result<String, SkipReason> {
    let rel_path = Path::new(rel);
    let inside_root = rel_path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !inside_root {
        return Err(SkipReason::OutsideRoot);
    }

    let full = source_root.join(rel_path);
    if !full.is_file() {
        return Err(SkipReason::Missing);
    }

    std::fs::read_to_string(&full).map_err(|e| SkipReason::Unreadable(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
