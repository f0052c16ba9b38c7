//! Document discovery for a documentation source tree.
//!
//! Walks the source root, collects every document carrying the configured
//! extension, and resolves a display title for each one. Overview documents
//! (`README.md` by default) are never listed; they only title their directory,
//! see [`resolve_chapter_title`].

mod title;

use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, instrument};

use mdindex_shared::{DocumentRef, MdIndexError, ROOT_DIR, Result, ScanOptions};

pub use title::{chapter_titles, resolve_chapter_title, resolve_title};

/// Discover all documents under `root`.
///
/// Every call rescans the filesystem. The returned order is whatever the walk
/// produced; callers impose ordering (see the tree builder).
#[instrument(skip_all, fields(root = %root.display(), extension = %opts.extension))]
pub fn scan(root: &Path, opts: &ScanOptions) -> Result<Vec<DocumentRef>> {
    if !root.exists() {
        return Err(MdIndexError::not_found(root));
    }
    if !root.is_dir() {
        return Err(MdIndexError::config(format!(
            "source root {} is not a directory",
            root.display()
        )));
    }

    // Every file counts: hidden entries and ignore files are not filtered.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut documents = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_document(path, opts) {
            continue;
        }

        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };

        let parent_dir = rel
            .parent()
            .map(normalize_path)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ROOT_DIR.to_string());

        let doc = DocumentRef {
            path: normalize_path(rel),
            title: resolve_title(path),
            parent_dir,
        };
        debug!(path = %doc.path, title = %doc.title, "discovered document");
        documents.push(doc);
    }

    debug!(count = documents.len(), "scan complete");
    Ok(documents)
}

/// Whether `path` is a listable document: right extension, not an overview.
fn is_document(path: &Path, opts: &ScanOptions) -> bool {
    let ext_matches = path.extension().and_then(|e| e.to_str()) == Some(opts.extension.as_str());
    let is_overview =
        path.file_name().and_then(|n| n.to_str()) == Some(opts.overview_file.as_str());
    ext_matches && !is_overview
}

/// Join path components with `/`, independent of the host separator.
fn normalize_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
