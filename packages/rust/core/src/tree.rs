//! Index tree builder.
//!
//! Turns the flat list of discovered documents into the nested
//! directory/file tree that is serialized as the structured index.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use mdindex_shared::{DirEntries, DocumentRef, IndexNode, IndexTree, ROOT_DIR};

/// Build the index tree for `documents`.
///
/// Documents are grouped by parent directory; groups are ordered by directory
/// path and documents inside a group by their own path, both compared segment
/// by segment. Each document is then inserted along its path segments, so
/// within a directory its documents come before its subdirectories.
///
/// The result depends only on the set of documents, never on their input order.
#[instrument(skip_all, fields(document_count = documents.len()))]
pub fn build_tree(documents: &[DocumentRef]) -> IndexTree {
    let mut groups: BTreeMap<Vec<&str>, Vec<&DocumentRef>> = BTreeMap::new();
    for doc in documents {
        groups.entry(segments(&doc.parent_dir)).or_default().push(doc);
    }

    let mut root = DirEntries::new();
    for docs in groups.values_mut() {
        docs.sort_by(|a, b| segments(&a.path).cmp(&segments(&b.path)));

        for doc in docs.iter() {
            insert_document(&mut root, doc);
        }
    }

    debug!(groups = groups.len(), "index tree built");
    IndexTree::new(root)
}

/// Path segments, with the root directory as the empty path.
fn segments(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ROOT_DIR)
        .collect()
}

fn insert_document(root: &mut DirEntries, doc: &DocumentRef) {
    let parts = segments(&doc.path);
    let Some((file_name, dirs)) = parts.split_last() else {
        return;
    };

    let mut level = root;
    for dir in dirs {
        level = level.directory_mut(dir);
    }
    level.insert(*file_name, IndexNode::file(&doc.title, &doc.path));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
