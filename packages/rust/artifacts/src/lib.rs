//! Human-facing renderings of an index tree.
//!
//! - [`listing`]: flat Markdown index, one section per directory
//! - [`navigation`]: MkDocs `mkdocs.yml` with a two-level `nav`
//! - [`recipe`]: Makefile driving pandoc over the index

pub mod listing;
pub mod navigation;
pub mod recipe;

use mdindex_shared::{ChapterTitles, DirEntries, FileLeaf, IndexNode, ROOT_DIR};

pub use listing::{ListingOptions, emit_index_document};
pub use navigation::{NavEntry, emit_navigation_descriptor};
pub use recipe::{emit_build_recipe, is_structured_index};

/// A directory of the tree together with the documents it holds directly.
#[derive(Debug)]
pub(crate) struct DirSection<'a> {
    /// Relative directory path ([`ROOT_DIR`] for the root).
    pub dir: String,
    pub files: Vec<FileLeaf<'a>>,
}

/// Directories in pre-order, each with its direct documents.
///
/// Directories without direct documents are omitted.
pub(crate) fn dir_sections(root: &DirEntries) -> Vec<DirSection<'_>> {
    fn visit<'a>(dir: String, entries: &'a DirEntries, out: &mut Vec<DirSection<'a>>) {
        let files: Vec<FileLeaf<'a>> = entries
            .iter()
            .filter_map(|(_, node)| match node {
                IndexNode::File { title, path } => Some(FileLeaf { title, path }),
                IndexNode::Directory { .. } => None,
            })
            .collect();

        let subdirs: Vec<(&str, &'a DirEntries)> = entries
            .iter()
            .filter_map(|(name, node)| match node {
                IndexNode::Directory { children } => Some((name, children)),
                IndexNode::File { .. } => None,
            })
            .collect();

        if !files.is_empty() {
            out.push(DirSection {
                dir: dir.clone(),
                files,
            });
        }

        for (name, children) in subdirs {
            let child = if dir == ROOT_DIR {
                name.to_string()
            } else {
                format!("{dir}/{name}")
            };
            visit(child, children, out);
        }
    }

    let mut out = Vec::new();
    visit(ROOT_DIR.to_string(), root, &mut out);
    out
}

/// Chapter title for `dir`, or the directory path itself when none was resolved.
pub(crate) fn chapter_title<'a>(chapters: &'a ChapterTitles, dir: &'a str) -> &'a str {
    chapters.get(dir).map(String::as_str).unwrap_or(dir)
}
