//! Core domain types for mdindex: discovered documents and the index tree.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Relative path used for the scan root itself.
pub const ROOT_DIR: &str = ".";

// ---------------------------------------------------------------------------
// DocumentRef
// ---------------------------------------------------------------------------

/// A document found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Path relative to the scan root, `/`-separated. Unique within a scan.
    pub path: String,
    /// Resolved display title.
    pub title: String,
    /// Relative path of the containing directory ([`ROOT_DIR`] for the root).
    pub parent_dir: String,
}

/// Chapter title per directory, keyed by relative directory path.
pub type ChapterTitles = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Index tree
// ---------------------------------------------------------------------------

/// Ordered children of a directory node, keyed by path segment.
///
/// Names are unique; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirEntries(Vec<(String, IndexNode)>);

impl DirEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&IndexNode> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexNode)> {
        self.0.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Insert `node` under `name`. An existing entry keeps its position and
    /// is replaced; the previous node is returned.
    pub fn insert(&mut self, name: impl Into<String>, node: IndexNode) -> Option<IndexNode> {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, node)),
            None => {
                self.0.push((name, node));
                None
            }
        }
    }

    /// Children of the directory `name`, created at the end if absent.
    /// A file entry of the same name is replaced by an empty directory.
    pub fn directory_mut(&mut self, name: &str) -> &mut DirEntries {
        let idx = match self.0.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.0.push((name.to_string(), IndexNode::directory()));
                self.0.len() - 1
            }
        };

        let slot = &mut self.0[idx].1;
        if matches!(slot, IndexNode::File { .. }) {
            *slot = IndexNode::directory();
        }
        match slot {
            IndexNode::Directory { children } => children,
            IndexNode::File { .. } => unreachable!("file slot replaced above"),
        }
    }
}

impl FromIterator<(String, IndexNode)> for DirEntries {
    fn from_iter<I: IntoIterator<Item = (String, IndexNode)>>(iter: I) -> Self {
        let mut entries = Self::new();
        for (name, node) in iter {
            entries.insert(name, node);
        }
        entries
    }
}

impl Serialize for DirEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in &self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

/// A node of the index tree.
///
/// Serializes as `{type: directory, children: {...}}` or
/// `{type: file, title, path}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IndexNode {
    Directory { children: DirEntries },
    File { title: String, path: String },
}

impl IndexNode {
    /// An empty directory node.
    pub fn directory() -> Self {
        Self::Directory {
            children: DirEntries::new(),
        }
    }

    pub fn file(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self::File {
            title: title.into(),
            path: path.into(),
        }
    }
}

/// The index of a documentation tree: the ordered children of the scan root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IndexTree {
    pub root: DirEntries,
}

/// A file leaf reached by walking an [`IndexTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileLeaf<'a> {
    pub title: &'a str,
    pub path: &'a str,
}

impl IndexTree {
    pub fn new(root: DirEntries) -> Self {
        Self { root }
    }

    /// All file leaves in pre-order, following key order.
    pub fn files(&self) -> Vec<FileLeaf<'_>> {
        fn collect<'a>(entries: &'a DirEntries, out: &mut Vec<FileLeaf<'a>>) {
            for (_, node) in entries.iter() {
                match node {
                    IndexNode::File { title, path } => out.push(FileLeaf { title, path }),
                    IndexNode::Directory { children } => collect(children, out),
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// Nesting depth: the root's entries sit at depth 1, the entries of a
    /// directory one deeper than the directory itself. Empty directories count.
    pub fn depth(&self) -> usize {
        fn level(entries: &DirEntries) -> usize {
            let deepest = entries
                .iter()
                .filter_map(|(_, node)| match node {
                    IndexNode::Directory { children } => Some(level(children)),
                    IndexNode::File { .. } => None,
                })
                .max()
                .unwrap_or(0);
            deepest + 1
        }

        level(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut entries = DirEntries::new();
        entries.insert("a.md", IndexNode::file("A", "a.md"));
        entries.insert("b.md", IndexNode::file("B", "b.md"));
        let old = entries.insert("a.md", IndexNode::file("A2", "a.md"));

        assert_eq!(old, Some(IndexNode::file("A", "a.md")));
        let names: Vec<&str> = entries.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a.md", "b.md"]);
        assert_eq!(entries.get("a.md"), Some(&IndexNode::file("A2", "a.md")));
    }

    #[test]
    fn directory_mut_creates_once() {
        let mut entries = DirEntries::new();
        entries
            .directory_mut("guide")
            .insert("x.md", IndexNode::file("X", "guide/x.md"));
        entries
            .directory_mut("guide")
            .insert("y.md", IndexNode::file("Y", "guide/y.md"));

        assert_eq!(entries.len(), 1);
        match entries.get("guide") {
            Some(IndexNode::Directory { children }) => assert_eq!(children.len(), 2),
            other => panic!("expected directory, got {other:?}"),
        }
    }

    #[test]
    fn files_walk_preorder() {
        let mut root = DirEntries::new();
        root.insert("z.md", IndexNode::file("Z", "z.md"));
        root.directory_mut("a")
            .insert("b.md", IndexNode::file("B", "a/b.md"));
        root.insert("c.md", IndexNode::file("C", "c.md"));

        let tree = IndexTree::new(root);
        let paths: Vec<&str> = tree.files().iter().map(|f| f.path).collect();
        assert_eq!(paths, ["z.md", "a/b.md", "c.md"]);
    }

    #[test]
    fn node_serializes_with_type_tag() {
        let mut root = DirEntries::new();
        root.directory_mut("sub")
            .insert("b.md", IndexNode::file("Beta", "sub/b.md"));
        let tree = IndexTree::new(root);

        let json = serde_json::to_value(&tree).expect("serialize");
        assert_eq!(json["sub"]["type"], "directory");
        assert_eq!(json["sub"]["children"]["b.md"]["type"], "file");
        assert_eq!(json["sub"]["children"]["b.md"]["title"], "Beta");
        assert_eq!(json["sub"]["children"]["b.md"]["path"], "sub/b.md");
    }

    #[test]
    fn depth_counts_directory_levels() {
        assert_eq!(IndexTree::default().depth(), 1);

        let mut root = DirEntries::new();
        root.insert("a.md", IndexNode::file("A", "a.md"));
        assert_eq!(IndexTree::new(root.clone()).depth(), 1);

        root.directory_mut("x")
            .directory_mut("y")
            .insert("c.md", IndexNode::file("C", "x/y/c.md"));
        root.directory_mut("empty");
        assert_eq!(IndexTree::new(root).depth(), 3);
    }
}
