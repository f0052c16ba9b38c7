//! MkDocs site descriptor (`mkdocs.yml`).
//!
//! The `nav` is two levels deep at most: root documents as plain pages, then
//! one section per directory holding documents. Nested directories become
//! further top-level sections, never nested ones; MkDocs themes configured
//! for this output expect that shape.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use mdindex_shared::{ChapterTitles, IndexTree, ROOT_DIR, Result, SiteConfig};

use crate::{chapter_title, dir_sections};

/// One item of the MkDocs `nav` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEntry {
    /// `- Title: path.md`
    Page { title: String, path: String },
    /// `- Chapter: [pages...]`
    Section { title: String, pages: Vec<NavEntry> },
}

impl Serialize for NavEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            NavEntry::Page { title, path } => map.serialize_entry(title, path)?,
            NavEntry::Section { title, pages } => map.serialize_entry(title, pages)?,
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
struct Theme<'a> {
    name: &'a str,
    features: &'a [String],
}

#[derive(Debug, Serialize)]
struct MkDocsConfig<'a> {
    site_name: &'a str,
    site_description: &'a str,
    site_author: &'a str,
    repo_url: &'a str,
    edit_uri: &'a str,
    docs_dir: &'a str,
    site_dir: &'a str,
    theme: Theme<'a>,
    nav: Vec<NavEntry>,
}

/// Build the `nav` entries for `tree`.
pub fn navigation(tree: &IndexTree, chapters: &ChapterTitles) -> Vec<NavEntry> {
    let page = |title: &str, path: &str| NavEntry::Page {
        title: title.to_string(),
        path: path.to_string(),
    };

    let mut nav = Vec::new();
    for section in dir_sections(&tree.root) {
        let pages = section.files.iter().map(|f| page(f.title, f.path));
        if section.dir == ROOT_DIR {
            nav.extend(pages);
        } else {
            nav.push(NavEntry::Section {
                title: chapter_title(chapters, &section.dir).to_string(),
                pages: pages.collect(),
            });
        }
    }
    nav
}

/// Render the MkDocs configuration for `tree`, rooted at `docs_dir`.
#[instrument(skip_all, fields(docs_dir = %docs_dir))]
pub fn emit_navigation_descriptor(
    tree: &IndexTree,
    chapters: &ChapterTitles,
    docs_dir: &str,
    site: &SiteConfig,
) -> Result<String> {
    let nav = navigation(tree, chapters);
    debug!(entries = nav.len(), "navigation built");

    let config = MkDocsConfig {
        site_name: &site.site_name,
        site_description: &site.site_description,
        site_author: &site.site_author,
        repo_url: &site.repo_url,
        edit_uri: &site.edit_uri,
        docs_dir,
        site_dir: &site.site_dir,
        theme: Theme {
            name: &site.theme,
            features: &site.theme_features,
        },
        nav,
    };

    Ok(serde_yaml::to_string(&config)?)
}
