//! Flat Markdown index listing.
//!
//! One `##` section per directory holding documents, in tree order, with one
//! link bullet per document. Meant for people browsing the docs, not for
//! reconciliation.

use tracing::{debug, instrument};

use mdindex_shared::{AppConfig, ChapterTitles, IndexTree};

use crate::{chapter_title, dir_sections};

/// Rendering options for the index listing.
#[derive(Debug, Clone)]
pub struct ListingOptions {
    /// Top-level `#` heading.
    pub heading: String,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ListingOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            heading: config.outputs.index_heading.clone(),
        }
    }
}

/// Render `tree` as a Markdown index listing.
///
/// `source_root` is only echoed in the preamble; link targets are the
/// documents' paths relative to it.
#[instrument(skip_all, fields(source_root = %source_root))]
pub fn emit_index_document(
    tree: &IndexTree,
    chapters: &ChapterTitles,
    source_root: &str,
    opts: &ListingOptions,
) -> String {
    let mut content = format!(
        "# {}\n\nDocumentation generated from: `{source_root}`\n\n",
        opts.heading
    );

    let sections = dir_sections(&tree.root);
    for section in &sections {
        content.push_str(&format!("## {}\n\n", chapter_title(chapters, &section.dir)));
        for file in &section.files {
            content.push_str(&format!("- [{}]({})\n", file.title, file.path));
        }
        content.push('\n');
    }

    debug!(sections = sections.len(), "index listing rendered");
    content
}
