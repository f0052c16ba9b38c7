//! End-to-end operations: source root → scan → index tree → rendered artifact.
//!
//! Each operation takes the source root explicitly and scans (or loads) afresh;
//! nothing is kept between calls.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use mdindex_artifacts::{ListingOptions, emit_build_recipe, emit_index_document, emit_navigation_descriptor};
use mdindex_shared::{
    AppConfig, ChapterTitles, DocumentRef, IndexTree, MdIndexError, Result, ScanOptions,
};

use crate::artifact;
use crate::reconcile::{self, Reconciliation, SkippedDocument};
use crate::tree::build_tree;
use crate::writer::{ArtifactMeta, write_artifact};

/// Progress callback for reporting operation status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a document is appended during concatenation.
    fn document_added(&self, path: &str, current: usize, total: usize);
    /// Called when a referenced document is skipped during concatenation.
    fn document_skipped(&self, skipped: &SkippedDocument);
    /// Called once the output file is on disk.
    fn artifact_written(&self, meta: &ArtifactMeta);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_added(&self, _path: &str, _current: usize, _total: usize) {}
    fn document_skipped(&self, _skipped: &SkippedDocument) {}
    fn artifact_written(&self, _meta: &ArtifactMeta) {}
}

/// Output form of `--index`, chosen by the output file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    /// Flat Markdown listing.
    Markdown,
    /// Structured YAML artifact.
    Yaml,
    /// Structured artifact as JSON.
    Json,
}

impl IndexFormat {
    /// Format for `path`, or `None` for an unrecognized extension.
    pub fn from_output(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" => Some(Self::Markdown),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A freshly scanned source tree.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    pub root: PathBuf,
    pub documents: Vec<DocumentRef>,
    pub tree: IndexTree,
    pub chapters: ChapterTitles,
}

/// Scan `root` and build its index tree and chapter titles.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn index_source(root: &Path, config: &AppConfig) -> Result<SourceIndex> {
    let opts = ScanOptions::from(config);

    let documents = mdindex_discovery::scan(root, &opts)?;
    let tree = build_tree(&documents);
    let chapters = mdindex_discovery::chapter_titles(root, &documents, &opts);

    info!(
        documents = documents.len(),
        chapters = chapters.len(),
        "source indexed"
    );

    Ok(SourceIndex {
        root: root.to_path_buf(),
        documents,
        tree,
        chapters,
    })
}

/// Render the `--index` output for `root` in `format`.
pub fn build_index(
    root: &Path,
    format: IndexFormat,
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<String> {
    progress.phase("Scanning documents");
    let index = index_source(root, config)?;

    progress.phase("Rendering index");
    match format {
        IndexFormat::Markdown => Ok(emit_index_document(
            &index.tree,
            &index.chapters,
            &root.display().to_string(),
            &ListingOptions::from(config),
        )),
        IndexFormat::Yaml => artifact::serialize(&index.tree),
        IndexFormat::Json => artifact::serialize_json(&index.tree),
    }
}

/// Render the MkDocs descriptor for `root`.
pub fn build_navigation(
    root: &Path,
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> Result<String> {
    progress.phase("Scanning documents");
    let index = index_source(root, config)?;

    progress.phase("Rendering navigation");
    emit_navigation_descriptor(
        &index.tree,
        &index.chapters,
        &root.display().to_string(),
        &config.site,
    )
}

/// Render the Makefile that builds documents from `index_file`.
pub fn build_recipe(root: &Path, index_file: &str, config: &AppConfig) -> String {
    emit_build_recipe(
        &root.display().to_string(),
        index_file,
        &config.outputs.concatenated,
        &config.recipe,
    )
}

/// Load the structured index at `artifact_path` and concatenate its documents.
#[instrument(skip_all, fields(root = %root.display(), artifact = %artifact_path.display()))]
pub fn concatenate(
    root: &Path,
    artifact_path: &Path,
    progress: &dyn ProgressReporter,
) -> Result<Reconciliation> {
    if !root.exists() {
        return Err(MdIndexError::not_found(root));
    }
    if !root.is_dir() {
        return Err(MdIndexError::config(format!(
            "source root {} is not a directory",
            root.display()
        )));
    }

    progress.phase("Loading index");
    let text = std::fs::read_to_string(artifact_path)
        .map_err(|e| MdIndexError::io(artifact_path, e))?;
    let tree = artifact::deserialize(&text)?;

    progress.phase("Concatenating documents");
    Ok(reconcile::reconcile(&tree, root, progress))
}

/// Write `content` to `path` and report it.
pub fn emit(path: &Path, content: &str, progress: &dyn ProgressReporter) -> Result<ArtifactMeta> {
    let meta = write_artifact(path, content)?;
    progress.artifact_written(&meta);
    info!(path = %meta.path.display(), size = meta.size_bytes, "artifact written");
    Ok(meta)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
