//! Application configuration for mdindex.
//!
//! User config lives at `~/.mdindex/mdindex.toml`, or wherever `--config`
//! points. Missing keys fall back to defaults; CLI flags override both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdIndexError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mdindex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mdindex";

// ---------------------------------------------------------------------------
// Config structs (matching mdindex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document discovery settings.
    #[serde(default)]
    pub scan: ScanSection,

    /// Default output file names.
    #[serde(default)]
    pub outputs: OutputsConfig,

    /// Build recipe (Makefile) settings.
    #[serde(default)]
    pub recipe: RecipeConfig,

    /// MkDocs site settings for the navigation descriptor.
    #[serde(default)]
    pub site: SiteConfig,
}

/// `[scan]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSection {
    /// Document file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Reserved file name whose heading titles its directory.
    #[serde(default = "default_overview_file")]
    pub overview_file: String,

    /// Chapter title of the scan root when it has no overview document.
    #[serde(default = "default_root_title")]
    pub root_title: String,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            overview_file: default_overview_file(),
            root_title: default_root_title(),
        }
    }
}

fn default_extension() -> String {
    "md".into()
}
fn default_overview_file() -> String {
    "README.md".into()
}
fn default_root_title() -> String {
    "Main Documentation".into()
}

/// `[outputs]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputsConfig {
    /// Structured index read by the Makefile generator when `-f` is absent.
    #[serde(default = "default_index_file")]
    pub index_file: String,

    #[serde(default = "default_makefile")]
    pub makefile: String,

    #[serde(default = "default_mkdocs")]
    pub mkdocs: String,

    /// Output of `--concat-yaml` when `-o` is absent.
    #[serde(default = "default_concatenated")]
    pub concatenated: String,

    /// Top heading of the Markdown index listing.
    #[serde(default = "default_index_heading")]
    pub index_heading: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
            makefile: default_makefile(),
            mkdocs: default_mkdocs(),
            concatenated: default_concatenated(),
            index_heading: default_index_heading(),
        }
    }
}

fn default_index_file() -> String {
    "00index.yaml".into()
}
fn default_makefile() -> String {
    "Makefile.docs".into()
}
fn default_mkdocs() -> String {
    "mkdocs.yml".into()
}
fn default_concatenated() -> String {
    "all_docs.md".into()
}
fn default_index_heading() -> String {
    "Documentation Index".into()
}

/// `[recipe]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeConfig {
    /// Document converter binary.
    #[serde(default = "default_pandoc")]
    pub pandoc: String,

    /// Pandoc filter applied to every conversion.
    #[serde(default = "default_filter")]
    pub filter: String,

    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Base name of the generated PDF/ODT files.
    #[serde(default = "default_document_name")]
    pub document_name: String,

    /// Command the recipe runs to concatenate a structured index.
    #[serde(default = "default_tool_command")]
    pub tool_command: String,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            pandoc: default_pandoc(),
            filter: default_filter(),
            build_dir: default_build_dir(),
            document_name: default_document_name(),
            tool_command: default_tool_command(),
        }
    }
}

fn default_pandoc() -> String {
    "pandoc".into()
}
fn default_filter() -> String {
    "mermaid-filter".into()
}
fn default_build_dir() -> String {
    "build".into()
}
fn default_document_name() -> String {
    "documentation".into()
}
fn default_tool_command() -> String {
    "mdindex".into()
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,

    #[serde(default = "default_site_description")]
    pub site_description: String,

    #[serde(default = "default_site_author")]
    pub site_author: String,

    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    #[serde(default = "default_edit_uri")]
    pub edit_uri: String,

    #[serde(default = "default_site_dir")]
    pub site_dir: String,

    /// MkDocs theme name.
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_theme_features")]
    pub theme_features: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            site_description: default_site_description(),
            site_author: default_site_author(),
            repo_url: default_repo_url(),
            edit_uri: default_edit_uri(),
            site_dir: default_site_dir(),
            theme: default_theme(),
            theme_features: default_theme_features(),
        }
    }
}

fn default_site_name() -> String {
    "Project Documentation".into()
}
fn default_site_description() -> String {
    "Automatically generated documentation".into()
}
fn default_site_author() -> String {
    "mdindex".into()
}
fn default_repo_url() -> String {
    "https://github.com/yourusername/project".into()
}
fn default_edit_uri() -> String {
    "edit/main/docs/".into()
}
fn default_site_dir() -> String {
    "site".into()
}
fn default_theme() -> String {
    "material".into()
}
fn default_theme_features() -> Vec<String> {
    [
        "navigation.tabs",
        "navigation.sections",
        "navigation.expand",
        "navigation.top",
        "search.highlight",
        "search.share",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// ---------------------------------------------------------------------------
// Runtime options (derived from config)
// ---------------------------------------------------------------------------

/// Discovery options, merged from config.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Extension (without dot) a file must carry to count as a document.
    pub extension: String,
    /// Overview document name; excluded from listings, consulted for titles.
    pub overview_file: String,
    /// Fallback chapter title of the scan root.
    pub root_title: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ScanOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            extension: config.scan.extension.clone(),
            overview_file: config.scan.overview_file.clone(),
            root_title: config.scan.root_title.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mdindex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MdIndexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mdindex/mdindex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MdIndexError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MdIndexError::config(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("overview_file"));
        assert!(toml_str.contains("Main Documentation"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.scan.extension, "md");
        assert_eq!(parsed.outputs.concatenated, "all_docs.md");
        assert_eq!(parsed.site.theme_features.len(), 6);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[scan]
root_title = "Handbook"

[recipe]
document_name = "handbook"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.scan.root_title, "Handbook");
        assert_eq!(config.scan.overview_file, "README.md");
        assert_eq!(config.recipe.document_name, "handbook");
        assert_eq!(config.recipe.pandoc, "pandoc");
        assert_eq!(config.outputs.makefile, "Makefile.docs");
    }

    #[test]
    fn scan_options_from_app_config() {
        let mut app = AppConfig::default();
        app.scan.extension = "markdown".into();
        let opts = ScanOptions::from(&app);
        assert_eq!(opts.extension, "markdown");
        assert_eq!(opts.root_title, "Main Documentation");
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("mdindex-config-{}.toml", uuid::Uuid::now_v7()));
        std::fs::write(&path, "[scan\nextension = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_config_from_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("mdindex-missing-{}.toml", uuid::Uuid::now_v7()));
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, MdIndexError::Io { .. }));
    }
}
