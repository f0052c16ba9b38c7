//! CLI definition, operation routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use mdindex_core::pipeline::{self, IndexFormat, ProgressReporter};
use mdindex_core::reconcile::SkippedDocument;
use mdindex_core::writer::ArtifactMeta;
use mdindex_shared::{AppConfig, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

const EXAMPLES: &str = "\
Examples:
  mdindex -s ./docs -i -o 00index.md
  mdindex --source ./docs --index --output 00index.yaml
  mdindex -s ./docs -m -f 00index.yaml
  mdindex -s ./docs -m -f 00index.yaml -o Makefile.docs
  mdindex -s ./docs -k
  mdindex -s ./docs --concat-yaml 00index.yaml -o all_docs.md";

/// mdindex: index a documentation folder and build documents from the index.
#[derive(Parser)]
#[command(
    name = "mdindex",
    version,
    about = "Generate indexes, MkDocs navigation and pandoc recipes for a Markdown documentation folder.",
    long_about = None,
    after_help = EXAMPLES,
)]
#[command(group(
    ArgGroup::new("operation")
        .args(["index", "makefile", "mkdocs", "concat_yaml"])
        .multiple(false)
))]
pub(crate) struct Cli {
    /// Documentation source folder.
    #[arg(short, long, value_name = "DIR")]
    pub source: PathBuf,

    /// Generate an index: Markdown listing for `-o *.md`, structured for `-o *.yaml|*.yml|*.json`.
    #[arg(short, long)]
    pub index: bool,

    /// Output file.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Generate a Makefile that builds PDF/ODT with pandoc.
    #[arg(short, long)]
    pub makefile: bool,

    /// Index file the Makefile builds from.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub index_file: Option<String>,

    /// Generate an MkDocs configuration.
    #[arg(short = 'k', long)]
    pub mkdocs: bool,

    /// Concatenate the documents listed in a structured index.
    #[arg(long, value_name = "FILE")]
    pub concat_yaml: Option<PathBuf>,

    /// Config file (defaults to ~/.mdindex/mdindex.toml).
    #[arg(long, value_name = "FILE", env = "MDINDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// The single operation an invocation performs.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Operation {
    Index { output: PathBuf, format: IndexFormat },
    Makefile { index_file: String, output: PathBuf },
    Mkdocs { output: PathBuf },
    Concat { artifact: PathBuf, output: PathBuf },
}

impl Operation {
    /// Resolve the requested operation, filling defaults from `config`.
    pub(crate) fn select(cli: &Cli, config: &AppConfig) -> Option<Self> {
        let output_or = |default: &str| {
            cli.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(default))
        };

        if cli.index {
            let output = cli.output.clone()?;
            let format = IndexFormat::from_output(&output)?;
            Some(Self::Index { output, format })
        } else if cli.makefile {
            Some(Self::Makefile {
                index_file: cli
                    .index_file
                    .clone()
                    .unwrap_or_else(|| config.outputs.index_file.clone()),
                output: output_or(&config.outputs.makefile),
            })
        } else if cli.mkdocs {
            Some(Self::Mkdocs {
                output: output_or(&config.outputs.mkdocs),
            })
        } else {
            cli.concat_yaml.clone().map(|artifact| Self::Concat {
                artifact,
                output: output_or(&config.outputs.concatenated),
            })
        }
    }
}

const OPERATION_HELP: &str = "\
Specify a valid operation:
  --index --output <file>.md            Markdown index
  --index --output <file>.yaml          structured YAML index
  --makefile --index-file <file>.yaml   Makefile
  --mkdocs                              MkDocs configuration
  --concat-yaml <file>.yaml --output <file>.md   concatenate documents";

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["mdindex", "mdindex_core", "mdindex_discovery", "mdindex_artifacts", "mdindex_shared"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the selected operation.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if !cli.source.exists() {
        return Err(eyre!(
            "source folder '{}' does not exist",
            cli.source.display()
        ));
    }

    let Some(operation) = Operation::select(&cli, &config) else {
        println!("{OPERATION_HELP}");
        return Err(eyre!("no valid operation selected"));
    };

    info!(source = %cli.source.display(), ?operation, "running");

    let progress = CliProgress::new();
    let source = cli.source.as_path();

    let result = match operation {
        Operation::Index { output, format } => cmd_index(source, &output, format, &config, &progress),
        Operation::Makefile { index_file, output } => {
            cmd_makefile(source, &index_file, &output, &config, &progress)
        }
        Operation::Mkdocs { output } => cmd_mkdocs(source, &output, &config, &progress),
        Operation::Concat { artifact, output } => cmd_concat(source, &artifact, &output, &progress),
    };

    progress.finish();
    result
}

fn cmd_index(
    source: &Path,
    output: &Path,
    format: IndexFormat,
    config: &AppConfig,
    progress: &CliProgress,
) -> Result<()> {
    let content = pipeline::build_index(source, format, config, progress)?;
    pipeline::emit(output, &content, progress)?;
    Ok(())
}

fn cmd_makefile(
    source: &Path,
    index_file: &str,
    output: &Path,
    config: &AppConfig,
    progress: &CliProgress,
) -> Result<()> {
    progress.phase("Rendering Makefile");
    let content = pipeline::build_recipe(source, index_file, config);
    pipeline::emit(output, &content, progress)?;
    Ok(())
}

fn cmd_mkdocs(source: &Path, output: &Path, config: &AppConfig, progress: &CliProgress) -> Result<()> {
    let content = pipeline::build_navigation(source, config, progress)?;
    pipeline::emit(output, &content, progress)?;
    Ok(())
}

fn cmd_concat(source: &Path, artifact: &Path, output: &Path, progress: &CliProgress) -> Result<()> {
    let result = pipeline::concatenate(source, artifact, progress)?;
    pipeline::emit(output, &result.content, progress)?;

    progress.say(format!(
        "  Documents: {} included, {} skipped",
        result.included.len(),
        result.skipped.len()
    ));
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter: an indicatif spinner plus per-document lines on stdout.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    /// Print a line to stdout without tearing the spinner.
    fn say(&self, line: impl AsRef<str>) {
        self.spinner.suspend(|| println!("{}", line.as_ref()));
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_added(&self, path: &str, current: usize, total: usize) {
        self.spinner.set_message(format!("Concatenating [{current}/{total}]"));
        self.say(format!("Added: {path}"));
    }

    fn document_skipped(&self, skipped: &SkippedDocument) {
        self.say(format!("Skipped: {} ({})", skipped.path, skipped.reason));
    }

    fn artifact_written(&self, meta: &ArtifactMeta) {
        self.say(format!(
            "Generated: {} ({} bytes, sha256 {})",
            meta.path.display(),
            meta.size_bytes,
            &meta.sha256[..12]
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mdindex").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    fn select(args: &[&str]) -> Option<Operation> {
        Operation::select(&parse(args), &AppConfig::default())
    }

    #[test]
    fn index_format_follows_output_extension() {
        assert_eq!(
            select(&["-s", "docs", "-i", "-o", "00index.md"]),
            Some(Operation::Index {
                output: "00index.md".into(),
                format: IndexFormat::Markdown
            })
        );
        assert_eq!(
            select(&["-s", "docs", "--index", "--output=00index.yaml"]),
            Some(Operation::Index {
                output: "00index.yaml".into(),
                format: IndexFormat::Yaml
            })
        );
    }

    #[test]
    fn index_without_usable_output_is_no_operation() {
        assert_eq!(select(&["-s", "docs", "-i"]), None);
        assert_eq!(select(&["-s", "docs", "-i", "-o", "index.txt"]), None);
    }

    #[test]
    fn defaults_come_from_config() {
        assert_eq!(
            select(&["-s", "docs", "-m"]),
            Some(Operation::Makefile {
                index_file: "00index.yaml".into(),
                output: "Makefile.docs".into()
            })
        );
        assert_eq!(
            select(&["-s", "docs", "-k"]),
            Some(Operation::Mkdocs {
                output: "mkdocs.yml".into()
            })
        );
        assert_eq!(
            select(&["-s", "docs", "--concat-yaml", "00index.yaml"]),
            Some(Operation::Concat {
                artifact: "00index.yaml".into(),
                output: "all_docs.md".into()
            })
        );
    }

    #[test]
    fn no_selector_is_no_operation() {
        assert_eq!(select(&["-s", "docs"]), None);
        assert_eq!(select(&["-s", "docs", "-o", "x.md"]), None);
    }

    #[test]
    fn selectors_are_mutually_exclusive() {
        let result = Cli::try_parse_from(["mdindex", "-s", "docs", "-m", "-k"]);
        assert!(result.is_err());
    }

    #[test]
    fn source_is_required() {
        let result = Cli::try_parse_from(["mdindex", "-k"]);
        assert!(result.is_err());
    }
}
