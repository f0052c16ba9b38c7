//! mdindex CLI: index a Markdown documentation tree and reassemble it.
//!
//! Builds Markdown/YAML indexes, MkDocs navigation, and a pandoc Makefile
//! from a documentation folder, and concatenates documents following an index.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
