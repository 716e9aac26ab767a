///
/// This module implements the CLI interface for scholar-batch: command parsing,
/// mapping resolution and the user-visible run summary.
///
/// All formatting logic (mapping model, descriptor extraction, manifest parsing,
/// table writing) lives in the [`scholar-batch-core`] crate. This module is
/// strictly CLI glue.
///
/// ## How To Use
/// - From the shell: `scholar-batch format <batch_dir> [--mapping <file>]`.
/// - Programmatically (integration tests): build a [`Cli`] and call [`run`].
///
/// [`scholar-batch-core`]: ../../scholar-batch-core/
use crate::load_config::{load_mapping, resolve_mapping_path, MAPPING_ENV};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scholar_batch_core::format::{format_directory, FormatReport};
use std::path::PathBuf;

/// CLI for scholar-batch: draft a batch-upload metadata table from item directories.
#[derive(Parser, Debug)]
#[clap(
    name = "scholar-batch",
    version,
    about = "Transform Dublin Core item directories into a tab-separated batch-upload table"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill out the batch metadata table for every item directory under PATH
    Format {
        /// Batch directory; the table is written to PATH.tab
        path: PathBuf,
        /// Column mapping YAML (defaults to default-mapping.yml in the working directory)
        #[clap(long, env = MAPPING_ENV)]
        mapping: Option<PathBuf>,
    },
}

/// CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Format { path, mapping } => {
            let mapping_path = resolve_mapping_path(mapping);
            let mapping = load_mapping(&mapping_path)?;
            tracing::info!(command = "format", path = %path.display(), "Starting batch formatting");

            let report = format_directory(&path, &mapping)
                .with_context(|| format!("Failed to format batch directory {}", path.display()))?;
            tracing::info!(command = "format", items = report.items.len(), "Formatting complete");
            print_summary(&report);
            Ok(())
        }
    }
}

fn print_summary(report: &FormatReport) {
    println!(
        "Format complete: {} item(s), {} file(s) written to {}",
        report.items.len(),
        report.file_count(),
        report.output_path.display()
    );
    for item in &report.items {
        println!(
            "  {} ({} file(s), {} columns)",
            item.directory.display(),
            item.file_count,
            item.row_width
        );
    }
}
