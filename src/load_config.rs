/// `load_config` module: resolves and loads the column mapping for a run.
///
/// The mapping source is resolved exactly once, at CLI start-up:
///   1. `--mapping <file>` (or the `SCHOLAR_BATCH_MAPPING` environment variable,
///      which clap folds into the same flag), else
///   2. [`DEFAULT_MAPPING`] relative to the working directory.
///
/// Parsing itself lives in `scholar_batch_core::mapping`; this module reads the
/// file and attaches CLI-level context to failures.
use anyhow::{Context, Result};
use scholar_batch_core::mapping::FieldMapping;
use scholar_batch_core::FormatError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const DEFAULT_MAPPING: &str = "default-mapping.yml";

pub const MAPPING_ENV: &str = "SCHOLAR_BATCH_MAPPING";

pub fn resolve_mapping_path(explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => {
            info!(mapping_path = %path.display(), "Using mapping file from arguments");
            path
        }
        None => {
            info!(mapping_path = DEFAULT_MAPPING, "No mapping given; using default mapping file");
            PathBuf::from(DEFAULT_MAPPING)
        }
    }
}

/// Reads and parses the mapping YAML at `path`.
pub fn load_mapping<P: AsRef<Path>>(path: P) -> Result<FieldMapping> {
    let path_ref = path.as_ref();
    info!(mapping_path = ?path_ref, "Loading mapping from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(mapping_path = ?path_ref, "Mapping file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, mapping_path = ?path_ref, "Failed to read mapping file");
            return Err(FormatError::from_io(path_ref, e))
                .with_context(|| format!("Failed to read mapping file {:?}", path_ref));
        }
    };

    FieldMapping::from_yaml_str(&content, path_ref)
        .with_context(|| format!("Failed to load mapping {:?}", path_ref))
}
