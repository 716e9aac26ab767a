//! High-level pipeline: item directories → metadata + file records → table.
//!
//! [`format_directory`] is the entry point used by the CLI. It
//!   - enumerates the item directories under the batch root,
//!   - creates `<root>.tab`,
//!   - writes the header row and one row per item, in enumeration order,
//!   - returns a [`FormatReport`] describing what was written.
//!
//! The first missing or malformed input aborts the run. A partially written
//! table may be left on disk in that case and must not be used.

use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::contract::RowSink;
use crate::directories::list_item_directories;
use crate::dublin_core::ItemMetadata;
use crate::error::{FormatError, Result};
use crate::manifest::{local_path, read_manifest, FileRecord};
use crate::mapping::FieldMapping;
use crate::table::{header_row, item_row, output_path, TabWriter};

/// One item directory with its extracted metadata and file records.
#[derive(Debug, Clone)]
pub struct Item {
    pub path: PathBuf,
    pub local_path: String,
    pub metadata: ItemMetadata,
    pub files: Vec<FileRecord>,
}

impl Item {
    pub fn load(dir: &Path, mapping: &FieldMapping) -> Result<Self> {
        let metadata = ItemMetadata::load(dir, mapping)?;
        let files = read_manifest(dir)?;
        Ok(Self {
            path: dir.to_path_buf(),
            local_path: local_path(dir),
            metadata,
            files,
        })
    }

    pub fn row(&self, mapping: &FieldMapping) -> Vec<Option<String>> {
        item_row(mapping, &self.metadata, &self.files)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub directory: PathBuf,
    pub file_count: usize,
    pub row_width: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatReport {
    pub output_path: PathBuf,
    pub items: Vec<ItemReport>,
}

impl FormatReport {
    pub fn file_count(&self) -> usize {
        self.items.iter().map(|i| i.file_count).sum()
    }
}

/// Formats every item under `root` into `<root>.tab`.
pub fn format_directory(root: &Path, mapping: &FieldMapping) -> Result<FormatReport> {
    info!(root = %root.display(), "[FORMAT] Starting batch formatting");
    let directories = list_item_directories(root)?;

    let output = output_path(root);
    let file = File::create(&output).map_err(|e| {
        error!(error = ?e, path = %output.display(), "[FORMAT] Failed to create output table");
        FormatError::from_io(&output, e)
    })?;
    let mut writer = TabWriter::new(file);

    let items = match write_rows(&directories, mapping, &mut writer) {
        Ok(items) => items,
        Err(e) => {
            error!(error = %e, path = %output.display(), "[FORMAT] Aborted; output table is incomplete");
            return Err(e);
        }
    };

    info!(
        path = %output.display(),
        items = items.len(),
        "[FORMAT] Wrote batch table"
    );
    Ok(FormatReport {
        output_path: output,
        items,
    })
}

/// Writes the header and one row per directory into `sink`, in the given
/// order, then finishes the sink.
pub fn write_rows<S>(
    directories: &[PathBuf],
    mapping: &FieldMapping,
    sink: &mut S,
) -> Result<Vec<ItemReport>>
where
    S: RowSink + ?Sized,
{
    sink.write_row(&header_row(mapping))?;

    let mut reports = Vec::with_capacity(directories.len());
    for dir in directories {
        info!(item = %dir.display(), "[FORMAT] Processing item");
        let item = Item::load(dir, mapping)?;
        let row = item.row(mapping);
        sink.write_row(&row)?;
        reports.push(ItemReport {
            directory: item.path,
            file_count: item.files.len(),
            row_width: row.len(),
        });
    }

    sink.finish()?;
    Ok(reports)
}
