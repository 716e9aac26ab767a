//! Row assembly and the tab-separated table writer.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::contract::RowSink;
use crate::dublin_core::ItemMetadata;
use crate::error::{FormatError, Result};
use crate::manifest::FileRecord;
use crate::mapping::FieldMapping;

/// Header labels of the six positional cells written per file record.
pub const FILE_HEADERS: [&str; 6] = [
    "file_path",
    "file_title",
    "file_visibility",
    "file_embargo_release",
    "file_uri",
    "file_pid",
];

pub const OUTPUT_EXTENSION: &str = ".tab";

/// `<root>.tab`, appended verbatim: `batch/` becomes `batch/.tab`.
pub fn output_path(root: &Path) -> PathBuf {
    let mut name = OsString::from(root.as_os_str());
    name.push(OUTPUT_EXTENSION);
    PathBuf::from(name)
}

/// Mapping columns in mapping order followed by the file headers.
pub fn header_row(mapping: &FieldMapping) -> Vec<Option<String>> {
    mapping
        .columns()
        .chain(FILE_HEADERS)
        .map(|h| Some(h.to_string()))
        .collect()
}

/// Six cells for one file: path, title, visibility, then embargo release
/// date, URI and persistent identifier, which are always left empty.
pub fn file_cells(record: &FileRecord) -> [Option<String>; 6] {
    [
        Some(record.path.clone()),
        record.title.clone(),
        record.visibility.map(|v| v.as_str().to_string()),
        None,
        None,
        None,
    ]
}

/// One data row: formatted metadata per mapping column, then six cells per
/// file record. Width is `mapping.len() + 6 * files.len()`.
pub fn item_row(
    mapping: &FieldMapping,
    metadata: &ItemMetadata,
    files: &[FileRecord],
) -> Vec<Option<String>> {
    let mut row: Vec<Option<String>> = mapping
        .columns()
        .map(|column| metadata.formatted_field(column))
        .collect();
    for record in files {
        row.extend(file_cells(record));
    }
    row
}

/// Tab-delimited [`RowSink`] over any writer. Rows may differ in width.
pub struct TabWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> TabWriter<W> {
    pub fn new(writer: W) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        Self { inner }
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| {
                let io = std::io::Error::new(e.error().kind(), e.to_string());
                FormatError::Table(csv::Error::from(io))
            })
    }
}

impl<W: Write> RowSink for TabWriter<W> {
    fn write_row(&mut self, row: &[Option<String>]) -> Result<()> {
        self.inner
            .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.inner.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
