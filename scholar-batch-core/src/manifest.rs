//! `contents` manifest parsing.
//!
//! Each manifest line is tab separated: file name, bundle tag and an optional
//! annotation that may carry a `description:` title. Lines are grouped by
//! bundle: all ORIGINAL lines first, then ARCHIVAL, then LICENSE, each group
//! in manifest order.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::error::{FormatError, Result};

pub const MANIFEST_FILE: &str = "contents";

const DESCRIPTION_PREFIX: &str = "description:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bundle {
    Original,
    Archival,
    License,
}

impl Bundle {
    /// Output order of the bundle blocks.
    pub const ALL: [Bundle; 3] = [Bundle::Original, Bundle::Archival, Bundle::License];

    pub fn marker(self) -> &'static str {
        match self {
            Bundle::Original => "bundle:ORIGINAL",
            Bundle::Archival => "bundle:ARCHIVAL",
            Bundle::License => "bundle:LICENSE",
        }
    }

    pub fn visibility(self) -> Option<Visibility> {
        match self {
            Bundle::Original => None,
            Bundle::Archival | Bundle::License => Some(Visibility::Restricted),
        }
    }

    fn carries_title(self) -> bool {
        !matches!(self, Bundle::License)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Restricted,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Restricted => "restricted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub bundle: Bundle,
    pub path: String,
    pub title: Option<String>,
    pub visibility: Option<Visibility>,
}

/// One manifest line split on tabs. Missing trailing fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestLine<'a> {
    pub name: Option<&'a str>,
    pub bundle_tag: Option<&'a str>,
    pub annotation: Option<&'a str>,
}

impl<'a> ManifestLine<'a> {
    pub fn split(line: &'a str) -> Self {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let mut fields: Vec<&str> = line.split('\t').collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        let mut fields = fields.into_iter();
        Self {
            name: fields.next(),
            bundle_tag: fields.next(),
            annotation: fields.next(),
        }
    }

    pub fn title(&self) -> Option<String> {
        self.annotation.map(|a| a.replace(DESCRIPTION_PREFIX, ""))
    }
}

/// Last two components of `item_dir` joined by `/`, e.g. `batch/item_1`.
pub fn local_path(item_dir: &Path) -> String {
    let components: Vec<String> = item_dir
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let start = components.len().saturating_sub(2);
    components[start..].join("/")
}

/// Reads `<item_dir>/contents` and parses it with the item's local path prefix.
pub fn read_manifest(item_dir: &Path) -> Result<Vec<FileRecord>> {
    let path = item_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(|e| {
        error!(error = ?e, path = %path.display(), "[MANIFEST] Failed to read manifest");
        FormatError::from_io(&path, e)
    })?;
    let records = parse_manifest(&content, &local_path(item_dir));
    info!(path = %path.display(), files = records.len(), "[MANIFEST] Parsed manifest");
    Ok(records)
}

/// Parses manifest text into file records, ORIGINAL block first, then
/// ARCHIVAL, then LICENSE. `prefix` is prepended to each file name as is.
pub fn parse_manifest(content: &str, prefix: &str) -> Vec<FileRecord> {
    let lines: Vec<&str> = content.lines().collect();

    for line in &lines {
        if !line.trim().is_empty() && !Bundle::ALL.iter().any(|b| line.contains(b.marker())) {
            warn!(line = %line, "[MANIFEST] Line matches no known bundle; ignored");
        }
    }

    let mut records = Vec::new();
    for bundle in Bundle::ALL {
        for line in lines.iter().filter(|l| l.contains(bundle.marker())) {
            let fields = ManifestLine::split(line);
            if fields.name.is_none() {
                warn!(line = %line, "[MANIFEST] Line has no file name");
            }
            let record = FileRecord {
                bundle,
                path: format!("{prefix}{}", fields.name.unwrap_or_default()),
                title: if bundle.carries_title() {
                    fields.title()
                } else {
                    None
                },
                visibility: bundle.visibility(),
            };
            debug!(?record, "[MANIFEST] File record");
            records.push(record);
        }
    }
    records
}
