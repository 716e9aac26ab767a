//! Dublin Core descriptor loading and per-column value extraction.
//!
//! An item's `dublin_core.xml` is a flat list of `dcvalue` elements:
//!
//! ```xml
//! <dublin_core>
//!   <dcvalue element="title" qualifier="none">A Title</dcvalue>
//! </dublin_core>
//! ```
//!
//! The descriptor is parsed once into [`DcValue`] triples and columns are
//! selected from it with a structured predicate ([`FieldDefinition::matches`]),
//! so qualifiers containing quotes or other XPath syntax select literally.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

use crate::error::{FormatError, Result};
use crate::mapping::{FieldDefinition, FieldMapping};

pub const DESCRIPTOR_FILE: &str = "dublin_core.xml";

/// Separator used between values of a multi-valued column.
pub const VALUE_SEPARATOR: &str = "|";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcValue {
    pub element: String,
    pub qualifier: Option<String>,
    pub text: String,
}

/// A parsed descriptor, values kept in document order.
#[derive(Debug, Clone, Default)]
pub struct DublinCore {
    values: Vec<DcValue>,
}

impl DublinCore {
    /// Reads and parses `<item_dir>/dublin_core.xml`.
    pub fn load(item_dir: &Path) -> Result<Self> {
        let path = item_dir.join(DESCRIPTOR_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            error!(error = ?e, path = %path.display(), "[DC] Failed to read descriptor");
            FormatError::from_io(&path, e)
        })?;
        Self::parse(&content, &path)
    }

    /// Parses descriptor XML. `source` is only used in error messages.
    pub fn parse(xml: &str, source: &Path) -> Result<Self> {
        let xml_error = |reason: String| {
            error!(path = %source.display(), reason = %reason, "[DC] Malformed descriptor XML");
            FormatError::XmlParse {
                path: source.to_path_buf(),
                reason,
            }
        };

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut values: Vec<DcValue> = Vec::new();
        // One slot per open element; `Some(i)` when it is the dcvalue at values[i].
        let mut open: Vec<Option<usize>> = Vec::new();
        let mut root_seen = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if open.is_empty() {
                        enter_root(&mut root_seen).map_err(&xml_error)?;
                    }
                    if is_dcvalue(e) {
                        values.push(start_value(e).map_err(&xml_error)?);
                        open.push(Some(values.len() - 1));
                    } else {
                        open.push(None);
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if open.is_empty() {
                        enter_root(&mut root_seen).map_err(&xml_error)?;
                    }
                    if is_dcvalue(e) {
                        values.push(start_value(e).map_err(&xml_error)?);
                    }
                }
                Ok(Event::End(_)) => {
                    open.pop();
                }
                Ok(Event::Text(ref t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| xml_error(format!("at position {}: {e}", reader.error_position())))?;
                    if open.is_empty() && !text.trim().is_empty() {
                        return Err(xml_error(format!(
                            "text outside the root element at position {}",
                            reader.buffer_position()
                        )));
                    }
                    append_text(&mut values, &open, &text);
                }
                Ok(Event::CData(ref c)) => {
                    if open.is_empty() {
                        return Err(xml_error("CDATA outside the root element".to_string()));
                    }
                    let text = String::from_utf8_lossy(c);
                    append_text(&mut values, &open, &text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(xml_error(format!(
                        "at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
        }

        if !root_seen {
            return Err(xml_error("document has no root element".to_string()));
        }
        if !open.is_empty() {
            return Err(xml_error(format!(
                "{} element(s) left unclosed at end of document",
                open.len()
            )));
        }

        debug!(path = %source.display(), values = values.len(), "[DC] Parsed descriptor");
        Ok(Self { values })
    }

    pub fn values(&self) -> &[DcValue] {
        &self.values
    }

    /// Texts of every value selected by `definition`, in document order.
    pub fn select(&self, definition: &FieldDefinition) -> Vec<&str> {
        self.values
            .iter()
            .filter(|v| definition.matches(&v.element, v.qualifier.as_deref()))
            .map(|v| v.text.as_str())
            .collect()
    }
}

fn is_dcvalue(e: &BytesStart<'_>) -> bool {
    e.local_name().as_ref() == b"dcvalue"
}

fn start_value(e: &BytesStart<'_>) -> std::result::Result<DcValue, String> {
    let mut element = None;
    let mut qualifier = None;
    for attr in e.attributes() {
        let attr = attr.map_err(|e| format!("bad attribute on dcvalue: {e}"))?;
        let value = attr
            .unescape_value()
            .map_err(|e| format!("bad attribute value on dcvalue: {e}"))?
            .into_owned();
        match attr.key.as_ref() {
            b"element" => element = Some(value),
            b"qualifier" => qualifier = Some(value),
            _ => {}
        }
    }
    Ok(DcValue {
        // A dcvalue without an element attribute can never be selected.
        element: element.unwrap_or_default(),
        qualifier,
        text: String::new(),
    })
}

fn enter_root(root_seen: &mut bool) -> std::result::Result<(), String> {
    if *root_seen {
        return Err("more than one root element".to_string());
    }
    *root_seen = true;
    Ok(())
}

fn append_text(values: &mut [DcValue], open: &[Option<usize>], text: &str) {
    for index in open.iter().flatten() {
        values[*index].text.push_str(text);
    }
}

/// Extracted values for every mapped column of one item.
#[derive(Debug, Clone, Default)]
pub struct ItemMetadata {
    fields: Vec<(String, Vec<String>)>,
}

impl ItemMetadata {
    /// Loads the descriptor of `item_dir` and resolves every mapping entry.
    pub fn load(item_dir: &Path, mapping: &FieldMapping) -> Result<Self> {
        let document = DublinCore::load(item_dir)?;
        Ok(Self::extract(&document, mapping))
    }

    pub fn extract(document: &DublinCore, mapping: &FieldMapping) -> Self {
        let fields = mapping
            .iter()
            .map(|(column, definition)| {
                let texts = document
                    .select(definition)
                    .into_iter()
                    .map(str::to_owned)
                    .collect::<Vec<_>>();
                debug!(column = %column, matches = texts.len(), "[DC] Resolved column");
                (column.to_string(), texts)
            })
            .collect();
        Self { fields }
    }

    pub fn values(&self, column: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, texts)| texts.as_slice())
            .unwrap_or(&[])
    }

    /// Cell value for `column`: matched texts joined by `|`, with newlines
    /// inside a text also turned into `|`. `None` when nothing matched.
    pub fn formatted_field(&self, column: &str) -> Option<String> {
        let texts = self.values(column);
        if texts.is_empty() {
            return None;
        }
        Some(texts.join(VALUE_SEPARATOR).replace('\n', VALUE_SEPARATOR))
    }
}
