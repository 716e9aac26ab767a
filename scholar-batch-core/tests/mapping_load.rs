use scholar_batch_core::mapping::{FieldDefinition, FieldMapping};
use scholar_batch_core::FormatError;
use std::path::Path;

fn parse(yaml: &str) -> Result<FieldMapping, FormatError> {
    FieldMapping::from_yaml_str(yaml, Path::new("mapping.yml"))
}

#[test]
fn keeps_document_order_of_columns() {
    let mapping = parse(
        r#"
title:
  element: title
  qualifiers: [none]
creator:
  element: contributor
  qualifiers:
    - author
    - editor
abstract:
  element: description
  qualifiers: [abstract]
"#,
    )
    .expect("mapping should load");

    let columns: Vec<&str> = mapping.columns().collect();
    assert_eq!(columns, vec!["title", "creator", "abstract"]);
    assert_eq!(
        mapping.get("creator"),
        Some(&FieldDefinition::new("contributor", &["author", "editor"]))
    );
}

#[test]
fn scalar_or_missing_qualifiers_are_accepted() {
    let mapping = parse(
        r#"
date:
  element: date
  qualifiers: issued
rights:
  element: rights
"#,
    )
    .unwrap();
    assert_eq!(mapping.get("date").unwrap().qualifiers, vec!["issued".to_string()]);
    assert!(mapping.get("rights").unwrap().qualifiers.is_empty());
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = parse("not-yaml: [:::").unwrap_err();
    assert!(matches!(err, FormatError::MappingParse { .. }), "got {err:?}");
    assert!(err.to_string().contains("YAML"));
}

#[test]
fn definition_without_element_names_the_column() {
    let err = parse("title:\n  qualifiers: [none]\n").unwrap_err();
    match err {
        FormatError::InvalidMapping { column, .. } => assert_eq!(column, "title"),
        other => panic!("expected InvalidMapping, got {other:?}"),
    }
}
