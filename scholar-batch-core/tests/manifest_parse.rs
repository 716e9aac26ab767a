use scholar_batch_core::manifest::{
    local_path, parse_manifest, read_manifest, Bundle, FileRecord, ManifestLine, Visibility,
};
use scholar_batch_core::FormatError;
use std::fs::{create_dir_all, write};
use std::path::Path;
use tempfile::tempdir;

const PREFIX: &str = "batch/item_1";

#[test]
fn original_line_with_description_becomes_titled_record() {
    let records = parse_manifest("file1.pdf\tbundle:ORIGINAL\tdescription:Title One\n", PREFIX);
    assert_eq!(
        records,
        vec![FileRecord {
            bundle: Bundle::Original,
            path: "batch/item_1file1.pdf".to_string(),
            title: Some("Title One".to_string()),
            visibility: None,
        }]
    );
}

#[test]
fn license_line_is_restricted_and_untitled() {
    let records = parse_manifest("file2.pdf\tbundle:LICENSE\tdescription:Ignored\n", PREFIX);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "batch/item_1file2.pdf");
    assert_eq!(records[0].title, None);
    assert_eq!(records[0].visibility, Some(Visibility::Restricted));
}

#[test]
fn records_are_grouped_by_bundle_in_manifest_order() {
    let manifest = "\
license.txt\tbundle:LICENSE
a.tif\tbundle:ARCHIVAL\tdescription:Master A
a.pdf\tbundle:ORIGINAL\tdescription:Access A
b.tif\tbundle:ARCHIVAL
b.pdf\tbundle:ORIGINAL
";
    let records = parse_manifest(manifest, "x/");
    let order: Vec<(&str, Bundle)> = records
        .iter()
        .map(|r| (r.path.as_str(), r.bundle))
        .collect();
    assert_eq!(
        order,
        vec![
            ("x/a.pdf", Bundle::Original),
            ("x/b.pdf", Bundle::Original),
            ("x/a.tif", Bundle::Archival),
            ("x/b.tif", Bundle::Archival),
            ("x/license.txt", Bundle::License),
        ]
    );
    assert_eq!(records[2].title.as_deref(), Some("Master A"));
    assert_eq!(records[2].visibility, Some(Visibility::Restricted));
    assert_eq!(records[3].title, None);
}

struct LineCase {
    name: &'static str,
    line: &'static str,
    expected: ManifestLine<'static>,
    title: Option<&'static str>,
}

#[test]
fn manifest_line_split_table_driven() {
    let cases = vec![
        LineCase {
            name: "three fields",
            line: "f.pdf\tbundle:ORIGINAL\tdescription:T",
            expected: ManifestLine {
                name: Some("f.pdf"),
                bundle_tag: Some("bundle:ORIGINAL"),
                annotation: Some("description:T"),
            },
            title: Some("T"),
        },
        LineCase {
            name: "trailing empty field is dropped",
            line: "f.pdf\tbundle:ORIGINAL\t",
            expected: ManifestLine {
                name: Some("f.pdf"),
                bundle_tag: Some("bundle:ORIGINAL"),
                annotation: None,
            },
            title: None,
        },
        LineCase {
            name: "carriage return is stripped",
            line: "f.pdf\tbundle:ARCHIVAL\tdescription:T\r\n",
            expected: ManifestLine {
                name: Some("f.pdf"),
                bundle_tag: Some("bundle:ARCHIVAL"),
                annotation: Some("description:T"),
            },
            title: Some("T"),
        },
        LineCase {
            name: "annotation without prefix is kept whole",
            line: "f.pdf\tbundle:ORIGINAL\tplain note",
            expected: ManifestLine {
                name: Some("f.pdf"),
                bundle_tag: Some("bundle:ORIGINAL"),
                annotation: Some("plain note"),
            },
            title: Some("plain note"),
        },
        LineCase {
            name: "every description: occurrence is removed",
            line: "f.pdf\tbundle:ORIGINAL\tdescription:a description:b",
            expected: ManifestLine {
                name: Some("f.pdf"),
                bundle_tag: Some("bundle:ORIGINAL"),
                annotation: Some("description:a description:b"),
            },
            title: Some("a b"),
        },
        LineCase {
            name: "single field",
            line: "bundle:ORIGINAL",
            expected: ManifestLine {
                name: Some("bundle:ORIGINAL"),
                bundle_tag: None,
                annotation: None,
            },
            title: None,
        },
    ];

    for case in cases {
        let parsed = ManifestLine::split(case.line);
        assert_eq!(parsed, case.expected, "case: {}", case.name);
        assert_eq!(parsed.title().as_deref(), case.title, "case: {}", case.name);
    }
}

#[test]
fn lines_without_a_bundle_marker_are_ignored() {
    let records = parse_manifest("notes.txt\n\nf.pdf\tbundle:ORIGINAL\n", "");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "f.pdf");
}

#[test]
fn local_path_is_last_two_components() {
    assert_eq!(local_path(Path::new("/data/batch/item_1")), "batch/item_1");
    assert_eq!(local_path(Path::new("/item_1")), "item_1");
}

#[test]
fn read_manifest_prefixes_with_local_path() {
    let tmp = tempdir().unwrap();
    let item = tmp.path().join("batch").join("item_7");
    create_dir_all(&item).unwrap();
    write(item.join("contents"), "scan.pdf\tbundle:ORIGINAL\n").unwrap();

    let records = read_manifest(&item).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "batch/item_7scan.pdf");
}

#[test]
fn read_manifest_missing_file_is_not_found() {
    let tmp = tempdir().unwrap();
    let err = read_manifest(tmp.path()).unwrap_err();
    assert!(matches!(err, FormatError::NotFound { .. }), "got {err:?}");
}
