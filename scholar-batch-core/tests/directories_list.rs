use scholar_batch_core::directories::list_item_directories;
use scholar_batch_core::FormatError;
use std::fs::{create_dir_all, write};
use tempfile::tempdir;

#[test]
fn lists_visible_subdirectories_as_sorted_absolute_paths() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_dir_all(root.join("item_b")).unwrap();
    create_dir_all(root.join("item_a/nested")).unwrap();
    create_dir_all(root.join(".hidden")).unwrap();
    write(root.join("stray.txt"), "not an item").unwrap();

    let dirs = list_item_directories(root).unwrap();
    let names: Vec<String> = dirs
        .iter()
        .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["item_a", "item_b"]);
    assert!(dirs.iter().all(|d| d.is_absolute()));
}

#[test]
fn missing_root_is_not_found() {
    let tmp = tempdir().unwrap();
    let err = list_item_directories(&tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, FormatError::NotFound { .. }), "got {err:?}");
}

#[test]
fn file_root_is_rejected() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("batch.txt");
    write(&file, "").unwrap();
    let err = list_item_directories(&file).unwrap_err();
    assert!(matches!(err, FormatError::NotADirectory { .. }), "got {err:?}");
}
