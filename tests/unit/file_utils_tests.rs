/*!
 * Tests for filesystem helpers.
 */

use lintra::file_utils::FileManager;

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_file_and_dir_existence_checks() {
    let dir = create_temp_dir().unwrap();
    let file = create_test_file(dir.path(), "a.txt", "hello").unwrap();

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(dir.path()));
    assert!(FileManager::dir_exists(dir.path()));
    assert!(!FileManager::dir_exists(&file));
    assert!(!FileManager::file_exists(dir.path().join("missing.txt")));
}

#[test]
fn test_ensure_dir_creates_nested_directories() {
    let dir = create_temp_dir().unwrap();
    let nested = dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested).unwrap();
    assert!(FileManager::dir_exists(&nested));

    // Idempotent on an existing directory
    FileManager::ensure_dir(&nested).unwrap();
}

#[test]
fn test_read_lines_preserves_blank_lines_and_order() {
    let dir = create_temp_dir().unwrap();
    let file = create_test_file(dir.path(), "input.txt", "first\n\nthird\n").unwrap();

    let lines = FileManager::read_lines(&file).unwrap();
    assert_eq!(lines, vec!["first", "", "third"]);
}

#[test]
fn test_read_lines_fails_on_missing_file() {
    let dir = create_temp_dir().unwrap();
    assert!(FileManager::read_lines(dir.path().join("nope.txt")).is_err());
}

#[test]
fn test_output_path_uppercases_the_target_code() {
    let path = FileManager::generate_output_path("/tmp/out", "fr");
    assert_eq!(path.to_str().unwrap(), "/tmp/out/Translated_To_FR.txt");
}

#[test]
fn test_write_lines_concatenates_without_extra_separators() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("out").join("result.txt");

    let lines = vec![
        "Hello | Bonjour\n".to_string(),
        "World | Monde\n".to_string(),
    ];
    FileManager::write_lines(&path, &lines).unwrap();

    let content = FileManager::read_to_string(&path).unwrap();
    assert_eq!(content, "Hello | Bonjour\nWorld | Monde\n");
}

#[test]
fn test_log_append_accumulates_timestamped_entries() {
    let dir = create_temp_dir().unwrap();
    let log = dir.path().join("run.log");

    FileManager::append_to_log_file(&log, "first entry").unwrap();
    FileManager::append_to_log_file(&log, "second entry").unwrap();

    let content = FileManager::read_to_string(&log).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("first entry"));
    assert!(content.contains("second entry"));
}
