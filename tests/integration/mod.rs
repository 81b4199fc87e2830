// Integration test utilities and common code
// WHY: Centralized library fixture avoids duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const GUGONG_TEXT: &str = "欢迎来到故宫！故宫始建于1406年，占地约72万平方米。\r\n\r\n太和殿高35.05米……它是紫禁城内最高的建筑。\nThe Hall of Supreme Harmony is 35.05 m tall. Please stay with the group!";

pub const GUGONG_EXPECTED: [&str; 6] = [
    "欢迎来到故宫！",
    "故宫始建于1406年，占地约72万平方米。",
    "太和殿高35.05米……",
    "它是紫禁城内最高的建筑。",
    "The Hall of Supreme Harmony is 35.05 m tall.",
    "Please stay with the group!",
];

pub const CHANGCHENG_TEXT: &str = "长城全长约21196.18千米\n东起山海关——西至嘉峪关。";

pub const CHANGCHENG_EXPECTED: [&str; 3] = ["长城全长约21196.18千米", "东起山海关——", "西至嘉峪关。"];

/// Temporary guide library: a root directory with list.json and guide files
pub struct TestLibrary {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestLibrary {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Library with two guides listed in a `{"list": [...]}` catalog
    pub fn with_sample_guides() -> Self {
        let library = Self::new();
        library.write_catalog(
            r#"{"list": [
                {"name": "故宫", "file": "gugong.txt"},
                {"name": "长城", "file": "changcheng.txt"}
            ]}"#,
        );
        library.create_guide("gugong.txt", GUGONG_TEXT);
        library.create_guide("changcheng.txt", CHANGCHENG_TEXT);
        library
    }

    pub fn write_catalog(&self, json: &str) -> PathBuf {
        self.create_guide("list.json", json)
    }

    /// Create a guide file with given content, making parent directories as needed
    pub fn create_guide<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_golden_file(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines",
            context, expected_lines.len(), actual_lines.len()
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context, i + 1, expected_line, actual_line
            );
        }
    }
}
