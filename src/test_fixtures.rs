//! Test fixtures for workflow tests
//!
//! Provides a scripted `Converter` and small helpers for building source and
//! destination trees in temporary directories.

#![cfg(test)]

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::conversion::{ConversionError, Converter};

/// Converter that copies the input bytes to the output path
///
/// With `failing_on(n)` the n-th call (1-based) fails without writing anything.
#[derive(Default)]
pub struct MockConverter {
    fail_on: Option<usize>,
    calls: RefCell<Vec<PathBuf>>,
}

impl MockConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Converter for MockConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        self.calls.borrow_mut().push(input.to_path_buf());
        if self.fail_on == Some(self.call_count()) {
            return Err(ConversionError::Spawn(io::Error::other("mock converter failure")));
        }
        fs::copy(input, output).map_err(ConversionError::Spawn)?;
        Ok(())
    }
}

/// Create each named subdirectory of `root`
pub fn make_dirs(root: &Path, names: &[&str]) {
    for name in names {
        fs::create_dir_all(root.join(name)).expect("Failed to create directory");
    }
}

/// Create each named file in `dir` with its name as content
pub fn write_files(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).expect("Failed to create directory");
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).expect("Failed to write file");
    }
}

/// Sorted names of the regular files directly in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mock_converter_copies_content() {
        let dir = TempDir::new().unwrap();
        write_files(dir.path(), &["in.ogg"]);
        let converter = MockConverter::new();

        converter
            .convert(&dir.path().join("in.ogg"), &dir.path().join("in.wav"))
            .unwrap();

        assert_eq!(fs::read(dir.path().join("in.wav")).unwrap(), b"in.ogg");
        assert_eq!(converter.call_count(), 1);
    }

    #[test]
    fn test_mock_converter_fails_on_requested_call() {
        let dir = TempDir::new().unwrap();
        write_files(dir.path(), &["a.ogg", "b.ogg"]);
        let converter = MockConverter::failing_on(2);

        assert!(converter.convert(&dir.path().join("a.ogg"), &dir.path().join("a.wav")).is_ok());
        assert!(converter.convert(&dir.path().join("b.ogg"), &dir.path().join("b.wav")).is_err());
        assert!(!dir.path().join("b.wav").exists());
    }

    #[test]
    fn test_file_names_excludes_directories() {
        let dir = TempDir::new().unwrap();
        write_files(dir.path(), &["b.txt", "a.txt"]);
        make_dirs(dir.path(), &["sub"]);

        assert_eq!(file_names(dir.path()), vec!["a.txt", "b.txt"]);
    }
}
