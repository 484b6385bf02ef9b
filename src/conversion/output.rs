//! Destination-side file operations
//!
//! Everything here works one directory level deep. Extension matching is
//! ASCII case-insensitive and hidden files (leading `.`) are ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of purging output files from the destination
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PurgeOutcome {
    /// Files that were deleted
    pub removed: Vec<PathBuf>,
    /// Files that could not be deleted, with the error text
    pub failed: Vec<(PathBuf, String)>,
}

/// Check whether `path` has extension `ext` (without the dot)
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Path the tool writes to before the move
///
/// Lives next to the input as `<stem>.<tag>.<ext>`, so a file the user keeps
/// beside the input under the final output name is never written or removed.
pub fn intermediate_path(input: &Path, output_ext: &str, tag: &str) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(format!(".{}.{}", tag, output_ext));
    input.with_file_name(name)
}

/// Final name of the converted file: the input stem with the output extension
pub fn output_file_name(input: &Path, output_ext: &str) -> PathBuf {
    PathBuf::from(input.file_stem().unwrap_or_default()).with_extension(output_ext)
}

/// Delete every `*.ext` file directly under `dir`
///
/// A file that cannot be deleted is recorded in `failed` and skipped; only
/// failing to read `dir` itself is an error.
pub fn purge_output_files(dir: &Path, ext: &str) -> io::Result<PurgeOutcome> {
    let mut outcome = PurgeOutcome::default();
    let mut targets = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(entry) => targets.push(entry.path()),
            Err(e) => {
                log::warn!("Could not read an entry of {}: {}", dir.display(), e);
                outcome.failed.push((dir.to_path_buf(), e.to_string()));
            }
        }
    }
    targets.retain(|path| path.is_file() && !is_hidden(path) && has_extension(path, ext));
    targets.sort();

    for path in targets {
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Purged {}", path.display());
                outcome.removed.push(path);
            }
            Err(e) => {
                log::warn!("Could not delete {}: {}", path.display(), e);
                outcome.failed.push((path, e.to_string()));
            }
        }
    }

    Ok(outcome)
}

/// Move `src` to `dest`, replacing an existing file at `dest`
///
/// Uses a rename; when source and destination are on different
/// filesystems the file is copied and the source removed.
pub fn move_to_destination(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!("Rename across devices, copying {} instead", src.display());
            fs::copy(src, dest)?;
            fs::remove_file(src)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn test_has_extension_is_case_insensitive() {
        assert!(has_extension(Path::new("a.wav"), "wav"));
        assert!(has_extension(Path::new("A.WAV"), "wav"));
        assert!(!has_extension(Path::new("a.wav.bak"), "wav"));
        assert!(!has_extension(Path::new("wav"), "wav"));
    }

    #[test]
    fn test_intermediate_path_is_tagged_next_to_input() {
        let path = intermediate_path(Path::new("/music/set1/03 Welcome.ogg"), "wav", "1a2b3c4d");
        assert_eq!(path, PathBuf::from("/music/set1/03 Welcome.1a2b3c4d.wav"));
        assert!(has_extension(&path, "wav"));
    }

    #[test]
    fn test_output_file_name_uses_input_stem() {
        assert_eq!(
            output_file_name(Path::new("/music/set1/v1.2 Welcome.ogg"), "wav"),
            PathBuf::from("v1.2 Welcome.wav")
        );
    }

    #[test]
    fn test_purge_removes_only_output_extension() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.wav"));
        touch(&dir.path().join("b.wav"));
        touch(&dir.path().join("c.txt"));
        touch(&dir.path().join("d.wav.bak"));
        fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let outcome = purge_output_files(dir.path(), "wav").unwrap();

        assert_eq!(outcome.removed.len(), 2);
        assert!(outcome.failed.is_empty());
        assert!(!dir.path().join("a.wav").exists());
        assert!(!dir.path().join("b.wav").exists());
        assert!(dir.path().join("c.txt").exists());
        assert!(dir.path().join("d.wav.bak").exists());
        assert!(dir.path().join("nested.wav").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_purge_records_files_it_cannot_delete() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("a.wav"));
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();

        let outcome = purge_output_files(dir.path(), "wav");
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
        let outcome = outcome.unwrap();

        // Root ignores directory permissions and deletes anyway
        if dir.path().join("a.wav").exists() {
            assert!(outcome.removed.is_empty());
            assert_eq!(outcome.failed.len(), 1);
            assert!(outcome.failed[0].0.ends_with("a.wav"));
        } else {
            assert_eq!(outcome.removed.len(), 1);
            assert!(outcome.failed.is_empty());
        }
    }

    #[test]
    fn test_purge_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(purge_output_files(&dir.path().join("gone"), "wav").is_err());
    }

    #[test]
    fn test_move_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("new.wav");
        let dest = dir.path().join("out.wav");
        fs::write(&src, b"new").unwrap();
        fs::write(&dest, b"old").unwrap();

        move_to_destination(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }
}
