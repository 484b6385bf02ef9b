//! Audio conversion module
//!
//! Wraps the external ffmpeg tool behind the `Converter` trait and provides
//! the destination-side file operations (purge and move).

mod ffmpeg;
mod output;

pub use ffmpeg::{FfmpegConverter, LaunchOptions};
pub(crate) use output::{
    has_extension, intermediate_path, is_hidden, move_to_destination, output_file_name,
    purge_output_files, PurgeOutcome,
};

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Errors from a single external conversion
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("ffmpeg binary not found")]
    ToolNotFound,

    #[error("Failed to spawn ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("ffmpeg reported success but produced no file at {}", .0.display())]
    MissingOutput(PathBuf),
}

/// Converts one input file into one output file
///
/// Implementations block until the output exists or the conversion failed.
/// An existing file at `output` is overwritten.
pub trait Converter {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError>;
}

/// Locate the ffmpeg binary
///
/// Order: explicit override, bundled `resources/bin/ffmpeg` (development
/// tree, app bundle, next to the executable), then `ffmpeg` on `PATH`.
pub fn get_ffmpeg_path(override_path: Option<&Path>) -> Result<PathBuf, String> {
    if let Some(path) = override_path {
        if path.exists() {
            log::debug!("Using configured ffmpeg at {:?}", path);
            return Ok(path.to_path_buf());
        }
        return Err(format!("Configured ffmpeg not found at {:?}", path));
    }

    let binary = ffmpeg_binary_name();

    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let dev_path = PathBuf::from(manifest_dir)
            .join("resources")
            .join("bin")
            .join(binary);

        if dev_path.exists() {
            log::debug!("Found ffmpeg at development path: {:?}", dev_path);
            return Ok(dev_path);
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        // macOS app bundle: Contents/MacOS/../Resources/bin/ffmpeg
        let bundle_path = exe_dir.join("..").join("Resources").join("bin").join(binary);
        if bundle_path.exists() {
            log::debug!("Found ffmpeg at bundle path: {:?}", bundle_path);
            return Ok(bundle_path);
        }

        let local_path = exe_dir.join("resources").join("bin").join(binary);
        if local_path.exists() {
            log::debug!("Found ffmpeg at local path: {:?}", local_path);
            return Ok(local_path);
        }
    }

    if let Some(path) = find_on_path(binary) {
        log::debug!("Found ffmpeg on PATH: {:?}", path);
        return Ok(path);
    }

    Err("ffmpeg binary not found in resources/bin or on PATH".to_string())
}

/// Verify that ffmpeg exists and is executable
pub fn verify_ffmpeg(override_path: Option<&Path>) -> Result<PathBuf, String> {
    let path = get_ffmpeg_path(override_path)?;

    if !path.is_file() {
        return Err(format!("ffmpeg not found at {:?}", path));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(&path)
            .map_err(|e| format!("Failed to get ffmpeg metadata: {}", e))?;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(format!("ffmpeg at {:?} is not executable", path));
        }
    }

    log::info!("ffmpeg verified at: {:?}", path);
    Ok(path)
}

fn ffmpeg_binary_name() -> &'static str {
    if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" }
}

fn find_on_path(binary: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_path_is_used_when_present() {
        let dir = TempDir::new().unwrap();
        let fake = dir.path().join("my-ffmpeg");
        std::fs::write(&fake, b"").unwrap();

        let found = get_ffmpeg_path(Some(&fake)).unwrap();
        assert_eq!(found, fake);
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let result = get_ffmpeg_path(Some(Path::new("/nonexistent/ffmpeg")));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_verify_rejects_non_executable() {
        let dir = TempDir::new().unwrap();
        let fake = dir.path().join("ffmpeg");
        std::fs::write(&fake, b"#!/bin/sh\n").unwrap();

        let err = verify_ffmpeg(Some(&fake)).unwrap_err();
        assert!(err.contains("not executable"));
    }
}
