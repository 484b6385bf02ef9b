//! FFmpeg subprocess handling for audio conversion

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{ConversionError, Converter};

/// Process launch options for the external tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Ask the OS not to show a console window for the child (Windows only)
    pub hide_console_window: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            hide_console_window: true,
        }
    }
}

impl LaunchOptions {
    #[cfg(windows)]
    fn apply(&self, cmd: &mut Command) {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        if self.hide_console_window {
            cmd.creation_flags(CREATE_NO_WINDOW);
        }
    }

    #[cfg(not(windows))]
    fn apply(&self, _cmd: &mut Command) {}
}

/// Converter backed by an ffmpeg binary
#[derive(Debug, Clone)]
pub struct FfmpegConverter {
    ffmpeg_path: Option<PathBuf>,
    launch: LaunchOptions,
}

impl FfmpegConverter {
    /// `ffmpeg_path` of `None` means the tool could not be located; every
    /// conversion then fails with `ConversionError::ToolNotFound`.
    pub fn new(ffmpeg_path: Option<PathBuf>, launch: LaunchOptions) -> Self {
        Self { ffmpeg_path, launch }
    }

    pub fn ffmpeg_path(&self) -> Option<&Path> {
        self.ffmpeg_path.as_deref()
    }
}

impl Converter for FfmpegConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        let ffmpeg = self.ffmpeg_path.as_deref().ok_or(ConversionError::ToolNotFound)?;
        convert_file(ffmpeg, input, output, self.launch)
    }
}

/// Convert a single audio file using ffmpeg
///
/// Runs `ffmpeg -y -i <input> <output>` and waits for it to exit.
/// The output container is chosen by ffmpeg from the output extension.
pub fn convert_file(
    ffmpeg_path: &Path,
    input_path: &Path,
    output_path: &Path,
    launch: LaunchOptions,
) -> Result<(), ConversionError> {
    log::info!(
        "Converting: {} -> {}",
        input_path.display(),
        output_path.display()
    );

    let mut cmd = Command::new(ffmpeg_path);
    cmd.arg("-y").arg("-i").arg(input_path).arg(output_path);
    launch.apply(&mut cmd);

    let output = cmd.output().map_err(ConversionError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let last_line = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("Unknown error")
            .to_string();
        log::warn!("Conversion failed ({}): {}", output.status, last_line);
        return Err(ConversionError::Failed {
            status: output.status,
            stderr: last_line,
        });
    }

    if !output_path.is_file() {
        return Err(ConversionError::MissingOutput(output_path.to_path_buf()));
    }

    log::debug!("Successfully converted: {}", input_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_tool_fails_every_conversion() {
        let converter = FfmpegConverter::new(None, LaunchOptions::default());
        let result = converter.convert(Path::new("/a.ogg"), Path::new("/a.wav"));
        assert!(matches!(result, Err(ConversionError::ToolNotFound)));
    }

    #[test]
    fn test_spawn_error_for_nonexistent_binary() {
        let dir = TempDir::new().unwrap();
        let converter = FfmpegConverter::new(
            Some(dir.path().join("no-such-ffmpeg")),
            LaunchOptions::default(),
        );
        let result = converter.convert(&dir.path().join("a.ogg"), &dir.path().join("a.wav"));
        assert!(matches!(result, Err(ConversionError::Spawn(_))));
    }

    // Stub scripts stand in for ffmpeg. Kept in one test so no other test in
    // this module forks while a script is still open for writing.
    #[cfg(unix)]
    #[test]
    fn test_stub_tool_outcomes() {
        use std::os::unix::fs::PermissionsExt;

        fn write_script(path: &Path, body: &str) {
            std::fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let dir = TempDir::new().unwrap();
        let input = dir.path().join("x.ogg");
        std::fs::write(&input, b"vorbis").unwrap();
        let output = dir.path().join("x.wav");

        // Argument order is: -y -i <input> <output>
        let copying = dir.path().join("copy-ffmpeg");
        write_script(
            &copying,
            r#"[ "$1" = "-y" ] && [ "$2" = "-i" ] || exit 2
cp "$3" "$4""#,
        );
        convert_file(&copying, &input, &output, LaunchOptions::default()).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"vorbis");

        let failing = dir.path().join("fail-ffmpeg");
        write_script(&failing, "echo 'x.ogg: Invalid data found' >&2\necho '' >&2\nexit 1");
        match convert_file(&failing, &input, &output, LaunchOptions::default()) {
            Err(ConversionError::Failed { stderr, .. }) => {
                assert_eq!(stderr, "x.ogg: Invalid data found");
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        let silent = dir.path().join("silent-ffmpeg");
        write_script(&silent, "exit 0");
        let missing = dir.path().join("never.wav");
        assert!(matches!(
            convert_file(&silent, &input, &missing, LaunchOptions::default()),
            Err(ConversionError::MissingOutput(_))
        ));
    }
}
