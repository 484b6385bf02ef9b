//! Workflow settings
//!
//! Persisted to `<data dir>/Cabin Announcements/settings.json`. The source and
//! destination roots are deliberately not part of this file; they are chosen
//! fresh every session.

use gpui::Global;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when one file fails to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure; later files are skipped
    #[default]
    Abort,
    /// Record the failure and carry on with the next file
    SkipFile,
}

/// When existing output files in the destination are removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceMode {
    /// Purge the destination, then convert and move file by file
    #[default]
    PurgeFirst,
    /// Convert everything first; purge and move only if all conversions succeeded
    ///
    /// A conversion failure stops the run even under `FailurePolicy::SkipFile`,
    /// which then only covers failed moves.
    StageThenSwap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    /// Extension of files picked up from the selected subfolder
    #[serde(default = "default_input_extension")]
    pub input_extension: String,
    /// Extension produced by the converter and purged from the destination
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
    /// Explicit ffmpeg binary; discovered automatically when absent
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default)]
    pub replace_mode: ReplaceMode,
    #[serde(default = "default_true")]
    pub hide_console_window: bool,
}

fn default_input_extension() -> String {
    "ogg".to_string()
}

fn default_output_extension() -> String {
    "wav".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            input_extension: default_input_extension(),
            output_extension: default_output_extension(),
            ffmpeg_path: None,
            failure_policy: FailurePolicy::default(),
            replace_mode: ReplaceMode::default(),
            hide_console_window: true,
        }
    }
}

impl Global for WorkflowSettings {}

impl WorkflowSettings {
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Get the app data directory (e.g. ~/Library/Application Support/Cabin Announcements/)
    fn get_app_data_dir() -> Result<PathBuf, String> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| "Could not determine data directory".to_string())?;
        Ok(data_dir.join("Cabin Announcements"))
    }

    pub fn settings_path() -> Result<PathBuf, String> {
        Ok(Self::get_app_data_dir()?.join(Self::SETTINGS_FILE))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        match Self::settings_path().and_then(|path| Self::load_from(&path)) {
            Ok(settings) => {
                log::debug!("Loaded workflow settings from disk");
                settings
            }
            Err(e) => {
                log::debug!("Using default workflow settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err("Settings file not found".to_string());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings: {}", e))?;

        let mut settings: Self = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse settings: {}", e))?;
        settings.normalize();
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        log::debug!("Saved workflow settings to {:?}", path);
        Ok(())
    }

    /// Accept ".ogg" as well as "ogg" in the settings file
    fn normalize(&mut self) {
        self.input_extension = self.input_extension.trim_start_matches('.').to_string();
        self.output_extension = self.output_extension.trim_start_matches('.').to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = WorkflowSettings::default();
        assert_eq!(settings.input_extension, "ogg");
        assert_eq!(settings.output_extension, "wav");
        assert_eq!(settings.failure_policy, FailurePolicy::Abort);
        assert_eq!(settings.replace_mode, ReplaceMode::PurgeFirst);
        assert!(settings.hide_console_window);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "input_extension": ".mp3", "failure_policy": "skip_file" }"#)
            .unwrap();

        let settings = WorkflowSettings::load_from(&path).unwrap();

        assert_eq!(settings.input_extension, "mp3");
        assert_eq!(settings.output_extension, "wav");
        assert_eq!(settings.failure_policy, FailurePolicy::SkipFile);
        assert!(settings.hide_console_window);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = WorkflowSettings {
            replace_mode: ReplaceMode::StageThenSwap,
            ffmpeg_path: Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")),
            ..WorkflowSettings::default()
        };

        settings.save_to(&path).unwrap();

        assert_eq!(WorkflowSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(WorkflowSettings::load_from(&path).is_err());
    }
}
