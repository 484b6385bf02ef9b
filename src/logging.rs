//! Logging configuration for Cabin Announcements
//!
//! Logs are written to both the terminal and a file at:
//! `~/Library/Logs/Cabin-Announcements/cabin-announcements.log` on macOS,
//! or `<local data dir>/Cabin-Announcements/logs/` elsewhere.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "cabin-announcements.log";
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Get the log directory path
pub fn get_log_directory() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Logs").join("Cabin-Announcements"))
    } else {
        dirs::data_local_dir().map(|d| d.join("Cabin-Announcements").join("logs"))
    }
}

/// Initialize the logging system
///
/// Terminal gets info and above, the log file gets debug and above.
/// Returns the path to the log file on success.
pub fn init_logging() -> Option<PathBuf> {
    let log_dir = match get_log_directory() {
        Some(d) => d,
        None => {
            eprintln!("Warning: Could not determine log directory");
            init_terminal_only();
            return None;
        }
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        init_terminal_only();
        return None;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    if let Ok(metadata) = fs::metadata(&log_path)
        && metadata.len() > MAX_LOG_SIZE
    {
        let backup_path = log_dir.join(format!("{}.old", LOG_FILE_NAME));
        let _ = fs::rename(&log_path, &backup_path);
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {}", e);
            init_terminal_only();
            return None;
        }
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(LevelFilter::Info, config.clone(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Debug, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    log::info!("=== Cabin Announcements session started ===");
    log::info!("Log file: {}", log_path.display());

    Some(log_path)
}

/// Initialize terminal-only logging (fallback if file logging fails)
fn init_terminal_only() {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let term_logger = TermLogger::new(LevelFilter::Info, config, TerminalMode::Mixed, ColorChoice::Auto);
    let _ = CombinedLogger::init(vec![term_logger]);
}

/// Open the log directory in the platform file manager
pub fn open_log_directory() -> Result<(), String> {
    let log_dir = get_log_directory().ok_or_else(|| "Could not determine log directory".to_string())?;
    if !log_dir.exists() {
        return Err("Log directory does not exist".to_string());
    }

    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    };

    std::process::Command::new(opener)
        .arg(&log_dir)
        .spawn()
        .map_err(|e| format!("Failed to open log directory: {}", e))?;
    Ok(())
}
