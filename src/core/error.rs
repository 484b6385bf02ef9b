//! Error types for a conversion run
//!
//! Precondition variants are raised before the destination is touched.
//! `Conversion` and `Move` carry how far the run got so the UI can report
//! partial progress.

use std::io;
use std::path::PathBuf;

use crate::conversion::ConversionError;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("No destination folder selected")]
    DestinationNotSet,

    #[error("Destination folder is not accessible: {}", .0.display())]
    DestinationUnavailable(PathBuf),

    #[error("Input and output extensions are both '{0}'")]
    SameExtensions(String),

    #[error("Selected folder is not accessible: {}", .0.display())]
    SourceUnavailable(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(
        "Conversion failed for {} after {converted} file(s), {skipped} skipped: {source}",
        .file.display()
    )]
    Conversion {
        file: PathBuf,
        converted: usize,
        skipped: usize,
        #[source]
        source: ConversionError,
    },

    #[error(
        "Failed to move {} to {} after {converted} file(s), {skipped} skipped: {source}",
        .file.display(),
        .destination.display()
    )]
    Move {
        file: PathBuf,
        destination: PathBuf,
        converted: usize,
        skipped: usize,
        #[source]
        source: io::Error,
    },
}

impl WorkflowError {
    /// True for errors raised before any file was deleted or written
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::DestinationNotSet | Self::DestinationUnavailable(_) | Self::SameExtensions(_)
        )
    }

    /// Dialog title for this error
    pub fn title(&self) -> &'static str {
        match self {
            Self::DestinationNotSet | Self::DestinationUnavailable(_) | Self::SameExtensions(_) => {
                "Cannot Start Conversion"
            }
            Self::SourceUnavailable(_) | Self::Enumerate { .. } => "Cannot Read Folder",
            Self::Conversion { .. } => "Conversion Failed",
            Self::Move { .. } => "Move Failed",
        }
    }
}
