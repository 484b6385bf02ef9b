//! Folder-to-conversion workflow
//!
//! `WorkflowController` owns the two roots and the current listing. Selecting
//! a subfolder runs `run_conversion` synchronously: purge the destination,
//! convert each input file next to itself, then move the result into the
//! destination.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

use super::error::WorkflowError;
use super::listing::{list_subfolders, Listing, SubfolderEntry};
use super::settings::{FailurePolicy, ReplaceMode, WorkflowSettings};
use crate::conversion::{
    has_extension, intermediate_path, is_hidden, move_to_destination, output_file_name,
    purge_output_files, Converter, PurgeOutcome,
};

/// Stage of a single conversion run
///
/// `Idle -> Purging -> Converting(i) -> Moving(i) -> ... -> Done -> Reported`,
/// or `Failed` from any step. With `ReplaceMode::StageThenSwap` every
/// `Converting(i)` comes before `Purging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStage {
    #[default]
    Idle,
    Purging,
    Converting(usize),
    Moving(usize),
    Done,
    Reported,
    Failed,
}

/// A file that failed under `FailurePolicy::SkipFile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: String,
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Name of the processed subfolder
    pub subfolder: String,
    /// Name of the destination directory
    pub destination_name: String,
    /// Converted files, at their final location in the destination
    pub converted: Vec<PathBuf>,
    pub purge: PurgeOutcome,
    /// Files skipped after a failure (only with `FailurePolicy::SkipFile`)
    pub failures: Vec<FileFailure>,
    pub finished_at: DateTime<Local>,
}

impl RunReport {
    /// Text for the completion dialog
    pub fn completion_message(&self) -> String {
        let mut message = format!(
            "Finished converting {} file(s) from {} and transferred them to destination folder {}.",
            self.converted.len(),
            self.subfolder,
            self.destination_name
        );
        if !self.failures.is_empty() {
            message.push_str(&format!("\n{} file(s) failed:", self.failures.len()));
            for failure in &self.failures {
                message.push_str(&format!("\n  {}: {}", file_label(&failure.file), failure.error));
            }
        }
        if !self.purge.failed.is_empty() {
            message.push_str(&format!(
                "\n{} old file(s) could not be removed from the destination.",
                self.purge.failed.len()
            ));
        }
        message
    }

    pub fn status_message(&self) -> String {
        format!(
            "Converted {} file(s) from {} into {} at {}",
            self.converted.len(),
            self.subfolder,
            self.destination_name,
            self.finished_at.format("%H:%M:%S")
        )
    }
}

/// Holds the user's folder choices and drives conversion runs
#[derive(Debug, Default)]
pub struct WorkflowController {
    source_root: Option<PathBuf>,
    destination_root: Option<PathBuf>,
    listing: Listing,
    stage: RunStage,
    status: String,
}

impl WorkflowController {
    pub fn new() -> Self {
        Self {
            status: Listing::NoRoot.status_message(),
            ..Self::default()
        }
    }

    pub fn source_root(&self) -> Option<&Path> {
        self.source_root.as_deref()
    }

    pub fn destination_root(&self) -> Option<&Path> {
        self.destination_root.as_deref()
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn entries(&self) -> Vec<SubfolderEntry> {
        self.listing.entries()
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    /// Current status line text
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replace the source root and re-read its subfolders
    pub fn set_source_root(&mut self, path: PathBuf) {
        log::info!("Source root: {}", path.display());
        self.source_root = Some(path);
        self.refresh_listing();
    }

    /// Replace the destination root; touches no files
    pub fn set_destination_root(&mut self, path: PathBuf) {
        log::info!("Destination root: {}", path.display());
        self.destination_root = Some(path);
    }

    /// Re-read the subfolders of the current source root
    pub fn refresh_listing(&mut self) {
        self.listing = list_subfolders(self.source_root.as_deref());
        self.status = self.listing.status_message();
        log::debug!("Listing refreshed: {} subfolder(s)", self.listing.folder_count());
    }

    /// Run the conversion for subfolder `name`
    ///
    /// Returns `None` without doing anything when `name` is not a folder of
    /// the current listing (placeholder rows, stale names).
    pub fn select_subfolder(
        &mut self,
        name: &str,
        settings: &WorkflowSettings,
        converter: &dyn Converter,
    ) -> Option<Result<RunReport, WorkflowError>> {
        if !self.listing.contains_folder(name) {
            log::debug!("Ignoring selection of non-folder entry {:?}", name);
            return None;
        }
        let source_root = self.source_root.clone()?;
        let selected = source_root.join(name);
        self.status = format!("SELECTED: {}", selected.display());

        let destination = self.destination_root.clone();
        let stage = &mut self.stage;
        let result = run_conversion(
            &selected,
            destination.as_deref(),
            settings,
            converter,
            &mut |next: RunStage| *stage = next,
        );

        match &result {
            Ok(report) => {
                self.stage = RunStage::Reported;
                self.status = report.status_message();
            }
            Err(e) => {
                self.stage = RunStage::Failed;
                self.status = format!("Error: {}", e);
            }
        }
        Some(result)
    }
}

/// Convert every input file of `selected` into `destination`
///
/// Precondition failures are returned before anything is deleted. See
/// `ReplaceMode` for the order of purge and conversion and `FailurePolicy`
/// for what a failing file does to the rest of the run.
pub fn run_conversion(
    selected: &Path,
    destination: Option<&Path>,
    settings: &WorkflowSettings,
    converter: &dyn Converter,
    on_stage: &mut dyn FnMut(RunStage),
) -> Result<RunReport, WorkflowError> {
    let destination = destination.ok_or(WorkflowError::DestinationNotSet)?;
    if !destination.is_dir() {
        return Err(WorkflowError::DestinationUnavailable(destination.to_path_buf()));
    }
    if settings.input_extension.eq_ignore_ascii_case(&settings.output_extension) {
        return Err(WorkflowError::SameExtensions(settings.output_extension.clone()));
    }
    if !selected.is_dir() {
        return Err(WorkflowError::SourceUnavailable(selected.to_path_buf()));
    }

    let inputs = collect_inputs(selected, &settings.input_extension)?;
    let id = Uuid::new_v4();
    let mut run = Run {
        id,
        tag: id.simple().to_string()[..8].to_string(),
        destination,
        settings,
        converter,
        on_stage,
        total: inputs.len(),
        converted: Vec::new(),
        failures: Vec::new(),
    };

    log::info!(
        "[run {}] {} -> {}: {} .{} file(s)",
        run.id,
        selected.display(),
        destination.display(),
        inputs.len(),
        settings.input_extension
    );

    let purge = match settings.replace_mode {
        ReplaceMode::PurgeFirst => run.purge_then_convert(&inputs)?,
        ReplaceMode::StageThenSwap => run.stage_then_swap(&inputs)?,
    };

    (run.on_stage)(RunStage::Done);
    log::info!(
        "[run {}] Done: {} converted, {} failed, {} purged",
        run.id,
        run.converted.len(),
        run.failures.len(),
        purge.removed.len()
    );

    Ok(RunReport {
        run_id: run.id,
        subfolder: file_label(selected),
        destination_name: file_label(destination),
        converted: run.converted,
        purge,
        failures: run.failures,
        finished_at: Local::now(),
    })
}

/// Input files directly under `dir`, sorted by file name
///
/// Entries that cannot be resolved (dangling links) are skipped, as in the
/// subfolder listing. Only failing to read `dir` itself is an error.
fn collect_inputs(dir: &Path, input_ext: &str) -> Result<Vec<PathBuf>, WorkflowError> {
    let mut inputs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.path().is_some_and(|path| path != dir) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
            Err(source) => {
                return Err(WorkflowError::Enumerate {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && !is_hidden(path) && has_extension(path, input_ext) {
            inputs.push(path.to_path_buf());
        }
    }
    Ok(inputs)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn discard(path: &Path) {
    if path.exists()
        && let Err(e) = fs::remove_file(path)
    {
        log::warn!("Could not remove intermediate {}: {}", path.display(), e);
    }
}

/// Failure of one file, before the policy decides what it means for the run
enum StepError {
    Convert(crate::conversion::ConversionError),
    Move { destination: PathBuf, source: std::io::Error },
}

struct Run<'a> {
    id: Uuid,
    /// Short run id used in intermediate file names
    tag: String,
    destination: &'a Path,
    settings: &'a WorkflowSettings,
    converter: &'a dyn Converter,
    on_stage: &'a mut dyn FnMut(RunStage),
    total: usize,
    converted: Vec<PathBuf>,
    failures: Vec<FileFailure>,
}

impl Run<'_> {
    fn purge(&mut self) -> Result<PurgeOutcome, WorkflowError> {
        (self.on_stage)(RunStage::Purging);
        purge_output_files(self.destination, &self.settings.output_extension).map_err(|e| {
            log::error!("[run {}] Cannot read destination: {}", self.id, e);
            WorkflowError::DestinationUnavailable(self.destination.to_path_buf())
        })
    }

    fn purge_then_convert(&mut self, inputs: &[PathBuf]) -> Result<PurgeOutcome, WorkflowError> {
        let purge = self.purge()?;

        for (index, input) in inputs.iter().enumerate() {
            let staged = match self.convert(index, input) {
                Ok(staged) => staged,
                Err(e) => {
                    self.handle_failure(index, input, e)?;
                    continue;
                }
            };
            if let Err(e) = self.move_staged(index, input, &staged) {
                self.handle_failure(index, input, e)?;
            }
        }

        Ok(purge)
    }

    fn stage_then_swap(&mut self, inputs: &[PathBuf]) -> Result<PurgeOutcome, WorkflowError> {
        let mut staged_files: Vec<(usize, &PathBuf, PathBuf)> = Vec::new();

        // Any conversion failure stops here, whatever the failure policy,
        // so the destination is only touched once every file converted.
        for (index, input) in inputs.iter().enumerate() {
            match self.convert(index, input) {
                Ok(staged) => staged_files.push((index, input, staged)),
                Err(e) => {
                    for (_, _, staged) in &staged_files {
                        discard(staged);
                    }
                    return Err(self.abort(index, input, e));
                }
            }
        }

        let purge = match self.purge() {
            Ok(purge) => purge,
            Err(e) => {
                for (_, _, staged) in &staged_files {
                    discard(staged);
                }
                return Err(e);
            }
        };

        for (position, (index, input, staged)) in staged_files.iter().enumerate() {
            if let Err(e) = self.move_staged(*index, input, staged) {
                if let Err(fatal) = self.handle_failure(*index, input, e) {
                    for (_, _, rest) in &staged_files[position + 1..] {
                        discard(rest);
                    }
                    return Err(fatal);
                }
            }
        }

        Ok(purge)
    }

    /// Convert `input` next to itself, returning the intermediate path
    fn convert(&mut self, index: usize, input: &Path) -> Result<PathBuf, StepError> {
        (self.on_stage)(RunStage::Converting(index));
        let staged = intermediate_path(input, &self.settings.output_extension, &self.tag);
        log::debug!("[run {}] Converting {}/{}: {}", self.id, index + 1, self.total, input.display());

        match self.converter.convert(input, &staged) {
            Ok(()) => Ok(staged),
            Err(e) => {
                discard(&staged);
                Err(StepError::Convert(e))
            }
        }
    }

    fn move_staged(&mut self, index: usize, input: &Path, staged: &Path) -> Result<(), StepError> {
        (self.on_stage)(RunStage::Moving(index));
        let target = self
            .destination
            .join(output_file_name(input, &self.settings.output_extension));

        match move_to_destination(staged, &target) {
            Ok(()) => {
                log::debug!("[run {}] Moved to {}", self.id, target.display());
                self.converted.push(target);
                Ok(())
            }
            Err(source) => {
                discard(staged);
                Err(StepError::Move {
                    destination: target,
                    source,
                })
            }
        }
    }

    /// Apply the failure policy; `Err` means the run stops here
    fn handle_failure(&mut self, index: usize, input: &Path, error: StepError) -> Result<(), WorkflowError> {
        match self.settings.failure_policy {
            FailurePolicy::SkipFile => {
                let message = match &error {
                    StepError::Convert(e) => e.to_string(),
                    StepError::Move { source, .. } => format!("move failed: {}", source),
                };
                log::warn!("[run {}] Skipping {}: {}", self.id, input.display(), message);
                self.failures.push(FileFailure {
                    file: input.to_path_buf(),
                    error: message,
                });
                Ok(())
            }
            FailurePolicy::Abort => Err(self.abort(index, input, error)),
        }
    }

    /// Stop the run at file `index`
    fn abort(&mut self, index: usize, input: &Path, error: StepError) -> WorkflowError {
        (self.on_stage)(RunStage::Failed);
        let converted = self.converted.len();
        let skipped = self.total - index - 1;
        let error = match error {
            StepError::Convert(source) => WorkflowError::Conversion {
                file: input.to_path_buf(),
                converted,
                skipped,
                source,
            },
            StepError::Move { destination, source } => WorkflowError::Move {
                file: input.to_path_buf(),
                destination,
                converted,
                skipped,
                source,
            },
        };
        log::error!("[run {}] {}", self.id, error);
        error
    }
}
