//! SubfolderBrowser component - the main application view
//!
//! Contains:
//! - Header
//! - Source and destination folder pickers
//! - Status line
//! - Subfolder list (double-click a row to convert it)
//! - Status bar

mod render;
#[cfg(test)]
mod tests;

use gpui::{
    AsyncApp, Context, FocusHandle, PathPromptOptions, PromptLevel, ScrollHandle, WeakEntity,
    Window,
};
use std::path::PathBuf;

use crate::conversion::{verify_ffmpeg, FfmpegConverter, LaunchOptions};
use crate::core::{WorkflowController, WorkflowSettings};

/// Which root a folder picker fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootKind {
    Source,
    Destination,
}

pub struct SubfolderBrowser {
    pub(crate) controller: WorkflowController,
    pub(crate) converter: FfmpegConverter,
    /// Why ffmpeg could not be located (shown in the status bar)
    pub(crate) tool_error: Option<String>,
    /// Label beside the source picker
    pub(crate) source_label: String,
    /// Label beside the destination picker
    pub(crate) destination_label: String,
    /// Row highlighted by the last single click
    pub(crate) highlighted: Option<usize>,
    pub(crate) scroll_handle: ScrollHandle,
    /// Whether we've subscribed to appearance changes
    pub(crate) appearance_subscription_set: bool,
    /// Focus handle for receiving actions (None in tests)
    pub(crate) focus_handle: Option<FocusHandle>,
    /// Whether we need to grab initial focus (for menu items to work)
    pub(crate) needs_initial_focus: bool,
}

impl SubfolderBrowser {
    pub fn new(settings: &WorkflowSettings, cx: &mut Context<Self>) -> Self {
        let mut browser = Self::with_settings(settings);
        browser.focus_handle = Some(cx.focus_handle());
        browser.needs_initial_focus = true;
        browser
    }

    fn with_settings(settings: &WorkflowSettings) -> Self {
        let (ffmpeg_path, tool_error) = match verify_ffmpeg(settings.ffmpeg_path.as_deref()) {
            Ok(path) => (Some(path), None),
            Err(e) => {
                log::warn!("{}", e);
                (None, Some(e))
            }
        };
        let launch = LaunchOptions {
            hide_console_window: settings.hide_console_window,
        };

        Self {
            controller: WorkflowController::new(),
            converter: FfmpegConverter::new(ffmpeg_path, launch),
            tool_error,
            source_label: "No folder selected.".to_string(),
            destination_label: "No folder selected.".to_string(),
            highlighted: None,
            scroll_handle: ScrollHandle::new(),
            appearance_subscription_set: false,
            focus_handle: None,
            needs_initial_focus: false,
        }
    }

    /// Create a SubfolderBrowser for testing (without GPUI context)
    #[cfg(test)]
    pub fn new_for_test(settings: &WorkflowSettings) -> Self {
        Self::with_settings(settings)
    }

    /// Show the OS folder picker for a root
    pub fn pick_folder(&mut self, kind: RootKind, cx: &mut Context<Self>) {
        let options = PathPromptOptions {
            files: false,
            directories: true,
            multiple: false,
            prompt: None,
        };
        let receiver = cx.prompt_for_paths(options);
        cx.spawn(move |this_handle: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                let picked = match receiver.await {
                    Ok(Ok(Some(paths))) => paths.into_iter().next(),
                    Ok(Err(e)) => {
                        log::warn!("Folder picker failed: {}", e);
                        None
                    }
                    _ => None,
                };
                let _ = this_handle.update(&mut async_cx, |this, cx| {
                    this.apply_folder_choice(kind, picked);
                    cx.notify();
                });
            }
        })
        .detach();
    }

    /// Apply the result of a folder picker; `None` means the user cancelled
    pub(crate) fn apply_folder_choice(&mut self, kind: RootKind, picked: Option<PathBuf>) {
        let Some(path) = picked else {
            let label = "Folder selection cancelled.".to_string();
            match kind {
                RootKind::Source => self.source_label = label,
                RootKind::Destination => self.destination_label = label,
            }
            return;
        };

        let label = format!("Root: {}", path.display());
        match kind {
            RootKind::Source => {
                self.source_label = label;
                self.highlighted = None;
                self.controller.set_source_root(path);
            }
            RootKind::Destination => {
                self.destination_label = label;
                self.controller.set_destination_root(path);
            }
        }
    }

    pub fn refresh(&mut self) {
        self.highlighted = None;
        self.controller.refresh_listing();
    }

    /// Handle a click on row `index`; a double-click activates the row
    pub(crate) fn on_entry_click(
        &mut self,
        index: usize,
        click_count: usize,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let Some(name) = self.register_click(index, click_count) {
            self.activate_entry(name, window, cx);
        }
        cx.notify();
    }

    /// Highlight row `index`; returns the subfolder to convert on a double-click
    pub(crate) fn register_click(&mut self, index: usize, click_count: usize) -> Option<String> {
        self.highlighted = Some(index);
        if click_count < 2 {
            return None;
        }
        self.selectable_name(index)
    }

    /// Convert the subfolder at `index` and report the outcome in a dialog
    ///
    /// Runs on the UI thread; the window does not repaint until ffmpeg has
    /// finished with every file.
    fn activate_entry(&mut self, name: String, window: &mut Window, cx: &mut Context<Self>) {
        let settings = cx.global::<WorkflowSettings>().clone();

        match self.controller.select_subfolder(&name, &settings, &self.converter) {
            None => {}
            Some(Ok(report)) => {
                let _future = window.prompt(
                    PromptLevel::Info,
                    "Process Complete",
                    Some(&report.completion_message()),
                    &["OK"],
                    cx,
                );
            }
            Some(Err(e)) => {
                if e.is_precondition() {
                    log::warn!("Conversion of {:?} not started: {}", name, e);
                } else {
                    log::error!("Conversion of {:?} failed: {}", name, e);
                }
                let _future = window.prompt(
                    PromptLevel::Warning,
                    e.title(),
                    Some(&e.to_string()),
                    &["OK"],
                    cx,
                );
            }
        }
    }

    /// Name of the row at `index` if it is a real subfolder
    pub(crate) fn selectable_name(&self, index: usize) -> Option<String> {
        self.controller
            .entries()
            .into_iter()
            .nth(index)
            .filter(|entry| entry.is_selectable())
            .map(|entry| entry.name)
    }

    pub(crate) fn tool_label(&self) -> String {
        match (&self.tool_error, self.converter.ffmpeg_path()) {
            (Some(e), _) => e.clone(),
            (None, Some(path)) => format!("ffmpeg: {}", path.display()),
            (None, None) => "ffmpeg not configured".to_string(),
        }
    }
}
