//! Tests for SubfolderBrowser component

use super::*;
use crate::core::{EntryKind, Listing};
use crate::test_fixtures::make_dirs;
use tempfile::TempDir;

fn browser() -> SubfolderBrowser {
    SubfolderBrowser::new_for_test(&WorkflowSettings {
        ffmpeg_path: Some(PathBuf::from("/nonexistent/ffmpeg")),
        ..WorkflowSettings::default()
    })
}

#[test]
fn test_new_browser_has_no_root() {
    let browser = browser();
    assert_eq!(browser.controller.listing(), &Listing::NoRoot);
    assert_eq!(browser.source_label, "No folder selected.");
    assert_eq!(browser.destination_label, "No folder selected.");
}

#[test]
fn test_missing_tool_is_reported_in_status_bar() {
    let browser = browser();
    assert!(browser.converter.ffmpeg_path().is_none());
    assert!(browser.tool_label().contains("/nonexistent/ffmpeg"));
}

#[test]
fn test_choosing_source_lists_subfolders() {
    let dir = TempDir::new().unwrap();
    make_dirs(dir.path(), &["Boarding", "arrival"]);
    let mut browser = browser();

    browser.apply_folder_choice(RootKind::Source, Some(dir.path().to_path_buf()));

    assert!(browser.source_label.starts_with("Root: "));
    assert_eq!(browser.selectable_name(0).as_deref(), Some("arrival"));
    assert_eq!(browser.selectable_name(1).as_deref(), Some("Boarding"));
    assert_eq!(browser.selectable_name(2), None);
}

#[test]
fn test_cancelled_choice_keeps_previous_root() {
    let dir = TempDir::new().unwrap();
    let mut browser = browser();
    browser.apply_folder_choice(RootKind::Destination, Some(dir.path().to_path_buf()));

    browser.apply_folder_choice(RootKind::Destination, None);

    assert_eq!(browser.destination_label, "Folder selection cancelled.");
    assert_eq!(browser.controller.destination_root(), Some(dir.path()));
}

#[test]
fn test_placeholder_row_is_not_selectable() {
    let dir = TempDir::new().unwrap();
    let mut browser = browser();

    browser.apply_folder_choice(RootKind::Source, Some(dir.path().to_path_buf()));

    assert_eq!(browser.controller.entries()[0].kind, EntryKind::Empty);
    assert_eq!(browser.selectable_name(0), None);
}

#[test]
fn test_refresh_picks_up_new_subfolders() {
    let dir = TempDir::new().unwrap();
    let mut browser = browser();
    browser.apply_folder_choice(RootKind::Source, Some(dir.path().to_path_buf()));
    make_dirs(dir.path(), &["Landing"]);

    browser.refresh();

    assert_eq!(browser.selectable_name(0).as_deref(), Some("Landing"));
}

#[test]
fn test_double_click_selects_folder_row() {
    let dir = TempDir::new().unwrap();
    make_dirs(dir.path(), &["Arrival", "Boarding"]);
    let mut browser = browser();
    browser.apply_folder_choice(RootKind::Source, Some(dir.path().to_path_buf()));

    assert_eq!(browser.register_click(1, 1), None);
    assert_eq!(browser.highlighted, Some(1));
    assert_eq!(browser.register_click(1, 2).as_deref(), Some("Boarding"));
}

#[test]
fn test_double_click_on_placeholder_does_nothing() {
    let dir = TempDir::new().unwrap();
    let mut browser = browser();
    browser.apply_folder_choice(RootKind::Source, Some(dir.path().to_path_buf()));

    assert_eq!(browser.register_click(0, 2), None);
}
