//! Subfolder listing of the source root
//!
//! The listing is a structured value. Display labels are derived from it and
//! never parsed back.

use std::fs;
use std::path::Path;

use crate::conversion::is_hidden;

/// Kind of a row shown in the subfolder list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real subfolder that can be selected
    Folder,
    /// Placeholder when the root has no subfolders
    Empty,
    /// Placeholder carrying a listing error
    Error,
}

/// One row of the subfolder list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubfolderEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl SubfolderEntry {
    pub fn label(&self) -> String {
        match self.kind {
            EntryKind::Folder => format!("📁 {}", self.name),
            EntryKind::Empty | EntryKind::Error => self.name.clone(),
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// Result of listing the source root
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Listing {
    /// No source root selected yet
    #[default]
    NoRoot,
    /// Subfolder names, sorted case-insensitively (possibly empty)
    Folders(Vec<String>),
    /// The root could not be read
    Error(String),
}

impl Listing {
    /// Rows for display, including the empty/error placeholders
    pub fn entries(&self) -> Vec<SubfolderEntry> {
        match self {
            Listing::NoRoot => Vec::new(),
            Listing::Folders(names) if names.is_empty() => vec![SubfolderEntry {
                name: "No subfolders found in this directory.".to_string(),
                kind: EntryKind::Empty,
            }],
            Listing::Folders(names) => names
                .iter()
                .map(|name| SubfolderEntry {
                    name: name.clone(),
                    kind: EntryKind::Folder,
                })
                .collect(),
            Listing::Error(message) => vec![SubfolderEntry {
                name: format!("Error reading folder: {}", message),
                kind: EntryKind::Error,
            }],
        }
    }

    /// True if `name` is a real subfolder of this listing
    pub fn contains_folder(&self, name: &str) -> bool {
        match self {
            Listing::Folders(names) => names.iter().any(|n| n == name),
            _ => false,
        }
    }

    pub fn folder_count(&self) -> usize {
        match self {
            Listing::Folders(names) => names.len(),
            _ => 0,
        }
    }

    /// Status line text for this listing
    pub fn status_message(&self) -> String {
        match self {
            Listing::NoRoot => "Select a root folder to begin browsing.".to_string(),
            Listing::Folders(_) => "Double-click a subfolder below to select it.".to_string(),
            Listing::Error(message) => format!("Error accessing folder: {}", message),
        }
    }
}

/// List the immediate subdirectories of `root`
///
/// Symlinks are followed: a link to a directory is listed, a dangling link
/// is not. Hidden entries and names that are not valid UTF-8 are skipped.
pub fn list_subfolders(root: Option<&Path>) -> Listing {
    let Some(root) = root else {
        return Listing::NoRoot;
    };

    match read_subfolder_names(root) {
        Ok(names) => Listing::Folders(names),
        Err(e) => {
            log::warn!("Failed to list {}: {}", root.display(), e);
            Listing::Error(e.to_string())
        }
    }
}

fn read_subfolder_names(root: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if !path.is_dir() || is_hidden(&path) {
            continue;
        }
        match path.file_name().map(|name| name.to_str()) {
            Some(Some(name)) => names.push(name.to_string()),
            // Not selectable by name, so not listed
            Some(None) => log::warn!("Skipping non-UTF-8 folder name {:?}", path),
            None => {}
        }
    }

    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    Ok(names)
}
