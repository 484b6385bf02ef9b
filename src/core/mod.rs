//! Core application logic and state
//!
//! This module contains:
//! - Workflow settings (extensions, tool path, policies)
//! - Subfolder listing of the source root
//! - The folder-to-conversion workflow controller
//! - Typed workflow errors

mod error;
mod listing;
mod settings;
mod workflow;

pub use listing::{EntryKind, Listing};
pub use settings::WorkflowSettings;
pub use workflow::{RunStage, WorkflowController};
