//! UI module - GPUI views and components
//!
//! This module contains all UI-related code:
//! - `components/` - The subfolder browser and the rows it is built from
//! - `theme` - OS-aware light and dark mode color schemes

pub mod components;
pub mod theme;

pub use theme::Theme;
