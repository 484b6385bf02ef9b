//! Reusable UI components

mod header;
mod path_row;
mod status_bar;
mod subfolder_browser;

pub use subfolder_browser::SubfolderBrowser;
