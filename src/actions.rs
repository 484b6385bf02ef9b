//! Application-wide actions
//!
//! Actions that can be triggered from menus or keyboard shortcuts.

use gpui::actions;

actions!(
    app,
    [
        Quit,
        SelectSourceFolder,
        SelectDestinationFolder,
        RefreshListing,
        OpenLogFolder,
    ]
);
