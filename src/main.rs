//! Cabin Announcements - GPUI Application
//!
//! Pick a source folder of announcement recordings and a destination folder,
//! then double-click a subfolder to convert its files with ffmpeg and replace
//! the previous output in the destination.

mod actions;
mod conversion;
mod core;
mod logging;
mod ui;

#[cfg(test)]
mod test_fixtures;

use actions::{OpenLogFolder, Quit, RefreshListing, SelectDestinationFolder, SelectSourceFolder};
use core::WorkflowSettings;
use gpui::{
    prelude::*, px, size, App, Application, Bounds, KeyBinding, Menu, MenuItem, WindowBounds,
    WindowOptions,
};
use ui::components::SubfolderBrowser;

fn build_menus() -> Vec<Menu> {
    vec![
        Menu {
            name: "Cabin Announcements".into(),
            items: vec![MenuItem::action("Quit", Quit)],
        },
        Menu {
            name: "File".into(),
            items: vec![
                MenuItem::action("Select Source Folder...", SelectSourceFolder),
                MenuItem::action("Select Destination Folder...", SelectDestinationFolder),
                MenuItem::separator(),
                MenuItem::action("Refresh", RefreshListing),
            ],
        },
        Menu {
            name: "View".into(),
            items: vec![MenuItem::action("Open Log Folder", OpenLogFolder)],
        },
    ]
}

fn main() {
    if let Some(log_path) = logging::init_logging() {
        log::info!("Logging to {}", log_path.display());
    }

    let settings = WorkflowSettings::load();
    // Write the defaults out on first run so they can be edited
    if let Ok(path) = WorkflowSettings::settings_path()
        && !path.exists()
        && let Err(e) = settings.save()
    {
        log::warn!("Could not write default settings: {}", e);
    }
    log::info!(
        "Converting .{} to .{} ({:?}, {:?})",
        settings.input_extension,
        settings.output_extension,
        settings.failure_policy,
        settings.replace_mode
    );

    Application::new().run(move |cx: &mut App| {
        cx.set_global(settings.clone());

        cx.on_action(|_: &Quit, cx| cx.quit());
        cx.on_action(|_: &OpenLogFolder, _cx| {
            if let Err(e) = logging::open_log_directory() {
                log::warn!("{}", e);
            }
        });

        // Folder and refresh actions are handled by the SubfolderBrowser view,
        // which holds focus so menu items reach it.
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-o", SelectSourceFolder, None),
            KeyBinding::new("cmd-d", SelectDestinationFolder, None),
            KeyBinding::new("cmd-r", RefreshListing, None),
        ]);

        cx.set_menus(build_menus());

        let bounds = Bounds::centered(None, size(px(800.), px(450.)), cx);
        let window = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                window_min_size: Some(size(px(600.), px(350.))),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("Cabin Announcements".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |_window, cx| cx.new(|cx| SubfolderBrowser::new(&settings, cx)),
        );

        if let Err(e) = window {
            log::error!("Failed to open main window: {}", e);
            cx.quit();
            return;
        }

        // Single-window utility: closing the window ends the app
        cx.on_window_closed(|cx| {
            cx.quit();
        })
        .detach();

        cx.activate(true);
    });
}
