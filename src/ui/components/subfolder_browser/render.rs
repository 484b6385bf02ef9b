//! Rendering implementation for SubfolderBrowser

use gpui::{div, prelude::*, ClickEvent, Context, IntoElement, Render, SharedString, Window};

use super::{RootKind, SubfolderBrowser};
use crate::actions::{RefreshListing, SelectDestinationFolder, SelectSourceFolder};
use crate::core::{Listing, RunStage};
use crate::ui::components::header::Header;
use crate::ui::components::path_row::{render_path_row, PathRowProps};
use crate::ui::components::status_bar::{render_status_bar, StatusBarProps};
use crate::ui::Theme;

impl SubfolderBrowser {
    /// Placeholder shown before a source root is chosen
    fn render_no_root(&self, theme: &Theme) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap_2()
            .text_color(theme.text_muted)
            .child(div().text_2xl().child("📂"))
            .child(div().text_lg().child("Select a source folder"))
            .child(div().text_sm().child("its subfolders will be listed here"))
    }

    fn render_entries(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let mut list = div().w_full().flex().flex_col().gap_1();

        for (index, entry) in self.controller.entries().into_iter().enumerate() {
            let selectable = entry.is_selectable();
            let highlighted = self.highlighted == Some(index);
            let hover_bg = theme.bg_card_hover;

            let row = div()
                .id(SharedString::from(format!("subfolder-{}", index)))
                .w_full()
                .px_3()
                .py_1()
                .rounded_md()
                .text_color(theme.entry_color(entry.kind))
                .when(highlighted && selectable, |el| el.bg(hover_bg))
                .when(selectable, |el| {
                    el.cursor_pointer().hover(|s| s.bg(hover_bg))
                })
                .on_click(cx.listener(move |this, event: &ClickEvent, window, cx| {
                    this.on_entry_click(index, event.click_count(), window, cx);
                }))
                .child(entry.label());

            list = list.child(row);
        }

        list
    }
}

impl Render for SubfolderBrowser {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if !self.appearance_subscription_set {
            self.appearance_subscription_set = true;
            cx.observe_window_appearance(window, |_this, _window, cx| {
                cx.notify();
            })
            .detach();
        }

        // Grab initial focus so menu items work immediately
        if self.needs_initial_focus {
            self.needs_initial_focus = false;
            if let Some(ref focus_handle) = self.focus_handle {
                focus_handle.focus(window);
            }
        }

        let theme = Theme::from_appearance(window.appearance());
        let status_color = match self.controller.stage() {
            RunStage::Failed => theme.danger,
            _ => theme.success,
        };

        let list_content = if matches!(self.controller.listing(), Listing::NoRoot) {
            self.render_no_root(&theme).into_any_element()
        } else {
            self.render_entries(&theme, cx).into_any_element()
        };

        let source_row = render_path_row(
            PathRowProps {
                id: "select-source",
                button_label: "Select Source Folder",
                path_label: self.source_label.clone(),
            },
            &theme,
            cx,
            |this: &mut Self, cx| this.pick_folder(RootKind::Source, cx),
        );
        let destination_row = render_path_row(
            PathRowProps {
                id: "select-destination",
                button_label: "Select Destination Folder",
                path_label: self.destination_label.clone(),
            },
            &theme,
            cx,
            |this: &mut Self, cx| this.pick_folder(RootKind::Destination, cx),
        );

        let status_bar = render_status_bar(
            StatusBarProps {
                folder_count: self.controller.listing().folder_count(),
                tool_label: self.tool_label(),
                button_label: "Refresh",
                button_enabled: self.controller.source_root().is_some(),
            },
            &theme,
            cx,
            |this: &mut Self, cx| {
                this.refresh();
                cx.notify();
            },
        );

        let on_select_source = cx.listener(|this, _: &SelectSourceFolder, _window, cx| {
            this.pick_folder(RootKind::Source, cx);
        });
        let on_select_destination = cx.listener(|this, _: &SelectDestinationFolder, _window, cx| {
            this.pick_folder(RootKind::Destination, cx);
        });
        let on_refresh = cx.listener(|this, _: &RefreshListing, _window, cx| {
            this.refresh();
            cx.notify();
        });

        let mut container = div()
            .size_full()
            .flex()
            .flex_col()
            .bg(theme.bg)
            .text_color(theme.text);

        // Track focus if we have a focus handle (not in tests)
        if let Some(ref focus_handle) = self.focus_handle {
            container = container.track_focus(focus_handle);
        }

        container
            .on_action(on_select_source)
            .on_action(on_select_destination)
            .on_action(on_refresh)
            .child(Header::render("Cabin Announcements", &theme))
            .child(
                div()
                    .px_4()
                    .pt_3()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .child(source_row)
                    .child(destination_row),
            )
            .child(
                div()
                    .px_4()
                    .py_2()
                    .text_sm()
                    .text_color(status_color)
                    .child(self.controller.status().to_string()),
            )
            .child(
                div()
                    .px_4()
                    .text_xs()
                    .text_color(theme.text_muted)
                    .child("Subfolders of Selected Path"),
            )
            .child(
                div()
                    .id("subfolder-list-scroll")
                    .flex_1()
                    .overflow_scroll()
                    .track_scroll(&self.scroll_handle)
                    .mx_4()
                    .my_2()
                    .p_2()
                    .bg(theme.bg_card)
                    .border_1()
                    .border_color(theme.border)
                    .rounded_md()
                    .child(list_content),
            )
            .child(status_bar)
    }
}
