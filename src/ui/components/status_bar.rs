//! StatusBar component - Bottom status bar with subfolder count and refresh button

use gpui::{div, prelude::*, Context, IntoElement, SharedString};

use crate::ui::Theme;

/// Properties for the status bar
pub struct StatusBarProps {
    pub folder_count: usize,
    /// Where ffmpeg was found, or why it wasn't
    pub tool_label: String,
    pub button_label: &'static str,
    pub button_enabled: bool,
}

/// Render the status bar
///
/// Displays folder count and tool location on the left and an action button on the right.
pub fn render_status_bar<V: 'static, F: Fn(&mut V, &mut Context<V>) + 'static>(
    props: StatusBarProps,
    theme: &Theme,
    cx: &mut Context<V>,
    on_button_click: F,
) -> impl IntoElement + use<V, F> {
    let StatusBarProps {
        folder_count,
        tool_label,
        button_label,
        button_enabled,
    } = props;

    let folder_text = if folder_count == 1 {
        "1 subfolder".to_string()
    } else {
        format!("{} subfolders", folder_count)
    };

    let accent_hover = theme.accent_hover;

    div()
        .py_2()
        .px_4()
        .flex()
        .items_center()
        .justify_between()
        .border_t_1()
        .border_color(theme.border)
        .text_sm()
        .text_color(theme.text_muted)
        .child(
            div()
                .flex()
                .flex_col()
                .child(folder_text)
                .child(div().text_xs().child(tool_label)),
        )
        .child(
            div()
                .id(SharedString::from("status-bar-button"))
                .px_3()
                .py_1()
                .bg(if button_enabled { theme.accent } else { theme.text_muted })
                .text_color(gpui::white())
                .rounded_md()
                .when(button_enabled, |el| {
                    el.cursor_pointer().hover(|s| s.bg(accent_hover))
                })
                .on_click(cx.listener(move |view, _event, _window, cx| {
                    if button_enabled {
                        on_button_click(view, cx);
                    }
                }))
                .child(button_label),
        )
}
