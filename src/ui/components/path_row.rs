//! PathRow component - a "Select ... Folder" button with the chosen path beside it

use gpui::{div, prelude::*, Context, IntoElement, SharedString};

use crate::ui::Theme;

pub struct PathRowProps {
    pub id: &'static str,
    pub button_label: &'static str,
    pub path_label: String,
}

pub fn render_path_row<V: 'static, F: Fn(&mut V, &mut Context<V>) + 'static>(
    props: PathRowProps,
    theme: &Theme,
    cx: &mut Context<V>,
    on_click: F,
) -> impl IntoElement + use<V, F> {
    let accent_hover = theme.accent_hover;

    div()
        .w_full()
        .flex()
        .items_center()
        .gap_3()
        .child(
            div()
                .id(SharedString::from(props.id))
                .flex_none()
                .w(gpui::px(230.0))
                .px_3()
                .py_1()
                .bg(theme.accent)
                .text_color(gpui::white())
                .text_sm()
                .rounded_md()
                .cursor_pointer()
                .hover(|s| s.bg(accent_hover))
                .on_click(cx.listener(move |view, _event, _window, cx| {
                    on_click(view, cx);
                }))
                .child(props.button_label),
        )
        .child(
            div()
                .flex_1()
                .overflow_hidden()
                .text_sm()
                .text_color(theme.text)
                .child(props.path_label),
        )
}
