//! Header component - Application title bar

use gpui::{div, prelude::*, IntoElement};

use crate::ui::Theme;

/// Render the application header
pub struct Header;

impl Header {
    /// Render the header with the given title
    pub fn render(title: &str, theme: &Theme) -> impl IntoElement {
        div()
            .w_full()
            .h_12()
            .px_4()
            .flex()
            .items_center()
            .bg(theme.bg_card)
            .border_b_1()
            .border_color(theme.border)
            .text_color(theme.text)
            .text_lg()
            .font_weight(gpui::FontWeight::BOLD)
            .child(title.to_string())
    }
}
