//! Modal Component
//!
//! Dialog over a dimmed backdrop, with an optional button row.

use gpui::{
    AnyElement, App, ClickEvent, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};

use crate::theme::colors::Palette;

/// Modal component
#[derive(IntoElement)]
pub struct Modal {
    title: SharedString,
    width: f32,
    children: Vec<AnyElement>,
    footer: Vec<AnyElement>,
    on_close: Option<Box<dyn Fn(&mut Window, &mut App) + 'static>>,
}

impl Modal {
    pub fn new(title: impl Into<SharedString>) -> Self {
        Self {
            title: title.into(),
            width: 480.0,
            children: Vec::new(),
            footer: Vec::new(),
            on_close: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.children.push(child.into_any_element());
        self
    }

    /// Add a button to the footer row, right-aligned in insertion order
    pub fn action(mut self, button: impl IntoElement) -> Self {
        self.footer.push(button.into_any_element());
        self
    }

    /// Show a close button in the title bar
    pub fn on_close(mut self, handler: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Modal {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let has_footer = !self.footer.is_empty();

        div()
            .absolute()
            .inset_0()
            .bg(Palette::overlay())
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .bg(Palette::content_bg())
                    .rounded_lg()
                    .shadow_lg()
                    .w(px(self.width))
                    .flex()
                    .flex_col()
                    // Header
                    .child(
                        div()
                            .px_6()
                            .py_4()
                            .border_b_1()
                            .border_color(Palette::border())
                            .flex()
                            .items_center()
                            .justify_between()
                            .child(
                                div()
                                    .text_size(px(16.0))
                                    .font_weight(gpui::FontWeight::SEMIBOLD)
                                    .text_color(Palette::text_primary())
                                    .child(self.title),
                            )
                            .when_some(self.on_close, |el, handler| {
                                el.child(
                                    div()
                                        .id("modal-close")
                                        .size(px(24.0))
                                        .rounded_sm()
                                        .flex()
                                        .items_center()
                                        .justify_center()
                                        .text_color(Palette::text_muted())
                                        .text_size(px(16.0))
                                        .cursor_pointer()
                                        .hover(|s| s.bg(Palette::table_row_hover()))
                                        .on_click(move |_event: &ClickEvent, window, cx| {
                                            handler(window, cx)
                                        })
                                        .child("×"),
                                )
                            }),
                    )
                    // Content
                    .child(
                        div()
                            .id("modal-body")
                            .max_h(px(560.0))
                            .overflow_y_scroll()
                            .px_6()
                            .py_4()
                            .flex()
                            .flex_col()
                            .gap_4()
                            .children(self.children),
                    )
                    .when(has_footer, |el| {
                        el.child(
                            div()
                                .px_6()
                                .py_3()
                                .border_t_1()
                                .border_color(Palette::border())
                                .flex()
                                .justify_end()
                                .gap_2()
                                .children(self.footer),
                        )
                    }),
            )
    }
}
