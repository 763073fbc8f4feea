//! Select Component
//!
//! View over a [`DynamicSelect`]: a trigger showing the current label and,
//! when open, the placeholder entry followed by every visible option.

use gpui::{
    ClickEvent, Context, InteractiveElement, IntoElement, ParentElement, Render, SharedString,
    StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};

use crate::i18n::{Locale, tr};
use crate::select::{DynamicSelect, SelectValue};
use crate::theme::colors::Palette;

/// A select/dropdown view
pub struct SelectView<T, V> {
    id: SharedString,
    select: DynamicSelect<T, V>,
    open: bool,
    loading_label: SharedString,
}

impl<T: Clone + 'static, V: SelectValue> SelectView<T, V> {
    /// Wrap `select` and fetch its options
    pub fn new(
        id: impl Into<SharedString>,
        select: DynamicSelect<T, V>,
        locale: Locale,
        cx: &mut Context<Self>,
    ) -> Self {
        cx.on_release(|this: &mut Self, _cx| this.select.destroy()).detach();

        let view = Self {
            id: id.into(),
            select,
            open: false,
            loading_label: tr(locale, "select.loading").into(),
        };
        let select = view.select.clone();
        cx.spawn(async move |this, cx| {
            if select.mount().await {
                let _ = this.update(cx, |_, cx| cx.notify());
            }
        })
        .detach();
        view
    }

    fn toggle(&mut self, cx: &mut Context<Self>) {
        if self.select.state().is_disabled() {
            return;
        }
        self.open = !self.open;
        cx.notify();
    }

    fn pick(&mut self, key: &str, cx: &mut Context<Self>) {
        if let Err(e) = self.select.choose_key(key) {
            tracing::warn!(error = %e, "Select key not recognised");
        }
        self.open = false;
        cx.notify();
    }

    fn render_option(
        &self,
        index: usize,
        key: String,
        label: String,
        selected: bool,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        div()
            .id(SharedString::from(format!("{}-opt-{}", self.id, index)))
            .px_3()
            .py_1()
            .text_sm()
            .cursor_pointer()
            .when(selected, |el| el.bg(Palette::accent_soft()))
            .hover(|s| s.bg(Palette::table_row_hover()))
            .on_click(cx.listener(move |this, _event: &ClickEvent, _window, cx| {
                this.pick(&key, cx);
            }))
            .child(label)
    }
}

impl<T: Clone + 'static, V: SelectValue> Render for SelectView<T, V> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.select.state();
        let disabled = state.is_disabled();
        let loading = state.is_loading();
        let label = state.options().label.clone();
        let placeholder = state.options().placeholder.clone();
        let error = state.visible_error().map(str::to_string);
        let has_value = !state.selection().is_empty();
        let current_key = state.selection().to_key();
        let display = if loading {
            self.loading_label.clone()
        } else {
            SharedString::from(state.display_label())
        };
        let options = if self.open { state.option_list() } else { Vec::new() };
        drop(state);

        let mut menu = Vec::with_capacity(options.len() + 1);
        if self.open {
            menu.push(
                self.render_option(0, String::new(), placeholder, !has_value, cx)
                    .into_any_element(),
            );
            for (i, opt) in options.into_iter().enumerate() {
                let selected = opt.key == current_key;
                menu.push(
                    self.render_option(i + 1, opt.key, opt.label, selected, cx)
                        .into_any_element(),
                );
            }
        }

        div()
            .flex()
            .flex_col()
            .gap_1()
            .min_w(px(220.0))
            .child(
                div()
                    .text_xs()
                    .text_color(Palette::text_secondary())
                    .child(label),
            )
            .child(
                div()
                    .id(self.id.clone())
                    .px_3()
                    .py_2()
                    .bg(Palette::input_bg())
                    .border_1()
                    .border_color(if self.open {
                        Palette::border_focus()
                    } else {
                        Palette::input_border()
                    })
                    .rounded_md()
                    .text_sm()
                    .text_color(if has_value {
                        Palette::text_primary()
                    } else {
                        Palette::input_placeholder()
                    })
                    .flex()
                    .items_center()
                    .justify_between()
                    .opacity(if disabled { 0.5 } else { 1.0 })
                    .when(!disabled, |el| {
                        el.cursor_pointer().on_click(cx.listener(
                            |this, _event: &ClickEvent, _window, cx| this.toggle(cx),
                        ))
                    })
                    .child(display)
                    .child(
                        div()
                            .text_color(Palette::text_muted())
                            .text_size(px(10.0))
                            .child(if self.open { "▲" } else { "▼" }),
                    ),
            )
            .when(self.open, |el| {
                el.child(
                    div()
                        .id(SharedString::from(format!("{}-menu", self.id)))
                        .max_h(px(240.0))
                        .overflow_y_scroll()
                        .bg(Palette::content_bg())
                        .border_1()
                        .border_color(Palette::border())
                        .rounded_md()
                        .shadow_md()
                        .children(menu),
                )
            })
            .when_some(error, |el, error| {
                el.child(div().text_xs().text_color(Palette::danger()).child(error))
            })
    }
}
