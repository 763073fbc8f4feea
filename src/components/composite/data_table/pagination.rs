//! Pagination Component
//!
//! Footer row of the table view: match count on the left, previous/next
//! controls and "page X of Y" on the right.

use std::rc::Rc;

use gpui::{
    App, ClickEvent, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    StatefulInteractiveElement, Styled, Window, div, prelude::*,
};

use crate::i18n::{Locale, page_of, records_found, tr};
use crate::table::PageInfo;
use crate::theme::colors::Palette;

type PageHandler = Rc<dyn Fn(&PageStep, &mut Window, &mut App) + 'static>;

/// Direction of a page change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Prev,
    Next,
}

/// Pagination component
#[derive(IntoElement)]
pub struct Pagination {
    info: PageInfo,
    locale: Locale,
    on_step: Option<PageHandler>,
}

impl Pagination {
    pub fn new(info: PageInfo, locale: Locale) -> Self {
        Self {
            info,
            locale,
            on_step: None,
        }
    }

    pub fn on_step(mut self, handler: impl Fn(&PageStep, &mut Window, &mut App) + 'static) -> Self {
        self.on_step = Some(Rc::new(handler));
        self
    }

    fn step_button(&self, step: PageStep, enabled: bool) -> impl IntoElement {
        let (id, key) = match step {
            PageStep::Prev => ("prev-page", "table.prev"),
            PageStep::Next => ("next-page", "table.next"),
        };
        let handler = self.on_step.clone().filter(|_| enabled);

        div()
            .id(id)
            .px_3()
            .py_1()
            .rounded_sm()
            .text_sm()
            .border_1()
            .border_color(Palette::border())
            .text_color(if enabled {
                Palette::text_primary()
            } else {
                Palette::text_muted()
            })
            .when_some(handler, |el, handler| {
                el.cursor_pointer()
                    .hover(|s| s.bg(Palette::table_row_hover()))
                    .on_click(move |_event: &ClickEvent, window, cx| handler(&step, window, cx))
            })
            .child(tr(self.locale, key))
    }
}

impl RenderOnce for Pagination {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let found = records_found(self.locale, self.info.total_items);
        let position: SharedString =
            page_of(self.locale, self.info.current, self.info.total_pages.max(1)).into();

        div()
            .w_full()
            .px_4()
            .py_2()
            .flex()
            .items_center()
            .justify_between()
            .border_t_1()
            .border_color(Palette::border())
            .child(
                div()
                    .text_sm()
                    .text_color(Palette::text_secondary())
                    .child(found),
            )
            .when(self.info.is_paged(), |el| {
                el.child(
                    div()
                        .flex()
                        .items_center()
                        .gap_2()
                        .child(self.step_button(PageStep::Prev, self.info.can_prev()))
                        .child(
                            div()
                                .text_sm()
                                .text_color(Palette::text_primary())
                                .child(position),
                        )
                        .child(self.step_button(PageStep::Next, self.info.can_next())),
                )
            })
    }
}
