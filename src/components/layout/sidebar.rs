//! Sidebar Component
//!
//! Navigation sidebar with page links.

use gpui::{
    ClickEvent, Context, InteractiveElement, IntoElement, ParentElement, Render, SharedString,
    StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};

use crate::app::entities::AppEntities;
use crate::app::navigation::ActivePage;
use crate::constants::SIDEBAR_WIDTH;
use crate::i18n::{Locale, tr};
use crate::theme::colors::Palette;

/// Sidebar component
pub struct Sidebar {
    entities: AppEntities,
}

impl Sidebar {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&entities.i18n, |_this, _, cx| cx.notify()).detach();
        cx.observe(&entities.nav, |_this, _, cx| cx.notify()).detach();
        Self { entities }
    }

    fn render_nav_item(
        &self,
        page: ActivePage,
        locale: Locale,
        active_page: ActivePage,
    ) -> impl IntoElement {
        let is_active = page == active_page;
        let nav = self.entities.nav.clone();

        div()
            .id(SharedString::from(format!("nav-{page:?}")))
            .w_full()
            .px_4()
            .py_2()
            .border_l_2()
            .border_color(if is_active {
                Palette::accent()
            } else {
                gpui::rgba(0x00000000)
            })
            .when(is_active, |el| el.bg(Palette::accent_soft()))
            .text_color(if is_active {
                Palette::accent()
            } else {
                Palette::text_secondary()
            })
            .text_size(px(14.0))
            .cursor_pointer()
            .hover(|s| s.bg(Palette::table_row_hover()))
            .on_click(move |_event: &ClickEvent, _window, cx| {
                nav.update(cx, |nav, cx| {
                    if nav.set_active_page(page) {
                        cx.notify();
                    }
                });
            })
            .child(tr(locale, page.title_key()))
    }
}

impl Render for Sidebar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.locale(cx);
        let active_page = self.entities.nav.read(cx).active_page;

        div()
            .w(px(SIDEBAR_WIDTH))
            .h_full()
            .bg(Palette::sidebar_bg())
            .border_r_1()
            .border_color(Palette::border())
            .flex()
            .flex_col()
            .pt_4()
            .children(
                ActivePage::all()
                    .iter()
                    .map(|page| self.render_nav_item(*page, locale, active_page)),
            )
    }
}
