//! Header Component
//!
//! Application title, signed-in user, language switcher and logout.

use gpui::{
    ClickEvent, Context, InteractiveElement, IntoElement, ParentElement, Render,
    StatefulInteractiveElement, Styled, Window, div, prelude::*, px,
};

use crate::app::entities::AppEntities;
use crate::i18n::tr;
use crate::theme::colors::Palette;

/// Header component
pub struct Header {
    entities: AppEntities,
}

impl Header {
    pub fn new(entities: AppEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&entities.i18n, |_this, _, cx| cx.notify()).detach();
        cx.observe(&entities.session, |_this, _, cx| cx.notify()).detach();
        Self { entities }
    }

    fn pill(id: &'static str) -> gpui::Stateful<gpui::Div> {
        div()
            .id(id)
            .px_3()
            .py_1()
            .rounded_md()
            .bg(gpui::rgba(0xffffff22))
            .text_color(Palette::text_light())
            .text_size(px(13.0))
            .cursor_pointer()
            .hover(|s| s.bg(gpui::rgba(0xffffff44)))
    }
}

impl Render for Header {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.entities.locale(cx);
        let session = self.entities.session.read(cx);
        let signed_in = session.is_authenticated();
        let user = session.user().map(|u| u.display_name());

        let i18n = self.entities.i18n.clone();
        let entities = self.entities.clone();

        div()
            .h(px(48.0))
            .w_full()
            .bg(Palette::header_bg())
            .flex()
            .items_center()
            .justify_between()
            .px_4()
            .child(
                div()
                    .text_color(Palette::text_light())
                    .text_size(px(18.0))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .child(tr(locale, "app.title")),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_4()
                    .when_some(user, |el, user| {
                        el.child(
                            div()
                                .text_color(Palette::text_light())
                                .text_size(px(13.0))
                                .child(user),
                        )
                    })
                    .child(
                        Self::pill("lang-switcher")
                            .on_click(move |_event: &ClickEvent, _window, cx| {
                                i18n.update(cx, |i18n, cx| {
                                    i18n.toggle_locale();
                                    cx.notify();
                                });
                            })
                            .child(locale.display_name()),
                    )
                    .when(signed_in, |el| {
                        el.child(
                            Self::pill("logout")
                                .on_click(move |_event: &ClickEvent, _window, cx| {
                                    entities.session.update(cx, |session, cx| {
                                        session.sign_out();
                                        cx.notify();
                                    });
                                    entities.nav.update(cx, |nav, cx| {
                                        nav.reset();
                                        cx.notify();
                                    });
                                })
                                .child(tr(locale, "nav.logout")),
                        )
                    }),
            )
    }
}
