//! Workspace - Main Shell
//!
//! Header, sidebar and the active page once signed in; the login page
//! otherwise. Pages are built on first visit and dropped when the locale or
//! the credential changes.

use ahash::AHashMap;
use gpui::{
    AnyView, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div, prelude::*,
};

use crate::api::ApiClient;
use crate::app::entities::AppEntities;
use crate::app::navigation::ActivePage;
use crate::components::composite::data_table::TableView;
use crate::components::layout::header::Header;
use crate::components::layout::sidebar::Sidebar;
use crate::features::{catalog, rules, scenarios};
use crate::i18n::Locale;
use crate::table::{DataTable, TableRow};
use crate::theme::colors::Palette;
use crate::views::business::BusinessPage;
use crate::views::login::{LoginPage, load_current_user};

/// Main workspace containing the application layout
pub struct Workspace {
    entities: AppEntities,
    header: Entity<Header>,
    sidebar: Entity<Sidebar>,
    login: Entity<LoginPage>,
    pages: AHashMap<ActivePage, AnyView>,
}

impl Workspace {
    pub fn new(entities: AppEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let header = cx.new(|cx| Header::new(entities.clone(), cx));
        let sidebar = cx.new(|cx| Sidebar::new(entities.clone(), cx));
        let login = cx.new(|cx| LoginPage::new(entities.clone(), window, cx));

        cx.observe(&entities.nav, |_this, _, cx| cx.notify()).detach();
        cx.observe(&entities.i18n, |this, _, cx| {
            this.pages.clear();
            cx.notify();
        })
        .detach();
        cx.observe(&entities.session, |this, session, cx| {
            if !session.read(cx).is_authenticated() {
                this.pages.clear();
            }
            cx.notify();
        })
        .detach();

        if entities.session.read(cx).is_authenticated() {
            load_current_user(&entities.session, cx);
        }

        Self {
            entities,
            header,
            sidebar,
            login,
            pages: AHashMap::new(),
        }
    }

    fn build_page(
        &self,
        page: ActivePage,
        client: ApiClient,
        locale: Locale,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> AnyView {
        let size = self.entities.page_size;
        let c = &client;
        match page {
            ActivePage::Business => cx
                .new(|cx| BusinessPage::new(client.clone(), locale, size, None, window, cx))
                .into(),
            ActivePage::Rules => table_page(rules::table(c, locale, size), locale, window, cx),
            ActivePage::Scenarios => {
                table_page(scenarios::table(c, locale, size), locale, window, cx)
            }
            ActivePage::Dimensions => {
                table_page(catalog::dimensions(c, locale, size), locale, window, cx)
            }
            ActivePage::Processes => {
                table_page(catalog::processes(c, locale, size), locale, window, cx)
            }
            ActivePage::Requirements => {
                table_page(catalog::requirements(c, locale, size), locale, window, cx)
            }
            ActivePage::Scripts => {
                table_page(catalog::scripts(c, locale, size), locale, window, cx)
            }
        }
    }

    /// Get or create the view for `page`
    fn page_view(
        &mut self,
        page: ActivePage,
        client: ApiClient,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> AnyView {
        if let Some(view) = self.pages.get(&page) {
            return view.clone();
        }
        let locale = self.entities.locale(cx);
        let view = self.build_page(page, client, locale, window, cx);
        self.pages.insert(page, view.clone());
        view
    }
}

fn table_page<R: TableRow>(
    table: DataTable<R>,
    locale: Locale,
    window: &mut Window,
    cx: &mut Context<Workspace>,
) -> AnyView {
    cx.new(|cx| TableView::new(table, locale, window, cx)).into()
}

impl Render for Workspace {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let client = self.entities.session.read(cx).client().cloned();
        let root = div()
            .size_full()
            .flex()
            .flex_col()
            .bg(Palette::background())
            .child(self.header.clone());

        let Some(client) = client else {
            return root.child(div().flex_1().child(self.login.clone()));
        };

        let active_page = self.entities.nav.read(cx).active_page;
        let content = self.page_view(active_page, client, window, cx);

        root.child(
            div()
                .flex_1()
                .flex()
                .flex_row()
                .overflow_hidden()
                .child(self.sidebar.clone())
                .child(
                    div()
                        .flex_1()
                        .flex()
                        .flex_col()
                        .overflow_hidden()
                        .bg(Palette::content_bg())
                        .child(content),
                ),
        )
    }
}
