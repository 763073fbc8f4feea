//! TableView Component
//!
//! Renders a [`DataTable`] controller: toolbar, error banner, header row,
//! body, pagination and the delete confirmation dialog. Edit and create
//! requests are forwarded as [`TableEvent`]s so the owning page can open
//! its own form.

use gpui::{
    AnyElement, ClickEvent, Context, Div, Entity, EventEmitter, InteractiveElement, IntoElement,
    ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::*, px,
};
use gpui_component::input::{Input, InputEvent, InputState};
use tracing::{debug, warn};

use super::pagination::{PageStep, Pagination};
use crate::components::composite::modal::Modal;
use crate::components::primitives::button::{Button, ButtonSize};
use crate::i18n::{Locale, tr};
use crate::table::{Align, Cell, Column, ColumnWidth, DataTable, TableBody, TableRow};
use crate::theme::colors::Palette;
use crate::theme::typography::Typography;

/// Width of the trailing actions column
const ACTIONS_WIDTH: f32 = 160.0;
/// Smallest width a flex column shrinks to
const FLEX_MIN_WIDTH: f32 = 160.0;
/// Width of the search box in the toolbar
const SEARCH_WIDTH: f32 = 260.0;

/// Surface changes the owning page reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    EditRequested,
    CreateRequested,
}

/// View over one [`DataTable`]
pub struct TableView<R: TableRow> {
    table: DataTable<R>,
    locale: Locale,
    search: Entity<InputState>,
    /// Failure of the last delete, shown until the next action
    action_error: Option<String>,
}

impl<R: TableRow> EventEmitter<TableEvent> for TableView<R> {}

fn sized(cell: Div, width: ColumnWidth) -> Div {
    match width {
        ColumnWidth::Fixed(w) => cell.w(px(w)).flex_shrink_0(),
        ColumnWidth::Flex => cell.flex_1().min_w(px(FLEX_MIN_WIDTH)),
    }
}

impl<R: TableRow> TableView<R> {
    /// Wrap `table` and start the first load
    pub fn new(
        table: DataTable<R>,
        locale: Locale,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let placeholder = table.state().options().search_placeholder.clone();
        let search = cx.new(|cx| {
            InputState::new(window, cx)
                .clean_on_escape()
                .placeholder(placeholder)
        });
        cx.subscribe(&search, |this: &mut Self, state, event: &InputEvent, cx| {
            if matches!(event, InputEvent::Change) {
                let term = state.read(cx).value().to_string();
                this.table.update(|t| t.set_search_term(term));
                cx.notify();
            }
        })
        .detach();

        // Loads and deletes still in flight must not touch a dropped page
        cx.on_release(|this: &mut Self, _cx| {
            debug!(title = %this.table.state().options().title, "Table view released");
            this.table.destroy();
        })
        .detach();

        let view = Self {
            table,
            locale,
            search,
            action_error: None,
        };
        view.reload(cx);
        view
    }

    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    /// Fetch again; the newest request wins
    pub fn reload(&self, cx: &mut Context<Self>) {
        let table = self.table.clone();
        cx.notify();
        cx.spawn(async move |this, cx| {
            if table.load().await {
                let _ = this.update(cx, |_, cx| cx.notify());
            }
        })
        .detach();
    }

    fn request_edit(&mut self, row: R, cx: &mut Context<Self>) {
        match self.table.request_edit(row) {
            Ok(()) => cx.emit(TableEvent::EditRequested),
            Err(e) => warn!(error = %e, "Edit unavailable"),
        }
        cx.notify();
    }

    fn request_create(&mut self, cx: &mut Context<Self>) {
        match self.table.request_create() {
            Ok(()) => cx.emit(TableEvent::CreateRequested),
            Err(e) => warn!(error = %e, "Create unavailable"),
        }
        cx.notify();
    }

    fn request_delete(&mut self, row: R, cx: &mut Context<Self>) {
        self.action_error = None;
        if let Err(e) = self.table.request_delete(row) {
            warn!(error = %e, "Delete not staged");
        }
        cx.notify();
    }

    fn confirm_delete(&mut self, cx: &mut Context<Self>) {
        let table = self.table.clone();
        let fallback = tr(self.locale, "table.load_error");
        cx.spawn(async move |this, cx| {
            let result = table.confirm_delete().await;
            let _ = this.update(cx, |view, cx| {
                view.action_error = result.err().map(|e| e.user_message(&fallback));
                cx.notify();
            });
        })
        .detach();
        cx.notify();
    }

    fn step_page(&mut self, step: PageStep, cx: &mut Context<Self>) {
        self.table.update(|t| match step {
            PageStep::Prev => t.prev_page(),
            PageStep::Next => t.next_page(),
        });
        cx.notify();
    }

    fn render_toolbar(&self, cx: &Context<Self>) -> impl IntoElement {
        let state = self.table.state();
        let title = state.options().title.clone();
        let search_enabled = state.options().search_enabled;
        let loading = state.is_loading();
        drop(state);
        let source = self.table.source();

        div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .gap_4()
            .child(
                div()
                    .text_size(px(Typography::TEXT_XL))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(Palette::text_primary())
                    .child(title),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .when(search_enabled, |el| {
                        el.child(
                            div()
                                .w(px(SEARCH_WIDTH))
                                .child(Input::new(&self.search).cleanable(true)),
                        )
                    })
                    .when(source.can_create(), |el| {
                        el.child(
                            Button::primary("table-add", tr(self.locale, "table.add")).on_click(
                                cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                    this.request_create(cx)
                                }),
                            ),
                        )
                    })
                    .child(
                        Button::secondary("table-refresh", tr(self.locale, "table.refresh"))
                            .busy(loading, tr(self.locale, "table.loading"))
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.reload(cx)
                            })),
                    ),
            )
    }

    fn render_header(&self, columns: &[Column<R>], actions: bool) -> impl IntoElement {
        div()
            .h(px(Typography::HEADER_HEIGHT))
            .flex()
            .items_center()
            .bg(Palette::table_header_bg())
            .border_b_1()
            .border_color(Palette::border())
            .children(columns.iter().map(|col| {
                sized(div(), col.width)
                    .px_3()
                    .text_sm()
                    .font_weight(gpui::FontWeight::MEDIUM)
                    .text_color(Palette::text_primary())
                    .child(col.label.clone())
            }))
            .when(actions, |el| {
                el.child(
                    div()
                        .w(px(ACTIONS_WIDTH))
                        .flex_shrink_0()
                        .px_3()
                        .text_sm()
                        .font_weight(gpui::FontWeight::MEDIUM)
                        .child(tr(self.locale, "table.actions")),
                )
            })
    }

    fn render_cell(cell: Cell) -> AnyElement {
        match cell {
            Cell::Empty => div().into_any_element(),
            Cell::Text(text) => div().child(text).into_any_element(),
            Cell::Badge { text, tone } => {
                let (fg, bg) = Palette::tone(tone);
                div()
                    .px_2()
                    .rounded_md()
                    .text_xs()
                    .text_color(fg)
                    .bg(bg)
                    .child(text)
                    .into_any_element()
            }
            Cell::Flag(on) => div()
                .text_color(if on { Palette::success() } else { Palette::text_muted() })
                .child(if on { "✓" } else { "–" })
                .into_any_element(),
        }
    }

    fn render_row(
        &self,
        columns: &[Column<R>],
        row: &R,
        index: usize,
        cx: &Context<Self>,
    ) -> impl IntoElement {
        let source = self.table.source();
        let deleting = self.table.state().is_deleting(row);
        let (can_edit, can_delete) = (source.can_update(), source.can_delete());
        let actions = source.has_row_actions();

        div()
            .id(SharedString::from(format!("row-{index}")))
            .min_h(px(Typography::ROW_HEIGHT))
            .flex()
            .items_center()
            .bg(if index % 2 == 0 {
                Palette::content_bg()
            } else {
                Palette::table_row_alt()
            })
            .hover(|s| s.bg(Palette::table_row_hover()))
            .border_b_1()
            .border_color(Palette::border())
            .opacity(if deleting { 0.5 } else { 1.0 })
            .children(columns.iter().map(|col| {
                let cell = sized(div(), col.width)
                    .px_3()
                    .py_2()
                    .text_sm()
                    .text_color(Palette::text_primary())
                    .overflow_hidden()
                    .when(col.no_wrap, |el| el.whitespace_nowrap().text_ellipsis());
                let cell = match col.align {
                    Align::Left => cell,
                    Align::Center => cell.flex().justify_center(),
                    Align::Right => cell.flex().justify_end(),
                };
                cell.child(Self::render_cell(col.resolve(row)))
            }))
            .when(actions, |el| {
                let edit_row = row.clone();
                let delete_row = row.clone();
                el.child(
                    div()
                        .w(px(ACTIONS_WIDTH))
                        .flex_shrink_0()
                        .px_3()
                        .flex()
                        .gap_2()
                        .when(can_edit, |el| {
                            let id = SharedString::from(format!("edit-{index}"));
                            el.child(
                                Button::ghost(id, tr(self.locale, "table.edit"))
                                    .size(ButtonSize::Small)
                                    .on_click(cx.listener(
                                        move |this, _event: &ClickEvent, _window, cx| {
                                            this.request_edit(edit_row.clone(), cx)
                                        },
                                    )),
                            )
                        })
                        .when(can_delete, |el| {
                            let id = SharedString::from(format!("delete-{index}"));
                            el.child(
                                Button::ghost(id, tr(self.locale, "table.delete"))
                                    .size(ButtonSize::Small)
                                    .busy(deleting, "…")
                                    .on_click(cx.listener(
                                        move |this, _event: &ClickEvent, _window, cx| {
                                            this.request_delete(delete_row.clone(), cx)
                                        },
                                    )),
                            )
                        }),
                )
            })
    }

    fn render_message(text: String) -> impl IntoElement {
        div()
            .py_8()
            .flex()
            .justify_center()
            .text_color(Palette::text_muted())
            .child(text)
    }

    fn render_banner(&self, message: String) -> impl IntoElement {
        div()
            .w_full()
            .px_4()
            .py_2()
            .rounded_md()
            .bg(Palette::danger_soft())
            .border_1()
            .border_color(Palette::danger())
            .text_sm()
            .text_color(Palette::danger())
            .flex()
            .gap_2()
            .child(
                div()
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .child(tr(self.locale, "table.error_title")),
            )
            .child(message)
    }

    fn render_delete_dialog(&self, cx: &Context<Self>) -> impl IntoElement {
        Modal::new(tr(self.locale, "delete.title"))
            .on_close({
                let view = cx.entity().downgrade();
                move |_window, cx| {
                    let _ = view.update(cx, |this, cx| {
                        this.table.cancel_delete();
                        cx.notify();
                    });
                }
            })
            .child(
                div()
                    .text_sm()
                    .text_color(Palette::text_secondary())
                    .child(tr(self.locale, "delete.body")),
            )
            .action(
                Button::secondary("delete-cancel", tr(self.locale, "delete.cancel")).on_click(
                    cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.table.cancel_delete();
                        cx.notify();
                    }),
                ),
            )
            .action(
                Button::danger("delete-confirm", tr(self.locale, "delete.confirm")).on_click(
                    cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.confirm_delete(cx)
                    }),
                ),
            )
    }
}

impl<R: TableRow> Render for TableView<R> {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.table.state();
        let columns = state.columns().to_vec();
        let error = state
            .error()
            .map(str::to_string)
            .or_else(|| self.action_error.clone());
        let info = state.page_info();
        let confirming = state.pending_delete().is_some();
        let loading_text = tr(self.locale, "table.loading");
        let empty_text = tr(self.locale, "table.empty");
        let actions = self.table.source().has_row_actions();

        let (message, rows): (Option<String>, Vec<R>) = match state.body() {
            TableBody::Loading => (Some(loading_text), Vec::new()),
            TableBody::Failed => (None, Vec::new()),
            TableBody::NoRecords => (Some(empty_text), Vec::new()),
            TableBody::Rows(rows) => (None, rows.into_iter().cloned().collect()),
        };
        drop(state);

        let body: Vec<AnyElement> = match message {
            Some(text) => vec![Self::render_message(text).into_any_element()],
            None => rows
                .iter()
                .enumerate()
                .map(|(i, row)| self.render_row(&columns, row, i, cx).into_any_element())
                .collect(),
        };

        div()
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .p_4()
            .gap_4()
            .child(self.render_toolbar(cx))
            .when_some(error, |el, message| el.child(self.render_banner(message)))
            .child(
                div()
                    .flex_1()
                    .flex()
                    .flex_col()
                    .bg(Palette::content_bg())
                    .border_1()
                    .border_color(Palette::border())
                    .rounded_md()
                    .overflow_hidden()
                    .child(
                        div()
                            .id("table-scroll")
                            .flex_1()
                            .overflow_scroll()
                            .child(self.render_header(&columns, actions))
                            .children(body),
                    )
                    .child(Pagination::new(info, self.locale).on_step(cx.listener(
                        |this, step: &PageStep, _window, cx| this.step_page(*step, cx),
                    ))),
            )
            .when(confirming, |el| el.child(self.render_delete_dialog(cx)))
    }
}
