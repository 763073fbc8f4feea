//! Business Page
//!
//! Business-rule table with the scenario-status filter above it and the
//! create/edit form as a modal.

use gpui::{
    AnyElement, ClickEvent, Context, Entity, EventEmitter, IntoElement, ParentElement, Render,
    Styled, Window, div, prelude::*, px,
};
use gpui_component::input::{Input, InputEvent, InputState};
use tracing::warn;

use crate::api::ApiClient;
use crate::components::composite::data_table::{TableEvent, TableView};
use crate::components::composite::modal::Modal;
use crate::components::primitives::button::Button;
use crate::components::primitives::select::SelectView;
use crate::domain::{
    Business, Dimension, Process, QualityScript, Requirement, Rule, ScenarioStatus,
};
use crate::features::business::{self, BusinessForm};
use crate::fetch::Draft;
use crate::i18n::{Locale, tr};
use crate::table::{DataTable, Surface};
use crate::theme::colors::Palette;

/// Business rules page
pub struct BusinessPage {
    client: ApiClient,
    locale: Locale,
    /// Process the page is scoped to, if any
    process: Option<i64>,
    table: Entity<TableView<Business>>,
    status: Entity<SelectView<ScenarioStatus, i64>>,
    form: Option<Entity<BusinessFormView>>,
}

impl BusinessPage {
    pub fn new(
        client: ApiClient,
        locale: Locale,
        page_size: usize,
        process: Option<i64>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let controller = business::table(&client, locale, page_size, process);
        let filter = business::status_filter(&client, locale, &controller);
        let table = cx.new(|cx| TableView::new(controller, locale, window, cx));
        let status = cx.new(|cx| SelectView::new("status-filter", filter, locale, cx));

        // The filter writes into the table state; redraw the table after it
        let table_handle = table.clone();
        cx.observe(&status, move |_this, _, cx| {
            table_handle.update(cx, |_, cx| cx.notify())
        })
        .detach();
        cx.subscribe_in(&table, window, |this: &mut Self, _table, event: &TableEvent, window, cx| {
            this.open_form(*event, window, cx)
        })
        .detach();

        Self {
            client,
            locale,
            process,
            table,
            status,
            form: None,
        }
    }

    fn controller(&self, cx: &Context<Self>) -> DataTable<Business> {
        self.table.read(cx).table().clone()
    }

    fn open_form(&mut self, event: TableEvent, window: &mut Window, cx: &mut Context<Self>) {
        let controller = self.controller(cx);
        let form = match (event, controller.state().surface()) {
            (TableEvent::EditRequested, Surface::Edit(row)) => {
                BusinessForm::edit(&self.client, self.locale, row, self.process)
            }
            (TableEvent::CreateRequested, Surface::Create(_)) => {
                Ok(BusinessForm::create(&self.client, self.locale, self.process))
            }
            _ => return,
        };
        let form = match form {
            Ok(form) => form,
            Err(e) => {
                warn!(error = %e, "Cannot open business form");
                controller.cancel_surface();
                return;
            }
        };

        let editing = matches!(event, TableEvent::EditRequested);
        let locale = self.locale;
        let view =
            cx.new(|cx| BusinessFormView::new(form, controller, editing, locale, window, cx));
        cx.subscribe(&view, |this: &mut Self, _view, _event: &FormClosed, cx| {
            this.form = None;
            this.table.update(cx, |_, cx| cx.notify());
            cx.notify();
        })
        .detach();
        self.form = Some(view);
        cx.notify();
    }
}

impl Render for BusinessPage {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .relative()
            .size_full()
            .flex()
            .flex_col()
            .child(
                div()
                    .px_4()
                    .pt_4()
                    .flex()
                    .justify_end()
                    .child(self.status.clone()),
            )
            .child(div().flex_1().child(self.table.clone()))
            .when_some(self.form.clone(), |el, form| el.child(form))
    }
}

/// Emitted when the form modal is done, saved or cancelled
#[derive(Debug, Clone, Copy)]
pub struct FormClosed;

/// Modal hosting a [`BusinessForm`]
pub struct BusinessFormView {
    form: BusinessForm,
    table: DataTable<Business>,
    editing: bool,
    locale: Locale,
    name: Entity<InputState>,
    process: Entity<SelectView<Process, i64>>,
    requirement: Entity<SelectView<Requirement, i64>>,
    rule: Entity<SelectView<Rule, i64>>,
    script: Entity<SelectView<QualityScript, i64>>,
    dimension: Entity<SelectView<Dimension, i64>>,
    saving: bool,
    error: Option<String>,
}

impl EventEmitter<FormClosed> for BusinessFormView {}

impl BusinessFormView {
    pub fn new(
        form: BusinessForm,
        table: DataTable<Business>,
        editing: bool,
        locale: Locale,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let name_value = form.record().text("nombre");
        let name = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder(tr(locale, "col.name"))
                .default_value(name_value)
        });
        cx.subscribe(&name, |this: &mut Self, state, event: &InputEvent, cx| match event {
            InputEvent::Change => {
                let value = state.read(cx).value().to_string();
                this.form.set_name(value);
                cx.notify();
            }
            InputEvent::PressEnter { .. } => this.save(cx),
            _ => {}
        })
        .detach();

        let process =
            cx.new(|cx| SelectView::new("form-proceso", form.process.clone(), locale, cx));
        let requirement = cx.new(|cx| {
            SelectView::new("form-requerimiento", form.requirement.clone(), locale, cx)
        });
        let rule = cx.new(|cx| SelectView::new("form-regla", form.rule.clone(), locale, cx));
        let script = cx.new(|cx| SelectView::new("form-script", form.script.clone(), locale, cx));
        let dimension =
            cx.new(|cx| SelectView::new("form-dimension", form.dimension.clone(), locale, cx));

        // Choices write into the form; redraw for errors and read-only fields
        cx.observe(&process, |_this, _, cx| cx.notify()).detach();
        cx.observe(&requirement, |_this, _, cx| cx.notify()).detach();
        cx.observe(&rule, |_this, _, cx| cx.notify()).detach();
        cx.observe(&script, |_this, _, cx| cx.notify()).detach();
        cx.observe(&dimension, |_this, _, cx| cx.notify()).detach();

        Self {
            form,
            table,
            editing,
            locale,
            name,
            process,
            requirement,
            rule,
            script,
            dimension,
            saving: false,
            error: None,
        }
    }

    fn close(&mut self, cx: &mut Context<Self>) {
        self.form.destroy();
        cx.emit(FormClosed);
    }

    fn cancel(&mut self, cx: &mut Context<Self>) {
        self.table.cancel_surface();
        self.close(cx);
    }

    fn save(&mut self, cx: &mut Context<Self>) {
        if self.saving {
            return;
        }
        let table = self.table.clone();
        let fallback = tr(self.locale, "table.load_error");
        let pending = if self.editing {
            match self.form.row() {
                Some(Ok(row)) => Some(Pending::Edit(row)),
                Some(Err(e)) => {
                    self.error = Some(e.user_message(&fallback));
                    None
                }
                None => None,
            }
        } else {
            self.form.draft().map(Pending::Create)
        };
        let Some(pending) = pending else {
            cx.notify();
            return;
        };

        self.saving = true;
        self.error = None;
        cx.notify();
        cx.spawn(async move |this, cx| {
            let result = match pending {
                Pending::Edit(row) => table.submit_edit(row).await,
                Pending::Create(draft) => table.submit_create(draft).await,
            };
            let _ = this.update(cx, |view, cx| {
                view.saving = false;
                match result {
                    Ok(()) => view.close(cx),
                    Err(e) => {
                        warn!(error = %e, "Saving business rule failed");
                        view.error = Some(e.user_message(&fallback));
                        cx.notify();
                    }
                }
            });
        })
        .detach();
    }

    fn field(&self, key: &str, label: String, input: AnyElement) -> impl IntoElement {
        let error = self.form.record().field_error(key).map(str::to_string);
        div()
            .flex()
            .flex_col()
            .gap_1()
            .when(!label.is_empty(), |el| {
                el.child(div().text_xs().text_color(Palette::text_secondary()).child(label))
            })
            .child(input)
            .when_some(error, |el, error| {
                el.child(div().text_xs().text_color(Palette::danger()).child(error))
            })
    }
}

enum Pending {
    Edit(Business),
    Create(Draft),
}

impl Render for BusinessFormView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let locale = self.locale;
        let title = if self.editing {
            tr(locale, "form.edit_title")
        } else {
            tr(locale, "form.create_title")
        };
        let description = self.form.record().text("regla_calidad_descripcion");
        let view = cx.entity().downgrade();

        Modal::new(title)
            .width(640.0)
            .on_close(move |_window, cx| {
                let _ = view.update(cx, |this, cx| this.cancel(cx));
            })
            .child(self.field(
                "nombre",
                tr(locale, "col.name"),
                Input::new(&self.name).into_any_element(),
            ))
            .child(self.field("proceso", String::new(), self.process.clone().into_any_element()))
            .child(self.field(
                "requerimiento",
                String::new(),
                self.requirement.clone().into_any_element(),
            ))
            .child(self.field(
                "regla_calidad",
                String::new(),
                self.rule.clone().into_any_element(),
            ))
            .child(
                self.field(
                    "regla_calidad_descripcion",
                    tr(locale, "col.description"),
                    div()
                        .px_3()
                        .py_2()
                        .min_h(px(36.0))
                        .rounded_md()
                        .bg(Palette::table_header_bg())
                        .text_sm()
                        .text_color(Palette::text_secondary())
                        .child(description)
                        .into_any_element(),
                ),
            )
            .child(self.field("scripts", String::new(), self.script.clone().into_any_element()))
            .child(self.field(
                "dimension_calidad_id",
                String::new(),
                self.dimension.clone().into_any_element(),
            ))
            .when_some(self.error.clone(), |modal, error| {
                modal.child(div().text_sm().text_color(Palette::danger()).child(error))
            })
            .action(
                Button::secondary("form-cancel", tr(locale, "form.cancel")).on_click(cx.listener(
                    |this, _event: &ClickEvent, _window, cx| this.cancel(cx),
                )),
            )
            .action(
                Button::primary("form-save", tr(locale, "form.save"))
                    .busy(self.saving, tr(locale, "form.saving"))
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.save(cx)
                    })),
            )
    }
}
