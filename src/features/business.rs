//! Business rules page
//!
//! The main screen: a table of business rules with a scenario-status filter
//! and create/edit forms built from five dynamic selects.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use super::{api_fetcher, api_mutation, by_text};
use crate::api::ApiClient;
use crate::domain::{Business, Dimension, Process, QualityScript, Requirement, Rule, ScenarioStatus};
use crate::error::Result;
use crate::fetch::{Draft, fetcher};
use crate::forms::{FieldKind, FormField, RecordForm};
use crate::i18n::{Locale, tr};
use crate::select::{DynamicSelect, DynamicSelectState, SelectOptions, Selection};
use crate::services::run_in_tokio;
use crate::table::{Column, DataTable, FieldValue, TableOptions, TableSource};

/// Field the status filter compares against
pub const STATUS_FILTER_FIELD: &str = "escenarios";

pub fn columns(locale: Locale) -> Vec<Column<Business>> {
    vec![
        Column::new("id", tr(locale, "col.id")).fixed_width(80.0).no_wrap(),
        Column::new("nombre", tr(locale, "col.name")).fixed_width(320.0),
        Column::new("proceso_nombre", tr(locale, "col.process"))
            .fixed_width(220.0)
            .no_wrap(),
        Column::new("requerimiento_descripcion", tr(locale, "col.requirement")).fixed_width(420.0),
        Column::new("regla_calidad_codigo", tr(locale, "col.rule"))
            .fixed_width(90.0)
            .no_wrap(),
        Column::new("regla_calidad_descripcion", tr(locale, "col.description")).fixed_width(420.0),
        Column::new("dimension_calidad_nombre", tr(locale, "col.dimension"))
            .fixed_width(220.0)
            .no_wrap(),
    ]
}

pub fn options(locale: Locale, page_size: usize) -> TableOptions {
    TableOptions::localized(locale)
        .title(tr(locale, "nav.business"))
        .page_size(page_size)
        .aux_field(STATUS_FILTER_FIELD)
}

/// List, optionally narrowed to one process, with full CRUD
pub fn source(client: &ApiClient, process: Option<i64>) -> TableSource<Business> {
    let list_client = client.clone();
    TableSource::new(fetcher(move || {
        let client = list_client.clone();
        run_in_tokio(async move { client.list_business(process).await })
    }))
    .on_create(api_mutation(client, |client, draft: Draft| async move {
        client.create::<Business>(&draft).await
    }))
    .on_update(api_mutation(client, |client, row: Business| async move {
        client.update(&row).await
    }))
    .on_delete(api_mutation(client, |client, row: Business| async move {
        client.delete_record(&row).await
    }))
}

pub fn table(
    client: &ApiClient,
    locale: Locale,
    page_size: usize,
    process: Option<i64>,
) -> DataTable<Business> {
    DataTable::new(columns(locale), options(locale, page_size), source(client, process))
}

/// Scenario-status select driving the table's auxiliary filter: active
/// statuses only, sorted by name
pub fn status_filter(
    client: &ApiClient,
    locale: Locale,
    table: &DataTable<Business>,
) -> DynamicSelect<ScenarioStatus, i64> {
    let state = DynamicSelectState::new(
        SelectOptions::localized(locale)
            .label(tr(locale, "select.status_filter"))
            .placeholder(tr(locale, "select.all")),
        |s: &ScenarioStatus| s.id,
        |s: &ScenarioStatus| s.nombre.clone(),
    )
    .with_filter(|s: &ScenarioStatus| s.b_activo)
    .with_sort(by_text(|s: &ScenarioStatus| &s.nombre));

    let table = table.clone();
    DynamicSelect::new(api_fetcher::<ScenarioStatus>(client), state).on_change(move |selection| {
        let value = selection.value().map(|id| FieldValue::Int(*id));
        table.update(|t| t.set_aux_filter(value));
    })
}

pub fn form_fields(locale: Locale) -> Vec<FormField> {
    vec![
        FormField::new("nombre", tr(locale, "col.name")).required(),
        FormField::new("proceso", tr(locale, "col.process"))
            .kind(FieldKind::Choice)
            .required(),
        FormField::new("requerimiento", tr(locale, "col.requirement"))
            .kind(FieldKind::Choice)
            .required(),
        FormField::new("regla_calidad", tr(locale, "col.rule"))
            .kind(FieldKind::Choice)
            .required(),
        FormField::new("regla_calidad_descripcion", tr(locale, "col.description"))
            .kind(FieldKind::ReadOnly),
        FormField::new("scripts", tr(locale, "col.script"))
            .kind(FieldKind::Choice)
            .required(),
        FormField::new("dimension_calidad_id", tr(locale, "col.dimension"))
            .kind(FieldKind::Choice)
            .required(),
    ]
}

/// Create/edit form for a business rule.
///
/// Each select writes its id through the value channel and the matching
/// display fields through the item channel, so the saved record carries
/// both without a second lookup.
pub struct BusinessForm {
    form: Rc<RefCell<RecordForm>>,
    pub process: DynamicSelect<Process, i64>,
    pub requirement: DynamicSelect<Requirement, i64>,
    pub rule: DynamicSelect<Rule, i64>,
    pub script: DynamicSelect<QualityScript, i64>,
    pub dimension: DynamicSelect<Dimension, i64>,
}

fn choice_writer(
    form: &Rc<RefCell<RecordForm>>,
    key: &'static str,
) -> impl Fn(&Selection<i64>) + 'static {
    let form = form.clone();
    move |selection| form.borrow_mut().set_choice(key, selection.value().copied())
}

fn select_options(locale: Locale, label_key: &str) -> SelectOptions {
    SelectOptions::localized(locale).label(tr(locale, label_key))
}

impl BusinessForm {
    /// Empty form; the process select starts at `process` when given
    pub fn create(client: &ApiClient, locale: Locale, process: Option<i64>) -> Self {
        let mut record = RecordForm::create(form_fields(locale), locale);
        record.set("nombre", "");
        if let Some(process) = process {
            record.set_choice("proceso", Some(process));
        }
        Self::build(client, locale, record)
    }

    /// Form seeded from `row`; a row without a process falls back to `process`
    pub fn edit(
        client: &ApiClient,
        locale: Locale,
        row: &Business,
        process: Option<i64>,
    ) -> Result<Self> {
        let mut record = RecordForm::edit(form_fields(locale), row, locale)?;
        if let Some(process) = process {
            record.set_default("proceso", process);
        }
        Ok(Self::build(client, locale, record))
    }

    fn build(client: &ApiClient, locale: Locale, record: RecordForm) -> Self {
        let form = Rc::new(RefCell::new(record));

        let process = DynamicSelect::new(
            api_fetcher::<Process>(client),
            DynamicSelectState::new(
                select_options(locale, "col.process"),
                |p: &Process| p.id,
                |p: &Process| p.nombre.clone(),
            )
            .with_filter(|p: &Process| p.b_activo)
            .with_sort(by_text(|p: &Process| &p.nombre)),
        )
        .on_change(choice_writer(&form, "proceso"));

        let requirement = {
            let item_form = form.clone();
            DynamicSelect::new(
                api_fetcher::<Requirement>(client),
                DynamicSelectState::new(
                    select_options(locale, "col.requirement"),
                    |r: &Requirement| r.id,
                    |r: &Requirement| r.descripcion.clone(),
                )
                .with_sort(by_text(|r: &Requirement| &r.descripcion)),
            )
            .on_change(choice_writer(&form, "requerimiento"))
            .on_item_change(move |r: &Requirement| {
                item_form
                    .borrow_mut()
                    .set("requerimiento_descripcion", r.descripcion.clone())
            })
        };

        let rule = {
            let item_form = form.clone();
            DynamicSelect::new(
                api_fetcher::<Rule>(client),
                DynamicSelectState::new(
                    select_options(locale, "col.rule"),
                    |r: &Rule| r.id,
                    |r: &Rule| r.codigo_regla.clone(),
                )
                .with_sort(by_text(|r: &Rule| &r.codigo_regla)),
            )
            .on_change(choice_writer(&form, "regla_calidad"))
            .on_item_change(move |r: &Rule| {
                let mut form = item_form.borrow_mut();
                form.set("regla_calidad_descripcion", r.descripcion.clone());
                form.set("regla_calidad_codigo", r.codigo_regla.clone());
            })
        };

        let script = {
            let item_form = form.clone();
            DynamicSelect::new(
                api_fetcher::<QualityScript>(client),
                DynamicSelectState::new(
                    select_options(locale, "col.script"),
                    |s: &QualityScript| s.id,
                    |s: &QualityScript| s.nombre.clone(),
                )
                .with_filter(|s: &QualityScript| s.scripts_completos)
                .with_sort(by_text(|s: &QualityScript| &s.nombre)),
            )
            .on_change(choice_writer(&form, "scripts"))
            .on_item_change(move |s: &QualityScript| {
                item_form.borrow_mut().set("script_nombre", s.nombre.clone())
            })
        };

        let dimension = {
            let item_form = form.clone();
            DynamicSelect::new(
                api_fetcher::<Dimension>(client),
                DynamicSelectState::new(
                    select_options(locale, "col.dimension"),
                    |d: &Dimension| d.id,
                    |d: &Dimension| d.nombre.clone(),
                )
                .with_filter(|d: &Dimension| d.b_activo)
                .with_sort(by_text(|d: &Dimension| &d.nombre)),
            )
            .on_change(choice_writer(&form, "dimension_calidad_id"))
            .on_item_change(move |d: &Dimension| {
                item_form
                    .borrow_mut()
                    .set("dimension_calidad_nombre", d.nombre.clone())
            })
        };

        let this = Self {
            form,
            process,
            requirement,
            rule,
            script,
            dimension,
        };
        this.sync_selections();
        this
    }

    /// Show the form's current ids in the selects without emitting
    fn sync_selections(&self) {
        let form = self.form.borrow();
        self.process.set_selection(form.int("proceso").into());
        self.requirement.set_selection(form.int("requerimiento").into());
        self.rule.set_selection(form.int("regla_calidad").into());
        self.script.set_selection(form.int("scripts").into());
        self.dimension.set_selection(form.int("dimension_calidad_id").into());
    }

    pub fn record(&self) -> std::cell::Ref<'_, RecordForm> {
        self.form.borrow()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.form.borrow_mut().set("nombre", Value::String(name.into()));
    }

    /// Validate; `true` when every required field is filled
    pub fn validate(&self) -> bool {
        self.form.borrow_mut().validate()
    }

    /// Draft for the create callback, `None` while invalid
    pub fn draft(&self) -> Option<Draft> {
        self.validate().then(|| self.form.borrow().to_draft())
    }

    /// Updated row for the edit callback, `None` while invalid
    pub fn row(&self) -> Option<Result<Business>> {
        self.validate().then(|| self.form.borrow().to_row())
    }

    /// Tear down the selects; late option responses are ignored
    pub fn destroy(&self) {
        self.process.destroy();
        self.requirement.destroy();
        self.rule.destroy();
        self.script.destroy();
        self.dimension.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::fetch::Fetcher;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig::default()).unwrap()
    }

    fn static_fetcher<T: Clone + Send + Sync + 'static>(items: Vec<T>) -> Fetcher<T> {
        fetcher(move || {
            let items = items.clone();
            async move { Ok(items) }
        })
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule {
                id: 11,
                codigo_regla: "RC-11".to_string(),
                descripcion: "DNI no vacío".to_string(),
                ..Default::default()
            },
            Rule {
                id: 12,
                codigo_regla: "RC-12".to_string(),
                descripcion: "Fecha válida".to_string(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_rule_choice_fills_id_and_display_fields() {
        let form = BusinessForm::create(&client(), Locale::En, Some(2));
        futures::executor::block_on(form.rule.set_fetcher(static_fetcher(rules())));

        form.rule.choose(Selection::Value(12));
        let record = form.record();
        assert_eq!(record.int("regla_calidad"), Some(12));
        assert_eq!(record.text("regla_calidad_descripcion"), "Fecha válida");
        assert_eq!(record.text("regla_calidad_codigo"), "RC-12");
        assert_eq!(record.int("proceso"), Some(2));
    }

    #[test]
    fn test_uncached_rule_sets_only_the_id() {
        let form = BusinessForm::create(&client(), Locale::En, None);
        futures::executor::block_on(form.rule.set_fetcher(static_fetcher(rules())));
        form.rule.choose(Selection::Value(99));
        let record = form.record();
        assert_eq!(record.int("regla_calidad"), Some(99));
        assert_eq!(record.text("regla_calidad_codigo"), "");
    }

    #[test]
    fn test_dimension_choice_and_placeholder() {
        let form = BusinessForm::create(&client(), Locale::En, None);
        let dims = vec![Dimension {
            id: 4,
            nombre: "Completitud".to_string(),
            b_activo: true,
            ..Default::default()
        }];
        futures::executor::block_on(form.dimension.set_fetcher(static_fetcher(dims)));
        form.dimension.choose(Selection::Value(4));
        assert_eq!(form.record().text("dimension_calidad_nombre"), "Completitud");

        form.dimension.choose(Selection::Empty);
        assert_eq!(form.record().value("dimension_calidad_id"), Some(&Value::Null));
    }

    #[test]
    fn test_draft_requires_all_choices() {
        let form = BusinessForm::create(&client(), Locale::En, Some(1));
        form.set_name("Completitud DNI");
        assert!(form.draft().is_none());
        assert_eq!(
            form.record().missing(),
            vec!["requerimiento", "regla_calidad", "scripts", "dimension_calidad_id"]
        );

        futures::executor::block_on(form.rule.set_fetcher(static_fetcher(rules())));
        form.requirement.choose(Selection::Value(3));
        form.rule.choose(Selection::Value(11));
        form.script.choose(Selection::Value(5));
        form.dimension.choose(Selection::Value(6));

        let draft = form.draft().unwrap();
        assert_eq!(draft.get("proceso"), Some(&Value::from(1)));
        assert_eq!(draft.get("regla_calidad_codigo"), Some(&Value::from("RC-11")));
        assert_eq!(draft.get("nombre"), Some(&Value::from("Completitud DNI")));
    }

    #[test]
    fn test_edit_prefills_selects_and_merges_row() {
        let row = Business {
            id: 8,
            nombre: "Formato correo".to_string(),
            proceso: Some(3),
            requerimiento: Some(1),
            regla_calidad: Some(11),
            scripts: Some(2),
            dimension_calidad_id: Some(4),
            escenario_nombre: "Inicial".to_string(),
            ..Default::default()
        };
        let form = BusinessForm::edit(&client(), Locale::En, &row, Some(9)).unwrap();
        assert_eq!(form.rule.state().selection(), &Selection::Value(11));
        assert_eq!(form.process.state().selection(), &Selection::Value(3));

        form.set_name("Formato de correo");
        let updated = form.row().unwrap().unwrap();
        assert_eq!(updated.id, 8);
        assert_eq!(updated.nombre, "Formato de correo");
        assert_eq!(updated.escenario_nombre, "Inicial");
    }
}
