//! Catalog pages
//!
//! Read-only tables for the lookup entities the business form chooses from.

use super::api_fetcher;
use crate::api::ApiClient;
use crate::domain::{Dimension, Process, QualityScript, Requirement, format_timestamp};
use crate::i18n::{Locale, tr};
use crate::table::{Cell, Column, DataTable, FieldValue, TableOptions, TableRow, TableSource, Tone};

/// Badge column over a boolean field
pub(crate) fn flag_badge<R: TableRow>(
    key: &'static str,
    label: String,
    on: String,
    off: String,
) -> Column<R> {
    Column::new(key, label)
        .fixed_width(110.0)
        .no_wrap()
        .render(move |value, _row: &R| match value {
            FieldValue::Bool(true) => Cell::badge(on.clone(), Tone::Success),
            _ => Cell::badge(off.clone(), Tone::Neutral),
        })
}

/// Last-modified column, shown in local time
pub(crate) fn modified_column<R: TableRow>(locale: Locale) -> Column<R> {
    Column::new("fecha_modificacion", tr(locale, "col.modified"))
        .fixed_width(150.0)
        .no_wrap()
        .accessor(|row: &R| format_timestamp(&row.field("fecha_modificacion").to_text()))
}

fn active_badge<R: TableRow>(key: &'static str, locale: Locale) -> Column<R> {
    flag_badge(
        key,
        tr(locale, "col.active"),
        tr(locale, "badge.active"),
        tr(locale, "badge.inactive"),
    )
}

fn options(locale: Locale, title_key: &str, page_size: usize) -> TableOptions {
    TableOptions::localized(locale)
        .title(tr(locale, title_key))
        .page_size(page_size)
}

pub fn dimension_columns(locale: Locale) -> Vec<Column<Dimension>> {
    vec![
        Column::new("id", tr(locale, "col.id")).fixed_width(80.0).no_wrap(),
        Column::new("nombre", tr(locale, "col.name")).fixed_width(220.0),
        Column::new("descripcion", tr(locale, "col.description")).fixed_width(420.0),
        active_badge("b_activo", locale),
        modified_column(locale),
    ]
}

pub fn dimensions(client: &ApiClient, locale: Locale, page_size: usize) -> DataTable<Dimension> {
    DataTable::new(
        dimension_columns(locale),
        options(locale, "nav.dimensions", page_size),
        TableSource::new(api_fetcher::<Dimension>(client)),
    )
}

pub fn process_columns(locale: Locale) -> Vec<Column<Process>> {
    vec![
        Column::new("id", tr(locale, "col.id")).fixed_width(80.0).no_wrap(),
        Column::new("nombre", tr(locale, "col.name")).fixed_width(240.0),
        Column::new("descripcion", tr(locale, "col.description")).fixed_width(420.0),
        active_badge("b_activo", locale),
        modified_column(locale),
    ]
}

pub fn processes(client: &ApiClient, locale: Locale, page_size: usize) -> DataTable<Process> {
    DataTable::new(
        process_columns(locale),
        options(locale, "nav.processes", page_size),
        TableSource::new(api_fetcher::<Process>(client)),
    )
}

pub fn requirement_columns(locale: Locale) -> Vec<Column<Requirement>> {
    let high = tr(locale, "badge.high");
    vec![
        Column::new("id", tr(locale, "col.id")).fixed_width(80.0).no_wrap(),
        Column::new("descripcion", tr(locale, "col.description")).fixed_width(520.0),
        Column::new("prioridad", tr(locale, "col.priority"))
            .fixed_width(110.0)
            .no_wrap()
            .render(move |value, _row: &Requirement| match value {
                FieldValue::Bool(true) => Cell::badge(high.clone(), Tone::Warning),
                _ => Cell::Empty,
            }),
        modified_column(locale),
    ]
}

pub fn requirements(
    client: &ApiClient,
    locale: Locale,
    page_size: usize,
) -> DataTable<Requirement> {
    DataTable::new(
        requirement_columns(locale),
        options(locale, "nav.requirements", page_size),
        TableSource::new(api_fetcher::<Requirement>(client)),
    )
}

pub fn script_columns(locale: Locale) -> Vec<Column<QualityScript>> {
    vec![
        Column::new("id", tr(locale, "col.id")).fixed_width(80.0).no_wrap(),
        Column::new("nombre", tr(locale, "col.name")).fixed_width(260.0),
        Column::new("descripcion", tr(locale, "col.description")).fixed_width(360.0),
        flag_badge(
            "scripts_completos",
            tr(locale, "col.complete"),
            tr(locale, "badge.complete"),
            tr(locale, "badge.incomplete"),
        ),
        modified_column(locale),
    ]
}

/// Scripts table; search also covers the script bodies
pub fn scripts(client: &ApiClient, locale: Locale, page_size: usize) -> DataTable<QualityScript> {
    DataTable::new(
        script_columns(locale),
        options(locale, "nav.scripts", page_size).search_keys(vec![
            "nombre",
            "descripcion",
            "script_inconsistencia",
            "script_correccion",
            "script_scala",
        ]),
        TableSource::new(api_fetcher::<QualityScript>(client)),
    )
}
