//! Quality rules page

use super::api_fetcher;
use super::catalog::modified_column;
use crate::api::ApiClient;
use crate::domain::Rule;
use crate::i18n::{Locale, tr};
use crate::table::{Column, DataTable, TableOptions, TableSource};

pub fn columns(locale: Locale) -> Vec<Column<Rule>> {
    vec![
        Column::new("id", tr(locale, "col.id")).fixed_width(80.0).no_wrap(),
        Column::new("codigo_regla", tr(locale, "col.code"))
            .fixed_width(110.0)
            .no_wrap(),
        Column::new("descripcion", tr(locale, "col.description")).fixed_width(520.0),
        Column::new("status_nombre", tr(locale, "col.status"))
            .fixed_width(140.0)
            .no_wrap(),
        modified_column(locale),
    ]
}

pub fn options(locale: Locale, page_size: usize) -> TableOptions {
    TableOptions::localized(locale)
        .title(tr(locale, "nav.rules"))
        .page_size(page_size)
        .search_keys(vec!["codigo_regla", "descripcion", "status_nombre"])
}

pub fn table(client: &ApiClient, locale: Locale, page_size: usize) -> DataTable<Rule> {
    DataTable::new(
        columns(locale),
        options(locale, page_size),
        TableSource::new(api_fetcher::<Rule>(client)),
    )
}
