//! Scenarios page

use super::api_fetcher;
use super::catalog::modified_column;
use crate::api::ApiClient;
use crate::domain::Scenario;
use crate::i18n::{Locale, tr};
use crate::table::{Column, DataTable, TableOptions, TableSource};

pub fn columns(locale: Locale) -> Vec<Column<Scenario>> {
    vec![
        Column::new("id", tr(locale, "col.id")).fixed_width(80.0).no_wrap(),
        Column::new("codigo_escenario", tr(locale, "col.code"))
            .fixed_width(120.0)
            .no_wrap(),
        Column::new("descripcion", tr(locale, "col.description")).fixed_width(460.0),
        Column::new("estado_detalle", tr(locale, "col.state_detail")).fixed_width(260.0),
        modified_column(locale),
    ]
}

pub fn options(locale: Locale, page_size: usize) -> TableOptions {
    TableOptions::localized(locale)
        .title(tr(locale, "nav.scenarios"))
        .page_size(page_size)
}

pub fn table(client: &ApiClient, locale: Locale, page_size: usize) -> DataTable<Scenario> {
    DataTable::new(
        columns(locale),
        options(locale, page_size),
        TableSource::new(api_fetcher::<Scenario>(client)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableBody;

    #[test]
    fn test_search_spans_visible_columns() {
        let mut state =
            crate::table::DataTableState::new(columns(Locale::En), options(Locale::En, 5));
        let ticket = state.begin_load();
        state.finish_load(
            ticket,
            Ok(vec![
                Scenario {
                    id: 1,
                    codigo_escenario: "ESC-1".to_string(),
                    estado_detalle: "En revisión".to_string(),
                    ..Default::default()
                },
                Scenario {
                    id: 2,
                    codigo_escenario: "ESC-2".to_string(),
                    descripcion: "Carga nocturna".to_string(),
                    ..Default::default()
                },
            ]),
        );
        state.set_search_term("REVISIÓN");
        assert_eq!(state.filtered_rows().len(), 1);
        state.set_search_term("nada");
        assert!(matches!(state.body(), TableBody::NoRecords));
    }
}
