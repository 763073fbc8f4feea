//! DataTableState - synchronous table state machine
//!
//! Everything the table knows lives here: the cached rows, filter inputs,
//! the requested page, the delete confirmation slot, per-row delete markers
//! and the edit/create surface. Async work happens in
//! [`DataTable`](super::DataTable), which brackets every await with a
//! `begin_*` / `finish_*` pair on this type.

use ahash::AHashSet;
use tracing::{debug, warn};

use super::column::Column;
use super::filter::{matches_aux, matches_search, normalize_term};
use super::pagination::PageInfo;
use super::row::{FieldValue, RowKey, TableRow};
use crate::constants::{DEFAULT_ID_FIELD, DEFAULT_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::fetch::Draft;
use crate::i18n::{Locale, tr};

/// Declarative table configuration, fixed for the table's lifetime
#[derive(Debug, Clone)]
pub struct TableOptions {
    pub title: String,
    /// Rows per page, at least 1
    pub page_size: usize,
    /// Field holding each row's identity
    pub id_field: &'static str,
    pub search_enabled: bool,
    /// Fields searched instead of every column key
    pub search_keys: Option<Vec<&'static str>>,
    pub search_placeholder: String,
    /// Field compared by the auxiliary filter
    pub aux_field: Option<&'static str>,
    /// Banner text when a failed load carries no payload text
    pub load_error_fallback: String,
}

impl TableOptions {
    /// Defaults with texts in `locale`
    pub fn localized(locale: Locale) -> Self {
        Self {
            title: tr(locale, "table.default_title"),
            page_size: DEFAULT_PAGE_SIZE,
            id_field: DEFAULT_ID_FIELD,
            search_enabled: true,
            search_keys: None,
            search_placeholder: tr(locale, "table.search"),
            aux_field: None,
            load_error_fallback: tr(locale, "table.load_error"),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn id_field(mut self, field: &'static str) -> Self {
        self.id_field = field;
        self
    }

    pub fn search_keys(mut self, keys: Vec<&'static str>) -> Self {
        self.search_keys = Some(keys);
        self
    }

    pub fn disable_search(mut self) -> Self {
        self.search_enabled = false;
        self
    }

    pub fn aux_field(mut self, field: &'static str) -> Self {
        self.aux_field = Some(field);
        self
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::localized(Locale::default())
    }
}

/// Stamp of one issued load; only the latest stamp is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

impl LoadTicket {
    pub(crate) fn new(seq: u64) -> Self {
        Self { seq }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A delete that has been confirmed and marked in flight
#[derive(Debug, Clone)]
pub struct DeleteTicket<R> {
    pub row: R,
    pub key: RowKey,
}

/// Edit/create overlay
#[derive(Debug, Clone)]
pub enum Surface<R> {
    Closed,
    Edit(R),
    Create(Draft),
}

/// What the table body shows; exactly one at a time
#[derive(Debug)]
pub enum TableBody<'a, R> {
    Loading,
    /// Load failed: banner plus an empty table shell
    Failed,
    /// Nothing to show after filtering
    NoRecords,
    Rows(Vec<&'a R>),
}

/// State for one data table instance
pub struct DataTableState<R: TableRow> {
    columns: Vec<Column<R>>,
    options: TableOptions,
    rows: Vec<R>,
    loading: bool,
    error: Option<String>,
    search_term: String,
    aux_value: Option<FieldValue>,
    /// Requested page; clamped whenever it is read
    current_page: usize,
    load_seq: u64,
    deleting: AHashSet<RowKey>,
    pending_delete: Option<R>,
    surface: Surface<R>,
    destroyed: bool,
}

impl<R: TableRow> DataTableState<R> {
    pub fn new(columns: Vec<Column<R>>, options: TableOptions) -> Self {
        let options = TableOptions {
            page_size: options.page_size.max(1),
            ..options
        };
        Self {
            columns,
            options,
            rows: Vec::new(),
            loading: false,
            error: None,
            search_term: String::new(),
            aux_value: None,
            current_page: 1,
            load_seq: 0,
            deleting: AHashSet::new(),
            pending_delete: None,
            surface: Surface::Closed,
            destroyed: false,
        }
    }

    // ==================== Getters ====================

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Full cached collection, unfiltered
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn aux_filter(&self) -> Option<&FieldValue> {
        self.aux_value.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Identity of `row`; a row without one violates the caller's contract
    pub fn row_key(&self, row: &R) -> Result<RowKey> {
        row.field(self.options.id_field)
            .as_key()
            .ok_or_else(|| Error::MissingIdentity {
                field: self.options.id_field.to_string(),
            })
    }

    // ==================== Loading ====================

    /// Start a load: clears the previous error at once and stamps the request
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.loading = true;
        self.error = None;
        debug!(seq = self.load_seq, title = %self.options.title, "Table load started");
        LoadTicket::new(self.load_seq)
    }

    /// Apply a load result. Stale or post-destroy results are dropped and
    /// `false` is returned.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<R>>) -> bool {
        if self.destroyed {
            debug!(seq = ticket.seq, "Ignoring load result after destroy");
            return false;
        }
        if ticket.seq != self.load_seq {
            debug!(
                seq = ticket.seq,
                latest = self.load_seq,
                "Discarding stale load result"
            );
            return false;
        }

        match result {
            Ok(rows) => {
                debug!(count = rows.len(), "Table load finished");
                self.rows = rows;
                self.current_page = 1;
            }
            Err(e) => {
                warn!(error = %e, title = %self.options.title, "Table load failed");
                self.error = Some(e.user_message(&self.options.load_error_fallback));
                self.rows.clear();
            }
        }
        self.loading = false;
        true
    }

    // ==================== Filtering ====================

    /// Update the search term and go back to the first page
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if !self.options.search_enabled {
            return;
        }
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Set or clear the auxiliary equality filter and go back to the first page
    pub fn set_aux_filter(&mut self, value: Option<FieldValue>) {
        self.aux_value = value;
        self.current_page = 1;
    }

    /// Fields the search term is matched against
    pub fn search_keys(&self) -> Vec<&'static str> {
        match &self.options.search_keys {
            Some(keys) if !keys.is_empty() => keys.clone(),
            _ => self.columns.iter().map(|c| c.key).collect(),
        }
    }

    /// Rows passing both filters, in cache order
    pub fn filtered_rows(&self) -> Vec<&R> {
        let needle = if self.options.search_enabled {
            normalize_term(&self.search_term)
        } else {
            None
        };
        let keys = self.search_keys();
        let aux = self
            .options
            .aux_field
            .zip(self.aux_value.as_ref());

        self.rows
            .iter()
            .filter(|row| aux.is_none_or(|(field, value)| matches_aux(*row, field, value)))
            .filter(|row| {
                needle
                    .as_deref()
                    .is_none_or(|needle| matches_search(*row, &keys, needle))
            })
            .collect()
    }

    // ==================== Pagination ====================

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(
            self.current_page,
            self.filtered_rows().len(),
            self.options.page_size,
        )
    }

    /// Current page, always within `[1, total_pages]`
    pub fn current_page(&self) -> usize {
        self.page_info().current
    }

    /// Rows of the current page
    pub fn page_rows(&self) -> Vec<&R> {
        let info = self.page_info();
        let filtered = self.filtered_rows();
        filtered[info.range()].to_vec()
    }

    pub fn next_page(&mut self) {
        self.current_page = self.page_info().next();
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.page_info().prev();
    }

    /// Body to render
    pub fn body(&self) -> TableBody<'_, R> {
        if self.loading {
            return TableBody::Loading;
        }
        if self.error.is_some() {
            return TableBody::Failed;
        }
        let rows = self.page_rows();
        if rows.is_empty() {
            TableBody::NoRecords
        } else {
            TableBody::Rows(rows)
        }
    }

    // ==================== Delete ====================

    /// Stage `row` for confirmation. Rejected while its delete is in flight.
    pub fn request_delete(&mut self, row: R) -> Result<()> {
        let key = self.row_key(&row)?;
        if self.deleting.contains(&key) {
            return Err(Error::DeleteInFlight {
                key: key.to_string(),
            });
        }
        self.pending_delete = Some(row);
        Ok(())
    }

    /// Row waiting in the confirmation dialog
    pub fn pending_delete(&self) -> Option<&R> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Close the dialog and mark the staged row in flight. `Ok(None)` when
    /// nothing was staged.
    pub fn begin_delete(&mut self) -> Result<Option<DeleteTicket<R>>> {
        let Some(row) = self.pending_delete.take() else {
            return Ok(None);
        };
        let key = self.row_key(&row)?;
        if !self.deleting.insert(key.clone()) {
            return Err(Error::DeleteInFlight {
                key: key.to_string(),
            });
        }
        debug!(%key, "Delete started");
        Ok(Some(DeleteTicket { row, key }))
    }

    /// Clear the in-flight marker and, on success, drop that identity from
    /// the cache. The mutation result is handed back to the caller.
    pub fn finish_delete(&mut self, ticket: DeleteTicket<R>, result: Result<()>) -> Result<()> {
        if self.destroyed {
            return result;
        }
        self.deleting.remove(&ticket.key);
        match &result {
            Ok(()) => {
                let id_field = self.options.id_field;
                self.rows
                    .retain(|r| r.field(id_field).as_key().as_ref() != Some(&ticket.key));
                debug!(key = %ticket.key, "Delete finished");
            }
            Err(e) => warn!(key = %ticket.key, error = %e, "Delete failed"),
        }
        result
    }

    /// Whether `row` has a delete in flight (drives the per-row spinner)
    pub fn is_deleting(&self, row: &R) -> bool {
        self.row_key(row)
            .map(|key| self.deleting.contains(&key))
            .unwrap_or(false)
    }

    pub fn deleting_count(&self) -> usize {
        self.deleting.len()
    }

    // ==================== Edit / Create ====================

    pub fn request_edit(&mut self, row: R) {
        self.surface = Surface::Edit(row);
    }

    /// Open the create surface with empty defaults
    pub fn request_create(&mut self) {
        self.surface = Surface::Create(Draft::new());
    }

    pub fn surface(&self) -> &Surface<R> {
        &self.surface
    }

    pub fn close_surface(&mut self) {
        self.surface = Surface::Closed;
    }

    // ==================== Lifecycle ====================

    /// Stop reacting to anything still in flight
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorBody;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        nombre: String,
        escenarios: i64,
        secreto: String,
    }

    crate::table_row!(Row { id, nombre, escenarios, secreto });

    fn rows(n: i64) -> Vec<Row> {
        (1..=n)
            .map(|i| Row {
                id: i,
                nombre: format!("Regla {i}"),
                escenarios: i % 3,
                secreto: "hidden".to_string(),
            })
            .collect()
    }

    fn columns() -> Vec<Column<Row>> {
        vec![Column::new("id", "ID"), Column::new("nombre", "Nombre")]
    }

    fn loaded(n: i64) -> DataTableState<Row> {
        let options = TableOptions::default().aux_field("escenarios");
        let mut state = DataTableState::new(columns(), options);
        let ticket = state.begin_load();
        assert!(state.finish_load(ticket, Ok(rows(n))));
        state
    }

    fn ids(rows: &[&Row]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_page_two_of_twenty_five() {
        let mut state = loaded(25);
        assert_eq!(state.page_info().total_pages, 3);
        state.next_page();
        assert_eq!(state.current_page(), 2);
        assert_eq!(ids(&state.page_rows()), (11..=20).collect::<Vec<_>>());
        state.next_page();
        state.next_page();
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.page_rows().len(), 5);
        state.prev_page();
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_filter_change_resets_and_clamps_page() {
        let mut state = loaded(25);
        state.next_page();
        state.next_page();
        state.set_search_term("regla 2");
        assert_eq!(state.current_page(), 1);
        // "Regla 2", "Regla 20".."Regla 25"
        assert_eq!(ids(&state.filtered_rows()), vec![2, 20, 21, 22, 23, 24, 25]);
        assert!(state.current_page() <= state.page_info().total_pages);
    }

    #[test]
    fn test_search_only_visible_columns_by_default() {
        let mut state = loaded(5);
        state.set_search_term("HIDDEN");
        assert!(state.filtered_rows().is_empty());
        assert!(matches!(state.body(), TableBody::NoRecords));
    }

    #[test]
    fn test_restricted_search_keys() {
        let options = TableOptions::default().search_keys(vec!["secreto"]);
        let mut state = DataTableState::new(columns(), options);
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(rows(3)));
        state.set_search_term("hidden");
        assert_eq!(state.filtered_rows().len(), 3);
        state.set_search_term("regla");
        assert!(state.filtered_rows().is_empty());
    }

    #[test]
    fn test_search_subset_property() {
        let mut state = loaded(40);
        for term in ["", "1", "regla 3", "REGLA", "xyz", " 7 "] {
            state.set_search_term(term);
            let filtered = state.filtered_rows();
            assert!(filtered.len() <= state.rows().len());
            let needle = term.trim().to_lowercase();
            if needle.is_empty() {
                assert_eq!(filtered.len(), state.rows().len());
            }
            for row in filtered {
                assert!(
                    row.id.to_string().contains(&needle)
                        || row.nombre.to_lowercase().contains(&needle)
                );
            }
        }
    }

    #[test]
    fn test_search_disabled_ignores_term() {
        let options = TableOptions::default().disable_search();
        let mut state = DataTableState::new(columns(), options);
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(rows(4)));
        state.set_search_term("zzz");
        assert_eq!(state.search_term(), "");
        assert_eq!(state.filtered_rows().len(), 4);
    }

    #[test]
    fn test_aux_filter_composes_with_search() {
        let mut state = loaded(12);
        state.set_aux_filter(Some(FieldValue::Int(1)));
        assert_eq!(ids(&state.filtered_rows()), vec![1, 4, 7, 10]);
        state.set_search_term("1");
        assert_eq!(ids(&state.filtered_rows()), vec![1, 10]);
        state.set_aux_filter(None);
        assert_eq!(ids(&state.filtered_rows()), vec![1, 10, 11, 12]);
    }

    #[test]
    fn test_aux_filter_resets_page() {
        let mut state = loaded(60);
        state.next_page();
        assert_eq!(state.current_page(), 2);
        // 20 rows still match, so page 2 would remain valid without a reset
        state.set_aux_filter(Some(FieldValue::Int(1)));
        assert_eq!(state.page_info().total_pages, 2);
        assert_eq!(state.current_page(), 1);
        assert_eq!(ids(&state.page_rows())[0], 1);

        state.next_page();
        state.set_aux_filter(None);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_failed_load_shows_detail_and_empties_rows() {
        let mut state = loaded(3);
        let ticket = state.begin_load();
        let timeout = Error::api(504, ApiErrorBody::detail("timeout"));
        let applied = state.finish_load(ticket, Err(timeout));
        assert!(applied);
        assert_eq!(state.error(), Some("timeout"));
        assert!(state.rows().is_empty());
        assert!(!state.is_loading());
        assert!(matches!(state.body(), TableBody::Failed));
    }

    #[test]
    fn test_failed_load_without_payload_uses_fallback() {
        let mut state = loaded(0);
        let ticket = state.begin_load();
        state.finish_load(
            ticket,
            Err(Error::Invalid {
                message: "boom".to_string(),
            }),
        );
        assert_eq!(state.error(), Some("Unknown error"));
    }

    #[test]
    fn test_reload_clears_error_before_result() {
        let mut state = loaded(0);
        let ticket = state.begin_load();
        state.finish_load(ticket, Err(Error::api(500, ApiErrorBody::message("down"))));
        assert_eq!(state.error(), Some("down"));
        let _ticket = state.begin_load();
        assert_eq!(state.error(), None);
        assert!(matches!(state.body(), TableBody::Loading));
    }

    #[test]
    fn test_body_states_are_exclusive() {
        let mut state = DataTableState::new(columns(), TableOptions::default());
        assert!(matches!(state.body(), TableBody::NoRecords));
        let ticket = state.begin_load();
        assert!(matches!(state.body(), TableBody::Loading));
        state.finish_load(ticket, Ok(Vec::new()));
        assert!(matches!(state.body(), TableBody::NoRecords));
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(rows(2)));
        assert!(matches!(state.body(), TableBody::Rows(ref r) if r.len() == 2));
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut state = DataTableState::new(columns(), TableOptions::default());
        let first = state.begin_load();
        let second = state.begin_load();
        assert!(state.finish_load(second, Ok(rows(2))));
        assert!(!state.finish_load(first, Ok(rows(9))));
        assert_eq!(state.rows().len(), 2);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_stale_completion_keeps_loading_flag() {
        let mut state = DataTableState::new(columns(), TableOptions::default());
        let first = state.begin_load();
        let _second = state.begin_load();
        state.finish_load(first, Ok(rows(9)));
        assert!(state.is_loading());
        assert!(state.rows().is_empty());
    }

    #[test]
    fn test_delete_flow_removes_only_that_row() {
        let mut state = loaded(5);
        let target = state.rows()[2].clone();
        state.request_delete(target.clone()).unwrap();
        assert_eq!(state.pending_delete(), Some(&target));
        assert_eq!(state.rows().len(), 5);

        let ticket = state.begin_delete().unwrap().unwrap();
        assert!(state.pending_delete().is_none());
        assert!(state.is_deleting(&target));
        assert!(state.request_delete(target.clone()).is_err());

        state.finish_delete(ticket, Ok(())).unwrap();
        assert!(!state.is_deleting(&target));
        assert_eq!(ids(&state.rows().iter().collect::<Vec<_>>()), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_failed_delete_keeps_rows_and_clears_marker() {
        let mut state = loaded(5);
        let target = state.rows()[0].clone();
        state.request_delete(target.clone()).unwrap();
        let ticket = state.begin_delete().unwrap().unwrap();
        let in_use = Error::api(409, ApiErrorBody::detail("in use"));
        let result = state.finish_delete(ticket, Err(in_use));
        assert!(result.is_err());
        assert_eq!(state.rows(), rows(5).as_slice());
        assert!(!state.is_deleting(&target));
        assert_eq!(state.deleting_count(), 0);
        // Row is usable again
        assert!(state.request_delete(target).is_ok());
    }

    #[test]
    fn test_cancel_delete_has_no_effect() {
        let mut state = loaded(3);
        let target = state.rows()[1].clone();
        state.request_delete(target).unwrap();
        state.cancel_delete();
        assert!(state.pending_delete().is_none());
        assert!(state.begin_delete().unwrap().is_none());
        assert_eq!(state.rows().len(), 3);
    }

    #[test]
    fn test_missing_identity_is_reported() {
        let options = TableOptions::default().id_field("uuid");
        let mut state = DataTableState::new(columns(), options);
        let err = state.request_delete(rows(1).remove(0)).unwrap_err();
        assert!(matches!(err, Error::MissingIdentity { ref field } if field == "uuid"));
    }

    #[test]
    fn test_surfaces() {
        let mut state = loaded(2);
        let row = state.rows()[0].clone();
        state.request_edit(row.clone());
        assert!(matches!(state.surface(), Surface::Edit(r) if *r == row));
        state.request_create();
        assert!(matches!(state.surface(), Surface::Create(d) if d.is_empty()));
        state.close_surface();
        assert!(matches!(state.surface(), Surface::Closed));
    }

    #[test]
    fn test_destroy_suppresses_results() {
        let mut state = DataTableState::new(columns(), TableOptions::default());
        let ticket = state.begin_load();
        state.destroy();
        assert!(!state.finish_load(ticket, Ok(rows(3))));
        assert!(state.rows().is_empty());
    }
}
