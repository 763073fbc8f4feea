//! DataTable - async driver for [`DataTableState`]
//!
//! The controller is a cheap clone over shared single-threaded state. Each
//! operation borrows the state only between awaits, so any number of loads
//! and deletes may be pending at once; the state's tickets decide which
//! completions still count.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::info;

use super::column::Column;
use super::row::TableRow;
use super::source::TableSource;
use super::state::{DataTableState, TableOptions};
use crate::error::{Error, Result};
use crate::fetch::Draft;

/// A loaded, filterable, paginated table bound to its data callbacks
pub struct DataTable<R: TableRow> {
    state: Rc<RefCell<DataTableState<R>>>,
    source: Rc<TableSource<R>>,
}

impl<R: TableRow> Clone for DataTable<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            source: self.source.clone(),
        }
    }
}

impl<R: TableRow> DataTable<R> {
    /// Create the table. Nothing is fetched until [`load`](Self::load) runs.
    pub fn new(columns: Vec<Column<R>>, options: TableOptions, source: TableSource<R>) -> Self {
        Self {
            state: Rc::new(RefCell::new(DataTableState::new(columns, options))),
            source: Rc::new(source),
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> Ref<'_, DataTableState<R>> {
        self.state.borrow()
    }

    /// Apply a synchronous change (search, aux filter, paging, surfaces)
    pub fn update<T>(&self, f: impl FnOnce(&mut DataTableState<R>) -> T) -> T {
        f(&mut self.state.borrow_mut())
    }

    pub fn source(&self) -> &TableSource<R> {
        &self.source
    }

    /// Fetch the full collection. Returns whether this result was applied.
    pub async fn load(&self) -> bool {
        if self.state.borrow().is_destroyed() {
            return false;
        }
        let ticket = self.state.borrow_mut().begin_load();
        let result = (self.source.fetch)().await;
        self.state.borrow_mut().finish_load(ticket, result)
    }

    /// Same as [`load`](Self::load); bound to the refresh button
    pub async fn refresh(&self) -> bool {
        self.load().await
    }

    /// Stage a row for the delete confirmation dialog
    pub fn request_delete(&self, row: R) -> Result<()> {
        if !self.source.can_delete() {
            return Err(Error::Unsupported {
                operation: "delete".to_string(),
            });
        }
        self.state.borrow_mut().request_delete(row)
    }

    pub fn cancel_delete(&self) {
        self.state.borrow_mut().cancel_delete();
    }

    /// Run the staged delete. The row is removed locally on success; on
    /// failure the collection is untouched and the error is returned.
    pub async fn confirm_delete(&self) -> Result<()> {
        let Some(delete) = self.source.delete.clone() else {
            self.state.borrow_mut().cancel_delete();
            return Err(Error::Unsupported {
                operation: "delete".to_string(),
            });
        };
        let Some(ticket) = self.state.borrow_mut().begin_delete()? else {
            return Ok(());
        };
        let result = delete(ticket.row.clone()).await;
        self.state.borrow_mut().finish_delete(ticket, result)
    }

    /// Open the edit surface for `row`
    pub fn request_edit(&self, row: R) -> Result<()> {
        if !self.source.can_update() {
            return Err(Error::Unsupported {
                operation: "update".to_string(),
            });
        }
        self.state.borrow_mut().request_edit(row);
        Ok(())
    }

    /// Open the create surface
    pub fn request_create(&self) -> Result<()> {
        if !self.source.can_create() {
            return Err(Error::Unsupported {
                operation: "create".to_string(),
            });
        }
        self.state.borrow_mut().request_create();
        Ok(())
    }

    /// Close the edit/create surface without saving
    pub fn cancel_surface(&self) {
        self.state.borrow_mut().close_surface();
    }

    /// Save an edited row, close the surface and reload
    pub async fn submit_edit(&self, row: R) -> Result<()> {
        let update = self.source.update.clone().ok_or_else(|| Error::Unsupported {
            operation: "update".to_string(),
        })?;
        update(row).await?;
        if self.state.borrow().is_destroyed() {
            return Ok(());
        }
        info!("Record updated, reloading table");
        self.state.borrow_mut().close_surface();
        self.load().await;
        Ok(())
    }

    /// Create a record, close the surface and reload
    pub async fn submit_create(&self, draft: Draft) -> Result<()> {
        let create = self.source.create.clone().ok_or_else(|| Error::Unsupported {
            operation: "create".to_string(),
        })?;
        create(draft).await?;
        if self.state.borrow().is_destroyed() {
            return Ok(());
        }
        info!("Record created, reloading table");
        self.state.borrow_mut().close_surface();
        self.load().await;
        Ok(())
    }

    /// Stop applying results of work still in flight
    pub fn destroy(&self) {
        self.state.borrow_mut().destroy();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    use super::*;
    use crate::error::ApiErrorBody;
    use crate::fetch::{fetcher, mutation};
    use crate::table::TableBody;

    #[derive(Debug, Clone, PartialEq)]
    struct Scenario {
        id: i64,
        nombre: String,
    }

    crate::table_row!(Scenario { id, nombre });

    fn scenarios(names: &[&str]) -> Vec<Scenario> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Scenario {
                id: i as i64 + 1,
                nombre: n.to_string(),
            })
            .collect()
    }

    /// Hands out one pending response per call, resolved by the test
    struct Gate<T> {
        pending: Arc<Mutex<VecDeque<oneshot::Receiver<Result<T>>>>>,
        calls: Arc<AtomicUsize>,
    }

    impl<T> Clone for Gate<T> {
        fn clone(&self) -> Self {
            Self {
                pending: self.pending.clone(),
                calls: self.calls.clone(),
            }
        }
    }

    impl<T: Send + 'static> Gate<T> {
        fn new() -> Self {
            Self {
                pending: Arc::new(Mutex::new(VecDeque::new())),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn push(&self) -> oneshot::Sender<Result<T>> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().unwrap().push_back(rx);
            tx
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn next(&self) -> Result<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rx = self.pending.lock().unwrap().pop_front();
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| {
                    Err(Error::Invalid {
                        message: "dropped".to_string(),
                    })
                }),
                None => Err(Error::Invalid {
                    message: "unexpected call".to_string(),
                }),
            }
        }
    }

    struct Harness {
        table: DataTable<Scenario>,
        fetches: Gate<Vec<Scenario>>,
        deletes: Gate<()>,
        updates: Gate<()>,
    }

    fn harness() -> Harness {
        let fetches = Gate::new();
        let deletes = Gate::new();
        let updates = Gate::new();

        let f = fetches.clone();
        let d = deletes.clone();
        let u = updates.clone();
        let source = TableSource::new(fetcher(move || {
            let f = f.clone();
            async move { f.next().await }
        }))
        .on_delete(mutation(move |_row: Scenario| {
            let d = d.clone();
            async move { d.next().await }
        }))
        .on_update(mutation(move |_row: Scenario| {
            let u = u.clone();
            async move { u.next().await }
        }));

        let columns = vec![Column::new("id", "ID"), Column::new("nombre", "Nombre")];
        Harness {
            table: DataTable::new(columns, TableOptions::default(), source),
            fetches,
            deletes,
            updates,
        }
    }

    fn spawn_load(pool: &LocalPool, table: &DataTable<Scenario>) {
        let table = table.clone();
        pool.spawner()
            .spawn_local(async move {
                table.load().await;
            })
            .unwrap();
    }

    fn spawn_delete(
        pool: &LocalPool,
        table: &DataTable<Scenario>,
    ) -> Rc<RefCell<Option<Result<()>>>> {
        let out = Rc::new(RefCell::new(None));
        let slot = out.clone();
        let table = table.clone();
        pool.spawner()
            .spawn_local(async move {
                let result = table.confirm_delete().await;
                *slot.borrow_mut() = Some(result);
            })
            .unwrap();
        out
    }

    fn names(table: &DataTable<Scenario>) -> Vec<String> {
        table.state().rows().iter().map(|r| r.nombre.clone()).collect()
    }

    #[test]
    fn test_initial_state_before_load() {
        let h = harness();
        let state = h.table.state();
        assert!(!state.is_loading());
        assert!(state.rows().is_empty());
        assert_eq!(state.error(), None);
        assert_eq!(h.fetches.calls(), 0);
    }

    #[test]
    fn test_load_populates_rows() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        assert!(h.table.state().is_loading());

        tx.send(Ok(scenarios(&["Inicial", "Final"]))).unwrap();
        pool.run_until_stalled();
        assert!(!h.table.state().is_loading());
        assert_eq!(names(&h.table), vec!["Inicial", "Final"]);
    }

    #[test]
    fn test_latest_load_wins_when_earlier_resolves_last() {
        let mut pool = LocalPool::new();
        let h = harness();
        let first = h.fetches.push();
        let second = h.fetches.push();
        spawn_load(&pool, &h.table);
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        assert_eq!(h.fetches.calls(), 2);

        second.send(Ok(scenarios(&["B"]))).unwrap();
        pool.run_until_stalled();
        assert_eq!(names(&h.table), vec!["B"]);
        assert!(!h.table.state().is_loading());

        first.send(Ok(scenarios(&["A1", "A2"]))).unwrap();
        pool.run_until_stalled();
        assert_eq!(names(&h.table), vec!["B"]);
    }

    #[test]
    fn test_repeated_load_is_idempotent() {
        let mut pool = LocalPool::new();
        let h = harness();
        for _ in 0..2 {
            let tx = h.fetches.push();
            spawn_load(&pool, &h.table);
            pool.run_until_stalled();
            tx.send(Ok(scenarios(&["X", "Y"]))).unwrap();
            pool.run_until_stalled();
        }
        assert_eq!(names(&h.table), vec!["X", "Y"]);
        assert_eq!(h.table.state().current_page(), 1);
    }

    #[test]
    fn test_failed_load_surfaces_detail() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        tx.send(Err(Error::api(504, ApiErrorBody::detail("timeout"))))
            .unwrap();
        pool.run_until_stalled();

        let state = h.table.state();
        assert_eq!(state.error(), Some("timeout"));
        assert!(state.rows().is_empty());
        assert!(!state.is_loading());
        assert!(matches!(state.body(), TableBody::Failed));
    }

    #[test]
    fn test_unmatched_search_shows_no_records() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        tx.send(Ok(scenarios(&["Alpha", "Beta"]))).unwrap();
        pool.run_until_stalled();

        h.table.update(|s| s.set_search_term("xyz"));
        assert!(matches!(h.table.state().body(), TableBody::NoRecords));
        h.table.update(|s| s.set_search_term("ALP"));
        assert!(matches!(h.table.state().body(), TableBody::Rows(ref r) if r.len() == 1));
    }

    #[test]
    fn test_delete_removes_row_after_success() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        tx.send(Ok(scenarios(&["A", "B", "C"]))).unwrap();
        pool.run_until_stalled();

        let target = h.table.state().rows()[1].clone();
        h.table.request_delete(target.clone()).unwrap();
        let done = h.deletes.push();
        let result = spawn_delete(&pool, &h.table);
        pool.run_until_stalled();
        assert!(h.table.state().is_deleting(&target));
        assert_eq!(names(&h.table), vec!["A", "B", "C"]);

        done.send(Ok(())).unwrap();
        pool.run_until_stalled();
        assert!(matches!(*result.borrow(), Some(Ok(()))));
        assert_eq!(names(&h.table), vec!["A", "C"]);
        assert!(!h.table.state().is_deleting(&target));
        // Delete reconciles locally, no refetch
        assert_eq!(h.fetches.calls(), 1);
    }

    #[test]
    fn test_deleting_last_row_of_last_page_clamps_page() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        let labels: Vec<String> = (1..=21).map(|i| format!("S{i}")).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        tx.send(Ok(scenarios(&refs))).unwrap();
        pool.run_until_stalled();

        h.table.update(|s| {
            s.next_page();
            s.next_page();
        });
        assert_eq!(h.table.state().current_page(), 3);

        let last = h.table.state().rows()[20].clone();
        h.table.request_delete(last).unwrap();
        let done = h.deletes.push();
        spawn_delete(&pool, &h.table);
        pool.run_until_stalled();
        done.send(Ok(())).unwrap();
        pool.run_until_stalled();

        let info = h.table.state().page_info();
        assert_eq!((info.current, info.total_pages), (2, 2));
        assert_eq!(h.table.state().page_rows().len(), 10);
    }

    #[test]
    fn test_concurrent_deletes_track_rows_independently() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        tx.send(Ok(scenarios(&["A", "B", "C"]))).unwrap();
        pool.run_until_stalled();

        let a = h.table.state().rows()[0].clone();
        let c = h.table.state().rows()[2].clone();

        h.table.request_delete(a.clone()).unwrap();
        let done_a = h.deletes.push();
        let result_a = spawn_delete(&pool, &h.table);
        pool.run_until_stalled();

        h.table.request_delete(c.clone()).unwrap();
        let done_c = h.deletes.push();
        let result_c = spawn_delete(&pool, &h.table);
        pool.run_until_stalled();

        assert_eq!(h.table.state().deleting_count(), 2);
        assert!(matches!(
            h.table.request_delete(a.clone()),
            Err(Error::DeleteInFlight { .. })
        ));

        done_c.send(Ok(())).unwrap();
        pool.run_until_stalled();
        assert!(h.table.state().is_deleting(&a));
        assert!(!h.table.state().is_deleting(&c));

        done_a
            .send(Err(Error::api(409, ApiErrorBody::detail("in use"))))
            .unwrap();
        pool.run_until_stalled();

        assert!(matches!(*result_c.borrow(), Some(Ok(()))));
        assert!(matches!(*result_a.borrow(), Some(Err(Error::Api { status: 409, .. }))));
        assert_eq!(names(&h.table), vec!["A", "B"]);
        assert_eq!(h.table.state().deleting_count(), 0);
    }

    #[test]
    fn test_edit_triggers_reload() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        tx.send(Ok(scenarios(&["Old"]))).unwrap();
        pool.run_until_stalled();

        let mut row = h.table.state().rows()[0].clone();
        h.table.request_edit(row.clone()).unwrap();
        row.nombre = "New".to_string();

        let saved = h.updates.push();
        let reloaded = h.fetches.push();
        let table = h.table.clone();
        pool.spawner()
            .spawn_local(async move {
                table.submit_edit(row).await.unwrap();
            })
            .unwrap();
        pool.run_until_stalled();

        saved.send(Ok(())).unwrap();
        pool.run_until_stalled();
        assert_eq!(h.fetches.calls(), 2);
        assert!(matches!(h.table.state().surface(), crate::table::Surface::Closed));

        reloaded.send(Ok(scenarios(&["New"]))).unwrap();
        pool.run_until_stalled();
        assert_eq!(names(&h.table), vec!["New"]);
        assert_eq!(h.updates.calls(), 1);
    }

    #[test]
    fn test_missing_callbacks_are_unsupported() {
        let source = TableSource::new(fetcher(|| async { Ok(Vec::<Scenario>::new()) }));
        assert!(!source.has_row_actions());
        let table = DataTable::new(Vec::new(), TableOptions::default(), source);
        let row = Scenario {
            id: 1,
            nombre: "A".to_string(),
        };
        assert!(matches!(
            table.request_delete(row.clone()),
            Err(Error::Unsupported { .. })
        ));
        assert!(table.request_edit(row).is_err());
        assert!(table.request_create().is_err());
    }

    #[test]
    fn test_destroy_suppresses_pending_load() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();

        h.table.destroy();
        tx.send(Ok(scenarios(&["Late"]))).unwrap();
        pool.run_until_stalled();
        assert!(h.table.state().rows().is_empty());
        assert!(!h.table.state().is_loading());
    }

    #[test]
    fn test_destroy_suppresses_late_delete_and_edit() {
        let mut pool = LocalPool::new();
        let h = harness();
        let tx = h.fetches.push();
        spawn_load(&pool, &h.table);
        pool.run_until_stalled();
        tx.send(Ok(scenarios(&["A", "B"]))).unwrap();
        pool.run_until_stalled();

        let a = h.table.state().rows()[0].clone();
        h.table.request_delete(a).unwrap();
        let deleted = h.deletes.push();
        spawn_delete(&pool, &h.table);

        let b = h.table.state().rows()[1].clone();
        h.table.request_edit(b.clone()).unwrap();
        let saved = h.updates.push();
        let table = h.table.clone();
        pool.spawner()
            .spawn_local(async move {
                table.submit_edit(b).await.unwrap();
            })
            .unwrap();
        pool.run_until_stalled();

        h.table.destroy();
        deleted.send(Ok(())).unwrap();
        saved.send(Ok(())).unwrap();
        pool.run_until_stalled();

        assert_eq!(names(&h.table), vec!["A", "B"]);
        assert!(matches!(h.table.state().surface(), crate::table::Surface::Edit(_)));
        assert_eq!(h.fetches.calls(), 1);
    }
}
