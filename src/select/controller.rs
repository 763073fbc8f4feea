//! DynamicSelect - async driver for [`DynamicSelectState`]
//!
//! Refetches on mount and whenever its fetcher, filter or sort changes.
//! The value and item channels are independent callbacks fired after the
//! state borrow is released, so a callback may read the select it came from.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::state::{DynamicSelectState, FilterFn, SelectChange, SortFn};
use super::value::{SelectValue, Selection};
use crate::error::Result;
use crate::fetch::Fetcher;

type ValueCallback<V> = Rc<dyn Fn(&Selection<V>)>;
type ItemCallback<T> = Rc<dyn Fn(&T)>;

/// A select whose options come from a remote collection
pub struct DynamicSelect<T, V> {
    state: Rc<RefCell<DynamicSelectState<T, V>>>,
    fetch: Rc<RefCell<Fetcher<T>>>,
    on_change: Option<ValueCallback<V>>,
    on_item_change: Option<ItemCallback<T>>,
}

impl<T, V> Clone for DynamicSelect<T, V> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            fetch: self.fetch.clone(),
            on_change: self.on_change.clone(),
            on_item_change: self.on_item_change.clone(),
        }
    }
}

impl<T: Clone + 'static, V: SelectValue> DynamicSelect<T, V> {
    pub fn new(fetch: Fetcher<T>, state: DynamicSelectState<T, V>) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            fetch: Rc::new(RefCell::new(fetch)),
            on_change: None,
            on_item_change: None,
        }
    }

    /// Value channel: receives the typed selection
    pub fn on_change(mut self, f: impl Fn(&Selection<V>) + 'static) -> Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    /// Item channel: receives the matched cached item, if any
    pub fn on_item_change(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.on_item_change = Some(Rc::new(f));
        self
    }

    pub fn state(&self) -> Ref<'_, DynamicSelectState<T, V>> {
        self.state.borrow()
    }

    /// Initial fetch
    pub async fn mount(&self) -> bool {
        self.reload().await
    }

    /// Fetch, filter, sort and replace the option cache
    pub async fn reload(&self) -> bool {
        if self.state.borrow().is_destroyed() {
            return false;
        }
        let ticket = self.state.borrow_mut().begin_load();
        let fetch = self.fetch.borrow().clone();
        let result = fetch().await;
        self.state.borrow_mut().finish_load(ticket, result)
    }

    pub async fn set_fetcher(&self, fetch: Fetcher<T>) -> bool {
        *self.fetch.borrow_mut() = fetch;
        self.reload().await
    }

    pub async fn set_filter(&self, filter: Option<FilterFn<T>>) -> bool {
        self.state.borrow_mut().set_filter(filter);
        self.reload().await
    }

    pub async fn set_sort(&self, sort: Option<SortFn<T>>) -> bool {
        self.state.borrow_mut().set_sort(sort);
        self.reload().await
    }

    /// Record a user choice and notify both channels
    pub fn choose(&self, selection: Selection<V>) -> SelectChange<T, V> {
        let change = self.state.borrow_mut().choose(selection);
        self.emit(&change);
        change
    }

    /// Record a user choice by menu key and notify both channels
    pub fn choose_key(&self, key: &str) -> Result<SelectChange<T, V>> {
        let change = self.state.borrow_mut().choose_key(key)?;
        self.emit(&change);
        Ok(change)
    }

    /// Reflect a value set by the owner; no callbacks fire
    pub fn set_selection(&self, selection: Selection<V>) {
        self.state.borrow_mut().set_selection(selection);
    }

    pub fn destroy(&self) {
        self.state.borrow_mut().destroy();
    }

    fn emit(&self, change: &SelectChange<T, V>) {
        if let Some(on_change) = &self.on_change {
            on_change(&change.value);
        }
        if let (Some(on_item_change), Some(item)) = (&self.on_item_change, &change.item) {
            on_item_change(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    use super::*;
    use crate::error::{ApiErrorBody, Error};
    use crate::fetch::fetcher;
    use crate::select::SelectOptions;

    #[derive(Debug, Clone, PartialEq)]
    struct Rule {
        id: i64,
        codigo: String,
        descripcion: String,
    }

    fn rule(id: i64, codigo: &str) -> Rule {
        Rule {
            id,
            codigo: codigo.to_string(),
            descripcion: format!("Regla {codigo}"),
        }
    }

    fn rule_state() -> DynamicSelectState<Rule, i64> {
        DynamicSelectState::new(SelectOptions::default(), |r: &Rule| r.id, |r: &Rule| {
            r.codigo.clone()
        })
    }

    fn static_select(items: Vec<Rule>) -> DynamicSelect<Rule, i64> {
        DynamicSelect::new(
            fetcher(move || {
                let items = items.clone();
                async move { Ok(items) }
            }),
            rule_state(),
        )
    }

    #[test]
    fn test_value_and_item_channels() {
        let mut pool = LocalPool::new();
        let values = Rc::new(RefCell::new(Vec::new()));
        let items = Rc::new(RefCell::new(Vec::new()));
        let (v, i) = (values.clone(), items.clone());
        let select = static_select(vec![rule(1, "RC-1"), rule(2, "RC-2")])
            .on_change(move |sel| v.borrow_mut().push(sel.clone()))
            .on_item_change(move |r: &Rule| i.borrow_mut().push(r.descripcion.clone()));

        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.mount().await;
            })
            .unwrap();
        pool.run_until_stalled();

        select.choose(Selection::Value(2));
        select.choose(Selection::Value(42));
        select.choose_key("").unwrap();

        assert_eq!(
            *values.borrow(),
            vec![Selection::Value(2), Selection::Value(42), Selection::Empty]
        );
        assert_eq!(*items.borrow(), vec!["Regla RC-2".to_string()]);
    }

    #[test]
    fn test_choice_racing_a_refetch_fires_value_only() {
        let mut pool = LocalPool::new();
        let item_calls = Rc::new(Cell::new(0));
        let value_calls = Rc::new(Cell::new(0));

        let (tx1, rx1) = oneshot::channel::<Result<Vec<Rule>>>();
        let (tx2, rx2) = oneshot::channel::<Result<Vec<Rule>>>();
        let receivers = Arc::new(std::sync::Mutex::new(vec![rx2, rx1]));
        let fetch = fetcher(move || {
            let rx = receivers.lock().unwrap().pop();
            async move {
                match rx {
                    Some(rx) => rx.await.unwrap_or_else(|_| Ok(Vec::new())),
                    None => Ok(Vec::new()),
                }
            }
        });

        let (ic, vc) = (item_calls.clone(), value_calls.clone());
        let select = DynamicSelect::new(fetch, rule_state())
            .on_change(move |_| vc.set(vc.get() + 1))
            .on_item_change(move |_| ic.set(ic.get() + 1));

        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.mount().await;
            })
            .unwrap();
        pool.run_until_stalled();
        tx1.send(Ok(vec![rule(5, "RC-5")])).unwrap();
        pool.run_until_stalled();

        // Refetch starts; the cache is replaced only when it resolves
        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.reload().await;
            })
            .unwrap();
        pool.run_until_stalled();
        tx2.send(Ok(vec![rule(6, "RC-6")])).unwrap();
        pool.run_until_stalled();
        let change = select.choose(Selection::Value(5));

        assert_eq!(change.value, Selection::Value(5));
        assert_eq!(change.item, None);
        assert_eq!(value_calls.get(), 1);
        assert_eq!(item_calls.get(), 0);
    }

    #[test]
    fn test_failed_fetch_leaves_placeholder_only() {
        let mut pool = LocalPool::new();
        let select: DynamicSelect<Rule, i64> = DynamicSelect::new(
            fetcher(|| async { Err(Error::api(502, ApiErrorBody::detail("bad gateway"))) }),
            rule_state(),
        );
        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.mount().await;
            })
            .unwrap();
        pool.run_until_stalled();

        let state = select.state();
        assert_eq!(state.error(), Some("bad gateway"));
        assert!(state.option_list().is_empty());
        assert_eq!(state.display_label(), state.options().placeholder);
    }

    #[test]
    fn test_changing_filter_refetches() {
        let mut pool = LocalPool::new();
        let select = static_select(vec![rule(1, "RC-1"), rule(2, "RC-2"), rule(3, "RC-3")]);
        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.mount().await;
                let odd: FilterFn<Rule> = Rc::new(|r: &Rule| r.id % 2 == 1);
                s.set_filter(Some(odd)).await;
            })
            .unwrap();
        pool.run_until_stalled();

        let ids: Vec<i64> = select.state().items().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    /// Static fetcher that counts its calls
    fn counted(items: Vec<Rule>) -> (Fetcher<Rule>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let fetch = fetcher(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let items = items.clone();
            async move { Ok(items) }
        });
        (fetch, calls)
    }

    #[test]
    fn test_changing_sort_refetches() {
        let mut pool = LocalPool::new();
        let (fetch, calls) = counted(vec![rule(2, "RC-B"), rule(1, "RC-C"), rule(3, "RC-A")]);
        let select = DynamicSelect::new(fetch, rule_state());
        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.mount().await;
                let by_code: SortFn<Rule> = Rc::new(|a: &Rule, b: &Rule| a.codigo.cmp(&b.codigo));
                s.set_sort(Some(by_code)).await;
            })
            .unwrap();
        pool.run_until_stalled();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let ids: Vec<i64> = select.state().items().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_new_fetcher_replaces_cache() {
        let mut pool = LocalPool::new();
        let (first, first_calls) = counted(vec![rule(1, "RC-1"), rule(2, "RC-2")]);
        let (second, second_calls) = counted(vec![rule(9, "RC-9")]);
        let select = DynamicSelect::new(first, rule_state());
        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.mount().await;
                s.set_fetcher(second).await;
                s.reload().await;
            })
            .unwrap();
        pool.run_until_stalled();

        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 2);
        let ids: Vec<i64> = select.state().items().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn test_destroy_ignores_late_options() {
        let mut pool = LocalPool::new();
        let (tx, rx) = oneshot::channel::<Result<Vec<Rule>>>();
        let slot = Arc::new(std::sync::Mutex::new(Some(rx)));
        let select = DynamicSelect::new(
            fetcher(move || {
                let rx = slot.lock().unwrap().take();
                async move {
                    match rx {
                        Some(rx) => rx.await.unwrap_or_else(|_| Ok(Vec::new())),
                        None => Ok(Vec::new()),
                    }
                }
            }),
            rule_state(),
        );
        let s = select.clone();
        pool.spawner()
            .spawn_local(async move {
                s.mount().await;
            })
            .unwrap();
        pool.run_until_stalled();
        select.destroy();
        tx.send(Ok(vec![rule(1, "RC-1")])).unwrap();
        pool.run_until_stalled();
        assert!(select.state().items().is_empty());
    }
}
