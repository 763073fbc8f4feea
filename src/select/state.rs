//! DynamicSelectState - option cache, selection and load bookkeeping

use std::cmp::Ordering;
use std::rc::Rc;

use tracing::{debug, warn};

use super::value::{SelectValue, Selection};
use crate::error::{Error, Result};
use crate::i18n::{Locale, tr};
use crate::table::LoadTicket;

pub type ValueFn<T, V> = Rc<dyn Fn(&T) -> V>;
pub type LabelFn<T> = Rc<dyn Fn(&T) -> String>;
pub type FilterFn<T> = Rc<dyn Fn(&T) -> bool>;
pub type SortFn<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Presentation options of a select
#[derive(Debug, Clone)]
pub struct SelectOptions {
    pub label: String,
    pub placeholder: String,
    pub disabled: bool,
    /// Show the load error under the control
    pub show_error: bool,
    pub load_error_fallback: String,
}

impl SelectOptions {
    pub fn localized(locale: Locale) -> Self {
        Self {
            label: tr(locale, "select.label"),
            placeholder: tr(locale, "select.placeholder"),
            disabled: false,
            show_error: true,
            load_error_fallback: tr(locale, "select.load_error"),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hide_error(mut self) -> Self {
        self.show_error = false;
        self
    }
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self::localized(Locale::default())
    }
}

/// One menu entry
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<V> {
    /// Menu key, see [`Selection::to_key`]
    pub key: String,
    pub value: V,
    pub label: String,
}

/// Outcome of a user choice: the typed value, plus the matched item when
/// the value still maps to a cached option
#[derive(Debug, Clone, PartialEq)]
pub struct SelectChange<T, V> {
    pub value: Selection<V>,
    pub item: Option<T>,
}

/// State of one dynamic select
pub struct DynamicSelectState<T, V> {
    options: SelectOptions,
    value_of: ValueFn<T, V>,
    label_of: LabelFn<T>,
    filter: Option<FilterFn<T>>,
    sort: Option<SortFn<T>>,
    items: Vec<T>,
    selection: Selection<V>,
    loading: bool,
    error: Option<String>,
    load_seq: u64,
    destroyed: bool,
}

impl<T: Clone + 'static, V: SelectValue> DynamicSelectState<T, V> {
    pub fn new(
        options: SelectOptions,
        value_of: impl Fn(&T) -> V + 'static,
        label_of: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            options,
            value_of: Rc::new(value_of),
            label_of: Rc::new(label_of),
            filter: None,
            sort: None,
            items: Vec::new(),
            selection: Selection::Empty,
            loading: false,
            error: None,
            load_seq: 0,
            destroyed: false,
        }
    }

    /// Keep only items passing `filter`
    pub fn with_filter(mut self, filter: impl Fn(&T) -> bool + 'static) -> Self {
        self.filter = Some(Rc::new(filter));
        self
    }

    /// Order items with `sort` (stable, applied after the filter)
    pub fn with_sort(mut self, sort: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.sort = Some(Rc::new(sort));
        self
    }

    pub fn set_filter(&mut self, filter: Option<FilterFn<T>>) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: Option<SortFn<T>>) {
        self.sort = sort;
    }

    pub fn options(&self) -> &SelectOptions {
        &self.options
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selection(&self) -> &Selection<V> {
        &self.selection
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Error text to render, honouring `show_error`
    pub fn visible_error(&self) -> Option<&str> {
        if self.options.show_error {
            self.error()
        } else {
            None
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Disabled by configuration or while options are loading
    pub fn is_disabled(&self) -> bool {
        self.options.disabled || self.loading
    }

    // ==================== Loading ====================

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_seq += 1;
        self.loading = true;
        self.error = None;
        LoadTicket::new(self.load_seq)
    }

    /// Apply a fetch result: filter, then sort, then replace the cache
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<T>>) -> bool {
        if self.destroyed || ticket.seq() != self.load_seq {
            debug!(seq = ticket.seq(), latest = self.load_seq, "Discarding select options");
            return false;
        }

        match result {
            Ok(items) => {
                let mut items: Vec<T> = match &self.filter {
                    Some(filter) => items.into_iter().filter(|item| filter(item)).collect(),
                    None => items,
                };
                if let Some(sort) = &self.sort {
                    items.sort_by(|a, b| sort(a, b));
                }
                debug!(count = items.len(), label = %self.options.label, "Select options loaded");
                self.items = items;
            }
            Err(e) => {
                warn!(error = %e, label = %self.options.label, "Select options failed to load");
                self.error = Some(e.user_message(&self.options.load_error_fallback));
                self.items.clear();
            }
        }
        self.loading = false;
        true
    }

    // ==================== Options ====================

    /// Menu entries in cache order
    pub fn option_list(&self) -> Vec<SelectOption<V>> {
        self.items
            .iter()
            .map(|item| {
                let value = (self.value_of)(item);
                SelectOption {
                    key: Selection::Value(value.clone()).to_key(),
                    value,
                    label: (self.label_of)(item),
                }
            })
            .collect()
    }

    /// Cached item whose value equals `value`
    pub fn item_for(&self, value: &V) -> Option<&T> {
        self.items.iter().find(|item| &(self.value_of)(*item) == value)
    }

    /// Label of the current selection, or the placeholder
    pub fn display_label(&self) -> String {
        self.selection
            .value()
            .and_then(|v| self.item_for(v))
            .map(|item| (self.label_of)(item))
            .unwrap_or_else(|| self.options.placeholder.clone())
    }

    // ==================== Selection ====================

    /// Store `selection` and report what the value and item channels receive
    pub fn choose(&mut self, selection: Selection<V>) -> SelectChange<T, V> {
        let item = selection.value().and_then(|v| self.item_for(v)).cloned();
        self.selection = selection.clone();
        SelectChange {
            value: selection,
            item,
        }
    }

    /// Choose by menu key
    pub fn choose_key(&mut self, key: &str) -> Result<SelectChange<T, V>> {
        let selection = Selection::from_key(key).ok_or_else(|| Error::Invalid {
            message: format!("unknown option key '{key}'"),
        })?;
        Ok(self.choose(selection))
    }

    /// Reflect an owner-controlled value without emitting anything
    pub fn set_selection(&mut self, selection: Selection<V>) {
        self.selection = selection;
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.loading = false;
    }
}
