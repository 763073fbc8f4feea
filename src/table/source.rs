//! TableSource - the owner-supplied callbacks behind a table
//!
//! Only `fetch` is required. A missing mutation hides the matching action.

use crate::fetch::{Draft, Fetcher, Mutation};

/// Data callbacks for a [`DataTable`](super::DataTable)
pub struct TableSource<R> {
    pub(crate) fetch: Fetcher<R>,
    pub(crate) create: Option<Mutation<Draft>>,
    pub(crate) update: Option<Mutation<R>>,
    pub(crate) delete: Option<Mutation<R>>,
}

impl<R> TableSource<R> {
    pub fn new(fetch: Fetcher<R>) -> Self {
        Self {
            fetch,
            create: None,
            update: None,
            delete: None,
        }
    }

    /// Enable the "add" action
    pub fn on_create(mut self, create: Mutation<Draft>) -> Self {
        self.create = Some(create);
        self
    }

    /// Enable the per-row edit action
    pub fn on_update(mut self, update: Mutation<R>) -> Self {
        self.update = Some(update);
        self
    }

    /// Enable the per-row delete action
    pub fn on_delete(mut self, delete: Mutation<R>) -> Self {
        self.delete = Some(delete);
        self
    }

    pub fn can_create(&self) -> bool {
        self.create.is_some()
    }

    pub fn can_update(&self) -> bool {
        self.update.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.delete.is_some()
    }

    /// Whether the actions column is shown at all
    pub fn has_row_actions(&self) -> bool {
        self.can_update() || self.can_delete()
    }
}
