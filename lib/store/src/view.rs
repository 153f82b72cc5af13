use openhr_core::Resource;

use crate::store::ResourceStore;

/// One renderable row: the record plus its per-action affordances,
/// already gated by the access guard and the record's protected status.
#[derive(Debug, Clone)]
pub struct Row<R> {
    pub record: R,
    pub can_edit: bool,
    pub can_delete: bool,
    /// Why edit/delete are off for this record, when it is protected.
    pub protected: Option<String>,
}

/// What the list view should render right now.
#[derive(Debug, Clone)]
pub enum ListState<R> {
    /// Permissions still resolving — neutral loading state, never a
    /// denied or allowed flash.
    Resolving,
    /// canRead is false; no fetch was or will be attempted.
    AccessDenied,
    /// Readable, but the first load has not completed.
    Loading,
    /// Loaded and the collection is empty.
    Empty,
    /// Loaded, records exist, but none match the current filter.
    NoMatches,
    /// The filtered rows.
    Rows(Vec<Row<R>>),
}

/// Project a store into its current renderable state.
pub fn list_state<R: Resource>(store: &ResourceStore<R>) -> ListState<R> {
    let Some(guard) = store.guard() else {
        return ListState::Resolving;
    };
    if !guard.can_read {
        return ListState::AccessDenied;
    }
    if !store.is_loaded() {
        return ListState::Loading;
    }
    if store.records().is_empty() {
        return ListState::Empty;
    }

    let filtered = store.filtered();
    if filtered.is_empty() {
        return ListState::NoMatches;
    }

    let rows = filtered
        .into_iter()
        .map(|record| {
            let protected = record.protected();
            Row {
                can_edit: guard.can_update && protected.is_none(),
                can_delete: guard.can_delete && protected.is_none(),
                protected,
                record,
            }
        })
        .collect();
    ListState::Rows(rows)
}
