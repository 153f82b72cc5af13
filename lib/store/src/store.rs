use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use openhr_client::ResourceApi;
use openhr_core::validate::summarize;
use openhr_core::{AccessGuard, ClientError, Draft, Filter, ListParams, Pagination, Resource};

use crate::context::PermissionContext;
use crate::notify::Notifier;

struct CollectionState<R> {
    records: Vec<R>,
    filtered: Vec<R>,
    filter: Filter,
    params: ListParams,
    pagination: Option<Pagination>,
    loaded: bool,
}

impl<R> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            filter: Filter::default(),
            params: ListParams::default(),
            pagination: None,
            loaded: false,
        }
    }
}

/// Holds the fetched collection for one resource type, its filtered
/// view, and the mutation entry points.
///
/// The collection is owned exclusively by this store: nothing mutates it
/// except `load`, and every successful mutation resynchronizes by
/// re-fetching rather than patching locally (confirmed-then-refetch; no
/// optimistic updates, no conflict detection — last writer wins at the
/// API).
pub struct ResourceStore<R: Resource> {
    api: Arc<dyn ResourceApi>,
    permissions: Arc<PermissionContext>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<CollectionState<R>>,
    pending: AtomicBool,
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(
        api: Arc<dyn ResourceApi>,
        permissions: Arc<PermissionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            permissions,
            notifier,
            state: RwLock::new(CollectionState::default()),
            pending: AtomicBool::new(false),
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Per-action decisions for this resource's module; `None` while the
    /// permission context is still resolving.
    pub fn guard(&self) -> Option<AccessGuard> {
        self.permissions.guard(R::MODULE)
    }

    /// Guard for action checks: an unresolved context denies everything.
    fn resolved_guard(&self) -> AccessGuard {
        self.guard().unwrap_or_default()
    }

    // ── Collection access ───────────────────────────────────────────

    /// True once a load has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.state.read().unwrap().loaded
    }

    /// True while a create/update/delete is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn records(&self) -> Vec<R> {
        self.state.read().unwrap().records.clone()
    }

    /// The filtered subsequence — always a subset of `records()`.
    pub fn filtered(&self) -> Vec<R> {
        self.state.read().unwrap().filtered.clone()
    }

    pub fn filter(&self) -> Filter {
        self.state.read().unwrap().filter.clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.read().unwrap().pagination.clone()
    }

    pub fn find(&self, id: &str) -> Option<R> {
        self.state
            .read()
            .unwrap()
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// Replace the filter and synchronously recompute the filtered view.
    pub fn apply_filters(&self, filter: Filter) {
        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;
        state.filtered = filter.apply(&state.records);
        state.filter = filter;
    }

    /// Change pagination for subsequent loads.
    pub fn set_page(&self, page: usize, per_page: usize) {
        let mut state = self.state.write().unwrap();
        state.params.page = page;
        state.params.per_page = per_page;
    }

    // ── Load ────────────────────────────────────────────────────────

    /// Fetch the collection. Read-gated: a denied (or unresolved)
    /// permission context means no request is issued at all. On failure
    /// the previous collection stays in place — the user keeps whatever
    /// they were looking at.
    pub async fn load(&self) -> Result<(), ClientError> {
        let guard = self.resolved_guard();
        if !guard.can_read {
            return Err(ClientError::PermissionDenied(format!(
                "You do not have access to {}.",
                R::PLURAL
            )));
        }

        let params = self.state.read().unwrap().params.clone();
        let payload = match self.api.list(&R::collection_path(), &params).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(resource = R::ENDPOINT, error = %err, "load failed");
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        };

        let pagination = payload.pagination().cloned();
        let records = match decode_records::<R>(payload.into_items()) {
            Ok(records) => records,
            Err(err) => {
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        };

        let mut guard = self.state.write().unwrap();
        let state = &mut *guard;
        state.filtered = state.filter.apply(&records);
        state.records = records;
        state.pagination = pagination;
        state.loaded = true;
        Ok(())
    }

    /// Fetch one record fresh from the API (edit dialogs seed from this,
    /// never from the possibly-stale collection copy).
    pub async fn get(&self, id: &str) -> Result<R, ClientError> {
        let guard = self.resolved_guard();
        if !guard.can_read {
            return Err(ClientError::PermissionDenied(format!(
                "You do not have access to {}.",
                R::PLURAL
            )));
        }
        let value = self.api.get(&R::record_path(id)).await?;
        serde_json::from_value(value).map_err(|e| {
            ClientError::Network(format!("malformed {} record: {}", R::SINGULAR, e))
        })
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Create a record from a validated draft, then re-fetch.
    pub async fn create(&self, draft: &R::Draft) -> Result<(), ClientError> {
        let errors = draft.validate();
        if !errors.is_empty() {
            // Field-scoped; surfaced inline by the dialog, not as a
            // notification. Never reaches the network.
            return Err(ClientError::Validation(summarize(&errors)));
        }

        let guard = self.resolved_guard();
        if !guard.can_write {
            return Err(self.notify_err(ClientError::PermissionDenied(format!(
                "You do not have permission to create {}.",
                R::PLURAL
            ))));
        }

        let body = draft_body::<R>(draft)?;
        let _pending = self.begin_pending()?;
        let result = self.api.create(&R::collection_path(), body).await;
        drop(_pending);

        match result {
            Ok(_) => {
                self.notifier.success(&format!("{} created.", R::SINGULAR));
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(err) => Err(self.notify_err(err)),
        }
    }

    /// Update a record from a validated draft, then re-fetch.
    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<(), ClientError> {
        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(ClientError::Validation(summarize(&errors)));
        }

        if let Some(reason) = self.protected_reason(id) {
            return Err(self.notify_err(ClientError::Protected(reason)));
        }

        let guard = self.resolved_guard();
        if !guard.can_update {
            return Err(self.notify_err(ClientError::PermissionDenied(format!(
                "You do not have permission to update {}.",
                R::PLURAL
            ))));
        }

        let body = draft_body::<R>(draft)?;
        let _pending = self.begin_pending()?;
        let result = self.api.update(&R::record_path(id), body).await;
        drop(_pending);

        match result {
            Ok(_) => {
                self.notifier.success(&format!("{} updated.", R::SINGULAR));
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(err) => Err(self.notify_err(err)),
        }
    }

    /// Delete a record, then re-fetch. Callers must have confirmed with
    /// the user first — this method trusts that the confirmation step
    /// already happened.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        if let Some(reason) = self.protected_reason(id) {
            return Err(self.notify_err(ClientError::Protected(reason)));
        }

        let guard = self.resolved_guard();
        if !guard.can_delete {
            return Err(self.notify_err(ClientError::PermissionDenied(format!(
                "You do not have permission to delete {}.",
                R::PLURAL
            ))));
        }

        let _pending = self.begin_pending()?;
        let result = self.api.delete(&R::record_path(id)).await;
        drop(_pending);

        match result {
            Ok(()) => {
                self.notifier.success(&format!("{} deleted.", R::SINGULAR));
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(err) => Err(self.notify_err(err)),
        }
    }

    // ── Internals ───────────────────────────────────────────────────

    /// Client-side shortcut only — the backend remains the authority on
    /// protected records.
    fn protected_reason(&self, id: &str) -> Option<String> {
        self.find(id).and_then(|record| record.protected())
    }

    fn notify_err(&self, err: ClientError) -> ClientError {
        self.notifier.error(&err.to_string());
        err
    }

    /// Flip the pending flag for the duration of one mutation. A second
    /// mutation while one is in flight is rejected locally.
    fn begin_pending(&self) -> Result<PendingGuard<'_>, ClientError> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ClientError::Pending(
                "another operation is already in progress".into(),
            ));
        }
        Ok(PendingGuard { flag: &self.pending })
    }

    /// The one refetch after a confirmed mutation. A reload failure is
    /// already notified by `load`; the mutation itself still succeeded.
    async fn reload_after_mutation(&self) {
        if let Err(err) = self.load().await {
            tracing::warn!(resource = R::ENDPOINT, error = %err, "reload after mutation failed");
        }
    }
}

struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn decode_records<R: Resource>(items: Vec<serde_json::Value>) -> Result<Vec<R>, ClientError> {
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|e| {
                ClientError::Network(format!("malformed {} record: {}", R::SINGULAR, e))
            })
        })
        .collect()
}

fn draft_body<R: Resource>(draft: &R::Draft) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(draft.normalized())
        .map_err(|e| ClientError::Network(format!("unserializable {} draft: {}", R::SINGULAR, e)))
}
