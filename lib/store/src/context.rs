use std::sync::{Arc, RwLock};
use std::time::Duration;

use openhr_client::PermissionsApi;
use openhr_core::{AccessGuard, PermissionSet, Scope};

/// Default cadence for re-resolving the permission set.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

enum ContextState {
    /// Resolution has not completed yet. Dependent UI renders a neutral
    /// loading state — never a denied or allowed flash.
    Resolving,
    Ready(Arc<PermissionSet>),
}

/// The current actor's resolved permissions for one portal scope.
///
/// Built once per authenticated session, refreshed on an explicit timer,
/// and read as a snapshot by every store and view. Resolution failure is
/// indistinguishable from "no permissions" — the context fails closed
/// rather than surfacing a retryable error.
pub struct PermissionContext {
    api: Arc<dyn PermissionsApi>,
    scope: Scope,
    state: RwLock<ContextState>,
}

impl PermissionContext {
    pub fn new(api: Arc<dyn PermissionsApi>, scope: Scope) -> Arc<Self> {
        Arc::new(Self {
            api,
            scope,
            state: RwLock::new(ContextState::Resolving),
        })
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Resolve (or re-resolve) the permission set from the API.
    pub async fn resolve(&self) {
        let set = match self.api.my_permissions(self.scope).await {
            Ok(grants) => PermissionSet::from_grants(grants),
            Err(err) => {
                tracing::warn!(error = %err, "permission resolution failed, denying all");
                PermissionSet::deny_all()
            }
        };
        *self.state.write().unwrap() = ContextState::Ready(Arc::new(set));
    }

    /// True once the first resolution has completed (granted or not).
    pub fn is_resolved(&self) -> bool {
        matches!(*self.state.read().unwrap(), ContextState::Ready(_))
    }

    /// Snapshot of the resolved set; `None` while still resolving.
    pub fn snapshot(&self) -> Option<Arc<PermissionSet>> {
        match &*self.state.read().unwrap() {
            ContextState::Resolving => None,
            ContextState::Ready(set) => Some(Arc::clone(set)),
        }
    }

    /// Per-action decisions for one module; `None` while still resolving.
    pub fn guard(&self, module: &str) -> Option<AccessGuard> {
        self.snapshot().map(|set| set.guard(module))
    }

    /// Resolve now, then keep re-resolving every `every` until the
    /// returned handle is aborted or dropped by the caller.
    pub fn spawn_refresh(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let ctx = Arc::clone(self);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                // First tick fires immediately: initial resolution and
                // the refresh loop share this task.
                tick.tick().await;
                ctx.resolve().await;
            }
        })
    }
}
