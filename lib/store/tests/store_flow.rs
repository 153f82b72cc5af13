//! End-to-end flows for the resource store and dialog controller over an
//! in-memory API double that counts every call.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use openhr_client::{PermissionsApi, ResourceApi};
use openhr_core::{
    Action, ClientError, Column, Draft, FieldRules, Filter, ListParams, ListPayload, ModuleGrant,
    Resource, Scope,
};
use openhr_store::{
    list_state, DialogController, ListState, Notifier, PermissionContext, ResourceStore,
    SubmitOutcome,
};

// ── Test resource ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Department {
    id: String,
    name: String,
    code: String,
    #[serde(default)]
    is_system: bool,
    #[serde(default)]
    is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepartmentDraft {
    name: String,
    code: String,
    is_active: bool,
}

impl Draft for DepartmentDraft {
    fn validate(&self) -> Vec<openhr_core::FieldError> {
        let mut rules = FieldRules::new();
        rules.require("name", &self.name).require("code", &self.code);
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for Department {
    type Draft = DepartmentDraft;
    const MODULE: &'static str = "departments";
    const ENDPOINT: &'static str = "departments";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "Department";
    const PLURAL: &'static str = "departments";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.code.clone()]
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }

    fn protected(&self) -> Option<String> {
        self.is_system
            .then(|| "System departments cannot be modified.".to_string())
    }

    fn draft(&self) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.code.clone()]
    }
}

// ── API double ──────────────────────────────────────────────────────

#[derive(Default)]
struct MockApiState {
    records: Vec<Value>,
    calls: Vec<String>,
    grants: Vec<ModuleGrant>,
    fail_list: bool,
    fail_mutations: bool,
    next_id: usize,
}

#[derive(Default)]
struct MockApi {
    state: Mutex<MockApiState>,
    mutation_delay: Option<Duration>,
}

impl MockApi {
    fn with_grants(actions: Vec<Action>) -> Arc<Self> {
        let api = Arc::new(Self::default());
        api.state.lock().unwrap().grants = vec![ModuleGrant {
            module: "departments".into(),
            actions,
        }];
        api
    }

    fn seed(&self, records: Vec<Value>) {
        self.state.lock().unwrap().records = records;
    }

    fn calls(&self, prefix: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl PermissionsApi for MockApi {
    async fn my_permissions(&self, _scope: Scope) -> Result<Vec<ModuleGrant>, ClientError> {
        Ok(self.state.lock().unwrap().grants.clone())
    }
}

#[async_trait]
impl ResourceApi for MockApi {
    async fn list(
        &self,
        path: &str,
        _params: &ListParams,
    ) -> Result<ListPayload<Value>, ClientError> {
        self.record(format!("LIST {}", path));
        let state = self.state.lock().unwrap();
        if state.fail_list {
            return Err(ClientError::Api("could not load departments".into()));
        }
        Ok(ListPayload::Plain(state.records.clone()))
    }

    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.record(format!("GET {}", path));
        let id = path.rsplit('/').next().unwrap_or_default();
        let state = self.state.lock().unwrap();
        state
            .records
            .iter()
            .find(|r| r["id"] == id)
            .cloned()
            .ok_or_else(|| ClientError::Api(format!("department {} not found", id)))
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.record(format!("POST {}", path));
        if let Some(delay) = self.mutation_delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(ClientError::Api("department code already exists".into()));
        }
        state.next_id += 1;
        let mut record = body;
        record["id"] = json!(format!("d{}", state.next_id));
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.record(format!("PUT {}", path));
        let id = path.rsplit('/').next().unwrap_or_default().to_string();
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(ClientError::Api("department code already exists".into()));
        }
        let Some(slot) = state.records.iter_mut().find(|r| r["id"] == id.as_str()) else {
            return Err(ClientError::Api(format!("department {} not found", id)));
        };
        let mut record = body;
        record["id"] = json!(id);
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.record(format!("DELETE {}", path));
        let id = path.rsplit('/').next().unwrap_or_default().to_string();
        let mut state = self.state.lock().unwrap();
        if state.fail_mutations {
            return Err(ClientError::Api("department is in use".into()));
        }
        state.records.retain(|r| r["id"] != id.as_str());
        Ok(())
    }
}

// ── Notification recorder ───────────────────────────────────────────

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<(&'static str, String)>>,
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.events.lock().unwrap().push(("success", message.into()));
    }

    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(("error", message.into()));
    }
}

impl RecordingNotifier {
    fn errors(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == "error")
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    fn successes(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == "success")
            .map(|(_, msg)| msg.clone())
            .collect()
    }
}

// ── Fixture ─────────────────────────────────────────────────────────

struct Fixture {
    api: Arc<MockApi>,
    notifier: Arc<RecordingNotifier>,
    store: Arc<ResourceStore<Department>>,
}

async fn fixture_with(actions: Vec<Action>) -> Fixture {
    let api = MockApi::with_grants(actions);
    api.seed(vec![
        json!({"id": "d1", "name": "Engineering", "code": "ENG", "isActive": true}),
        json!({"id": "d2", "name": "People Ops", "code": "HR", "isSystem": true, "isActive": true}),
    ]);

    let permissions = PermissionContext::new(
        Arc::clone(&api) as Arc<dyn PermissionsApi>,
        Scope::Org,
    );
    permissions.resolve().await;

    let notifier = Arc::new(RecordingNotifier::default());
    let store = Arc::new(ResourceStore::<Department>::new(
        Arc::clone(&api) as Arc<dyn ResourceApi>,
        permissions,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    ));
    Fixture { api, notifier, store }
}

async fn fixture() -> Fixture {
    fixture_with(vec![Action::Read, Action::Write, Action::Update, Action::Delete]).await
}

// ── Load & filter ───────────────────────────────────────────────────

#[tokio::test]
async fn test_load_populates_collection_and_view() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    assert!(fx.store.is_loaded());
    assert_eq!(fx.store.records().len(), 2);
    assert_eq!(fx.store.filtered().len(), 2);
}

#[tokio::test]
async fn test_load_without_read_permission_issues_no_request() {
    let fx = fixture_with(vec![Action::Write]).await;
    let err = fx.store.load().await.unwrap_err();

    assert!(matches!(err, ClientError::PermissionDenied(_)));
    assert_eq!(fx.api.calls("LIST"), 0);
}

#[tokio::test]
async fn test_unresolved_context_fails_closed() {
    let api = MockApi::with_grants(vec![Action::Read]);
    let permissions = PermissionContext::new(
        Arc::clone(&api) as Arc<dyn PermissionsApi>,
        Scope::Org,
    );
    // Deliberately not resolved.
    let store = ResourceStore::<Department>::new(
        Arc::clone(&api) as Arc<dyn ResourceApi>,
        permissions,
        Arc::new(RecordingNotifier::default()),
    );

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, ClientError::PermissionDenied(_)));
    assert_eq!(api.calls("LIST"), 0);
}

#[tokio::test]
async fn test_load_failure_preserves_previous_collection() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();
    assert_eq!(fx.store.records().len(), 2);

    fx.api.state.lock().unwrap().fail_list = true;
    let err = fx.store.load().await.unwrap_err();

    assert!(matches!(err, ClientError::Api(_)));
    // Previous collection still on screen, plus exactly one notification.
    assert_eq!(fx.store.records().len(), 2);
    assert_eq!(fx.notifier.errors(), vec!["could not load departments"]);
}

#[tokio::test]
async fn test_filters_recompute_on_load() {
    let fx = fixture().await;
    fx.store.apply_filters(Filter::search("eng"));
    fx.store.load().await.unwrap();

    let filtered = fx.store.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Engineering");
}

// ── Mutations through the store ─────────────────────────────────────

#[tokio::test]
async fn test_create_refetches_exactly_once() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();
    assert_eq!(fx.api.calls("LIST"), 1);

    let draft = DepartmentDraft {
        name: "Finance".into(),
        code: "FIN".into(),
        is_active: true,
    };
    fx.store.create(&draft).await.unwrap();

    assert_eq!(fx.api.calls("POST"), 1);
    assert_eq!(fx.api.calls("LIST"), 2);
    assert_eq!(fx.store.records().len(), 3);
    assert_eq!(fx.notifier.successes(), vec!["Department created."]);
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_network() {
    let fx = fixture().await;
    let draft = DepartmentDraft::default();

    let err = fx.store.create(&draft).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(fx.api.calls("POST"), 0);
    assert_eq!(fx.api.calls("LIST"), 0);
}

#[tokio::test]
async fn test_failed_create_leaves_state_unchanged() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();
    fx.api.state.lock().unwrap().fail_mutations = true;

    let draft = DepartmentDraft {
        name: "Finance".into(),
        code: "FIN".into(),
        is_active: true,
    };
    let err = fx.store.create(&draft).await.unwrap_err();

    assert!(matches!(err, ClientError::Api(_)));
    assert_eq!(fx.store.records().len(), 2);
    // No refetch after a failed mutation.
    assert_eq!(fx.api.calls("LIST"), 1);
    assert_eq!(fx.notifier.errors(), vec!["department code already exists"]);
}

#[tokio::test]
async fn test_delete_protected_record_short_circuits() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    // d2 is a system department; invoking the handler directly must
    // still short-circuit before any request.
    let err = fx.store.delete("d2").await.unwrap_err();

    assert!(matches!(err, ClientError::Protected(_)));
    assert_eq!(fx.api.calls("DELETE"), 0);
    assert_eq!(fx.notifier.errors(), vec!["System departments cannot be modified."]);
}

#[tokio::test]
async fn test_update_protected_record_short_circuits() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    let draft = DepartmentDraft {
        name: "Renamed".into(),
        code: "HR2".into(),
        is_active: false,
    };
    let err = fx.store.update("d2", &draft).await.unwrap_err();

    assert!(matches!(err, ClientError::Protected(_)));
    assert_eq!(fx.api.calls("PUT"), 0);
}

#[tokio::test]
async fn test_delete_without_permission_issues_no_request() {
    let fx = fixture_with(vec![Action::Read]).await;
    fx.store.load().await.unwrap();

    let err = fx.store.delete("d1").await.unwrap_err();
    assert!(matches!(err, ClientError::PermissionDenied(_)));
    assert_eq!(fx.api.calls("DELETE"), 0);
}

// ── Dialog flows ────────────────────────────────────────────────────

#[tokio::test]
async fn test_dialog_invalid_submit_stays_open_offline() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    let dialog = DialogController::new(Arc::clone(&fx.store));
    dialog.open_create().unwrap();
    dialog.set_draft(DepartmentDraft::default());

    let outcome = dialog.submit().await;
    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert!(dialog.is_open());
    let errors = dialog.field_errors();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.field == "name"));
    // Nothing was sent.
    assert_eq!(fx.api.calls("POST"), 0);
}

#[tokio::test]
async fn test_dialog_successful_submit_closes_and_clears_draft() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    let dialog = DialogController::new(Arc::clone(&fx.store));
    dialog.open_create().unwrap();
    dialog.set_draft(DepartmentDraft {
        name: "Finance".into(),
        code: "FIN".into(),
        is_active: true,
    });

    let outcome = dialog.submit().await;
    assert_eq!(outcome, SubmitOutcome::Completed);
    assert!(!dialog.is_open());
    assert!(dialog.draft().is_none());
    // Store refetched once after the confirmed create.
    assert_eq!(fx.api.calls("LIST"), 2);
}

#[tokio::test]
async fn test_dialog_failed_submit_keeps_draft_and_message() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();
    fx.api.state.lock().unwrap().fail_mutations = true;

    let dialog = DialogController::new(Arc::clone(&fx.store));
    dialog.open_create().unwrap();
    let draft = DepartmentDraft {
        name: "Finance".into(),
        code: "FIN".into(),
        is_active: true,
    };
    dialog.set_draft(draft.clone());

    let outcome = dialog.submit().await;
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(dialog.is_open());
    assert!(!dialog.is_pending());
    assert_eq!(dialog.draft().unwrap().name, draft.name);
    assert_eq!(
        dialog.error_message().as_deref(),
        Some("department code already exists")
    );
}

#[tokio::test]
async fn test_dialog_cancel_discards_draft() {
    let fx = fixture().await;
    let dialog = DialogController::new(Arc::clone(&fx.store));
    dialog.open_create().unwrap();
    dialog.set_draft(DepartmentDraft {
        name: "Half-typed".into(),
        ..DepartmentDraft::default()
    });

    dialog.cancel();
    assert!(!dialog.is_open());
    assert!(dialog.draft().is_none());
}

#[tokio::test]
async fn test_sequential_edits_seed_from_fresh_state() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    let dialog = DialogController::new(Arc::clone(&fx.store));

    dialog.open_edit("d1").await.unwrap();
    assert_eq!(dialog.draft().unwrap().name, "Engineering");
    dialog.cancel();

    // The record changes server-side between edit sessions.
    {
        let mut state = fx.api.state.lock().unwrap();
        let slot = state
            .records
            .iter_mut()
            .find(|r| r["id"] == "d1")
            .unwrap();
        slot["name"] = json!("Platform Engineering");
    }

    dialog.open_edit("d1").await.unwrap();
    // Fresh fetch, no stale draft carry-over.
    assert_eq!(dialog.draft().unwrap().name, "Platform Engineering");
    assert_eq!(fx.api.calls("GET"), 2);
}

#[tokio::test]
async fn test_open_edit_refuses_protected_record() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    let dialog = DialogController::new(Arc::clone(&fx.store));
    let err = dialog.open_edit("d2").await.unwrap_err();
    assert!(matches!(err, ClientError::Protected(_)));
    assert!(!dialog.is_open());
}

#[tokio::test]
async fn test_open_create_without_write_permission() {
    let fx = fixture_with(vec![Action::Read]).await;
    let dialog = DialogController::new(Arc::clone(&fx.store));

    let err = dialog.open_create().unwrap_err();
    assert!(matches!(err, ClientError::PermissionDenied(_)));
    assert!(!dialog.is_open());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_second_submit_while_pending_is_ignored() {
    let api = Arc::new(MockApi {
        state: Mutex::new(MockApiState::default()),
        mutation_delay: Some(Duration::from_millis(100)),
    });
    api.state.lock().unwrap().grants = vec![ModuleGrant {
        module: "departments".into(),
        actions: vec![Action::Read, Action::Write],
    }];

    let permissions = PermissionContext::new(
        Arc::clone(&api) as Arc<dyn PermissionsApi>,
        Scope::Org,
    );
    permissions.resolve().await;

    let store = Arc::new(ResourceStore::<Department>::new(
        Arc::clone(&api) as Arc<dyn ResourceApi>,
        permissions,
        Arc::new(RecordingNotifier::default()),
    ));
    let dialog = Arc::new(DialogController::new(Arc::clone(&store)));
    dialog.open_create().unwrap();
    dialog.set_draft(DepartmentDraft {
        name: "Finance".into(),
        code: "FIN".into(),
        is_active: true,
    });

    let first = {
        let dialog = Arc::clone(&dialog);
        tokio::spawn(async move { dialog.submit().await })
    };
    // Give the first submit time to flip the pending flag.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = dialog.submit().await;
    assert_eq!(second, SubmitOutcome::Ignored);

    assert_eq!(first.await.unwrap(), SubmitOutcome::Completed);
    // Only the first submit hit the API.
    assert_eq!(api.calls("POST"), 1);
}

#[tokio::test]
async fn test_system_role_delete_is_blocked() {
    use openhr_admin::Role;

    let api = Arc::new(MockApi::default());
    api.state.lock().unwrap().grants = vec![ModuleGrant {
        module: "roles".into(),
        actions: vec![Action::Read, Action::Write, Action::Update, Action::Delete],
    }];
    api.seed(vec![json!({
        "id": "r1", "name": "Owner", "code": "OWNER",
        "permissions": ["roles:read"], "isSystem": true
    })]);

    let permissions = PermissionContext::new(
        Arc::clone(&api) as Arc<dyn PermissionsApi>,
        Scope::Org,
    );
    permissions.resolve().await;

    let notifier = Arc::new(RecordingNotifier::default());
    let store = ResourceStore::<Role>::new(
        Arc::clone(&api) as Arc<dyn ResourceApi>,
        permissions,
        Arc::clone(&notifier) as Arc<dyn openhr_store::Notifier>,
    );
    store.load().await.unwrap();

    let err = store.delete("r1").await.unwrap_err();
    assert!(matches!(err, ClientError::Protected(_)));
    assert_eq!(api.calls("DELETE"), 0);
    assert_eq!(
        notifier.errors(),
        vec!["System roles cannot be modified or deleted."]
    );
}

// ── View projection ─────────────────────────────────────────────────

#[tokio::test]
async fn test_view_states() {
    // Resolving: context not yet resolved.
    let api = MockApi::with_grants(vec![Action::Read]);
    let permissions = PermissionContext::new(
        Arc::clone(&api) as Arc<dyn PermissionsApi>,
        Scope::Org,
    );
    let store = ResourceStore::<Department>::new(
        Arc::clone(&api) as Arc<dyn ResourceApi>,
        Arc::clone(&permissions),
        Arc::new(RecordingNotifier::default()),
    );
    assert!(matches!(list_state(&store), ListState::Resolving));

    // Loading once resolved but before the first load completes.
    permissions.resolve().await;
    assert!(matches!(list_state(&store), ListState::Loading));

    // Empty when the server has nothing at all.
    store.load().await.unwrap();
    assert!(matches!(list_state(&store), ListState::Empty));
}

#[tokio::test]
async fn test_view_distinguishes_empty_from_no_matches() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    fx.store.apply_filters(Filter::search("zzz"));
    assert!(matches!(list_state(&fx.store), ListState::NoMatches));

    fx.store.apply_filters(Filter::default());
    assert!(matches!(list_state(&fx.store), ListState::Rows(_)));
}

#[tokio::test]
async fn test_view_denied_without_read() {
    let fx = fixture_with(vec![Action::Write]).await;
    assert!(matches!(list_state(&fx.store), ListState::AccessDenied));
}

#[tokio::test]
async fn test_row_affordances_respect_protection() {
    let fx = fixture().await;
    fx.store.load().await.unwrap();

    let ListState::Rows(rows) = list_state(&fx.store) else {
        panic!("expected rows");
    };
    let eng = rows.iter().find(|r| r.record.id == "d1").unwrap();
    assert!(eng.can_edit && eng.can_delete);

    let hr = rows.iter().find(|r| r.record.id == "d2").unwrap();
    assert!(!hr.can_edit && !hr.can_delete);
    assert!(hr.protected.is_some());
}
