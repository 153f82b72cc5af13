use std::sync::{Arc, RwLock};

use openhr_core::{ClientError, Draft, FieldError, Resource};

use crate::notify::Notifier;
use crate::store::ResourceStore;

/// Why a dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit { id: String },
}

/// What a submit attempt did.
///
/// The dialog's whole state machine:
/// closed → open (create|edit) → {completed: closed, failed: open with
/// the API message}. Nothing more exists by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The mutation was confirmed; the dialog closed and the draft is
    /// gone.
    Completed,
    /// Local validation failed. Field errors are recorded, the dialog
    /// stays open, and nothing was sent.
    Invalid,
    /// The store rejected the submit (API failure, permission,
    /// protected record). The dialog stays open with the draft intact.
    Failed,
    /// Nothing to do: the dialog is closed, or a submit is already in
    /// flight.
    Ignored,
}

enum DialogState<D> {
    Closed,
    Open {
        mode: DialogMode,
        draft: D,
        field_errors: Vec<FieldError>,
        message: Option<String>,
        pending: bool,
    },
}

/// Controls one resource's create/edit dialog.
///
/// The draft lives only while the dialog is open: cancel discards it
/// unconditionally, a completed submit discards it after the store
/// refetches, and a failed submit keeps it for the user to correct.
pub struct DialogController<R: Resource> {
    store: Arc<ResourceStore<R>>,
    state: RwLock<DialogState<R::Draft>>,
}

impl<R: Resource> DialogController<R> {
    pub fn new(store: Arc<ResourceStore<R>>) -> Self {
        Self {
            store,
            state: RwLock::new(DialogState::Closed),
        }
    }

    // ── Opening ─────────────────────────────────────────────────────

    /// Open in create mode with an empty draft. Write-gated.
    pub fn open_create(&self) -> Result<(), ClientError> {
        let guard = self.store.guard().unwrap_or_default();
        if !guard.can_write {
            let err = ClientError::PermissionDenied(format!(
                "You do not have permission to create {}.",
                R::PLURAL
            ));
            self.store.notifier().error(&err.to_string());
            return Err(err);
        }

        *self.state.write().unwrap() = DialogState::Open {
            mode: DialogMode::Create,
            draft: R::Draft::default(),
            field_errors: Vec::new(),
            message: None,
            pending: false,
        };
        Ok(())
    }

    /// Open in edit mode. Update-gated, refuses protected records, and
    /// always seeds the draft from a fresh fetch — a previous edit
    /// session's draft never carries over.
    pub async fn open_edit(&self, id: &str) -> Result<(), ClientError> {
        let guard = self.store.guard().unwrap_or_default();
        if !guard.can_update {
            let err = ClientError::PermissionDenied(format!(
                "You do not have permission to update {}.",
                R::PLURAL
            ));
            self.store.notifier().error(&err.to_string());
            return Err(err);
        }

        let record = match self.store.get(id).await {
            Ok(record) => record,
            Err(err) => {
                self.store.notifier().error(&err.to_string());
                return Err(err);
            }
        };

        if let Some(reason) = record.protected() {
            let err = ClientError::Protected(reason);
            self.store.notifier().error(&err.to_string());
            return Err(err);
        }

        *self.state.write().unwrap() = DialogState::Open {
            mode: DialogMode::Edit { id: id.to_string() },
            draft: record.draft(),
            field_errors: Vec::new(),
            message: None,
            pending: false,
        };
        Ok(())
    }

    // ── Editing ─────────────────────────────────────────────────────

    /// Replace the draft (controlled-form binding). Ignored while closed
    /// or while a submit is in flight.
    pub fn set_draft(&self, draft: R::Draft) {
        if let DialogState::Open {
            draft: current,
            pending: false,
            ..
        } = &mut *self.state.write().unwrap()
        {
            *current = draft;
        }
    }

    /// Discard the draft and close, whatever the dialog was doing.
    pub fn cancel(&self) {
        *self.state.write().unwrap() = DialogState::Closed;
    }

    // ── Submit ──────────────────────────────────────────────────────

    /// Validate, then run the store mutation.
    ///
    /// Validation failures never reach the network layer; they stay in
    /// `field_errors` for inline rendering. While the call is in flight
    /// the pending flag blocks a second submit.
    pub async fn submit(&self) -> SubmitOutcome {
        let (mode, draft) = {
            let mut state = self.state.write().unwrap();
            let DialogState::Open {
                mode,
                draft,
                field_errors,
                message,
                pending,
            } = &mut *state
            else {
                return SubmitOutcome::Ignored;
            };
            if *pending {
                return SubmitOutcome::Ignored;
            }

            let errors = draft.validate();
            if !errors.is_empty() {
                *field_errors = errors;
                *message = None;
                return SubmitOutcome::Invalid;
            }

            field_errors.clear();
            *message = None;
            *pending = true;
            (mode.clone(), draft.clone())
        };

        let result = match &mode {
            DialogMode::Create => self.store.create(&draft).await,
            DialogMode::Edit { id } => self.store.update(id, &draft).await,
        };

        let mut state = self.state.write().unwrap();
        match result {
            Ok(()) => {
                *state = DialogState::Closed;
                SubmitOutcome::Completed
            }
            Err(err) => {
                if let DialogState::Open {
                    pending, message, ..
                } = &mut *state
                {
                    *pending = false;
                    *message = Some(err.to_string());
                }
                SubmitOutcome::Failed
            }
        }
    }

    // ── Introspection ───────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        matches!(*self.state.read().unwrap(), DialogState::Open { .. })
    }

    pub fn mode(&self) -> Option<DialogMode> {
        match &*self.state.read().unwrap() {
            DialogState::Closed => None,
            DialogState::Open { mode, .. } => Some(mode.clone()),
        }
    }

    pub fn draft(&self) -> Option<R::Draft> {
        match &*self.state.read().unwrap() {
            DialogState::Closed => None,
            DialogState::Open { draft, .. } => Some(draft.clone()),
        }
    }

    /// Field-scoped validation failures from the last submit attempt.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match &*self.state.read().unwrap() {
            DialogState::Closed => Vec::new(),
            DialogState::Open { field_errors, .. } => field_errors.clone(),
        }
    }

    /// The API failure message from the last submit, if any.
    pub fn error_message(&self) -> Option<String> {
        match &*self.state.read().unwrap() {
            DialogState::Closed => None,
            DialogState::Open { message, .. } => message.clone(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(
            &*self.state.read().unwrap(),
            DialogState::Open { pending: true, .. }
        )
    }
}
