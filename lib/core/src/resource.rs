//! The resource descriptor: everything the generic store, dialog, and
//! list machinery need to know about one managed resource type.
//!
//! Each concrete resource (country, role, candidate, ...) supplies its
//! wire record, its draft, and this descriptor — never its own copy of
//! fetch/filter/submit logic.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::validate::FieldError;

/// Portal a resource belongs to: the organization portal or the
/// super-admin portal. Determines the API path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Org,
    Admin,
}

impl Scope {
    /// Path segment under `/api/v1/`.
    pub fn as_path(&self) -> &'static str {
        match self {
            Scope::Org => "org",
            Scope::Admin => "admin",
        }
    }
}

/// Audit attributes carried by every record. Owned by the backend; the
/// client never writes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// A table column header for list rendering.
pub type Column = &'static str;

/// A mutable, client-only working copy of a record's fields.
///
/// Exists only while a create/edit dialog is open; discarded on cancel or
/// successful submit. `Default` is the empty draft for create mode.
pub trait Draft:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Run all field rules; the empty list means the draft is valid.
    /// Failures stay local — a draft that fails validation is never
    /// serialized onto the wire.
    fn validate(&self) -> Vec<FieldError>;

    /// The draft as it goes onto the wire. Derived fields (a role's code
    /// from its name) are filled in here, after validation passed.
    fn normalized(&self) -> Self {
        self.clone()
    }
}

/// One managed resource type.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The draft type edited by this resource's CRUD dialog.
    type Draft: Draft;

    /// Permission module code this resource is gated by.
    const MODULE: &'static str;

    /// Path segment under `/api/v1/{scope}/`.
    const ENDPOINT: &'static str;

    /// Portal scope.
    const SCOPE: Scope;

    /// Display names for notifications ("Country created.").
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    /// Server-assigned record id.
    fn id(&self) -> &str;

    /// Name shown in notifications and delete confirmations.
    fn display_name(&self) -> String {
        self.id().to_string()
    }

    /// Field values the free-text search matches against
    /// (case-insensitive substring).
    fn search_text(&self) -> Vec<String>;

    /// Categorical field accessor for exact-match filters
    /// (e.g. `"isActive"` → `"true"`, `"countryId"` → id).
    fn field(&self, _key: &str) -> Option<String> {
        None
    }

    /// `Some(reason)` when the record is protected: the client refuses
    /// update/delete before any request is issued. The backend remains
    /// the authority; this is a UX shortcut only.
    fn protected(&self) -> Option<String> {
        None
    }

    /// Seed a draft from this record for edit mode.
    fn draft(&self) -> Self::Draft;

    /// Table columns for list rendering.
    fn columns() -> &'static [Column];

    /// This record's cells, aligned with `columns()`.
    fn row(&self) -> Vec<String>;

    /// Full collection path: `/api/v1/{scope}/{endpoint}`.
    fn collection_path() -> String {
        format!("/api/v1/{}/{}", Self::SCOPE.as_path(), Self::ENDPOINT)
    }

    /// Single-record path: `/api/v1/{scope}/{endpoint}/{id}`.
    fn record_path(id: &str) -> String {
        format!("/api/v1/{}/{}/{}", Self::SCOPE.as_path(), Self::ENDPOINT, id)
    }
}
