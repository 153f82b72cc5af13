pub mod envelope;
pub mod error;
pub mod filter;
pub mod patch;
pub mod permission;
pub mod resource;
pub mod text;
pub mod validate;

pub use envelope::{ApiEnvelope, ListParams, ListPayload, Pagination};
pub use error::{error_code, ClientError};
pub use filter::Filter;
pub use patch::merge_patch;
pub use permission::{AccessGuard, Action, ModuleGrant, PermissionSet};
pub use resource::{Audit, Column, Draft, Resource, Scope};
pub use text::{derive_code, new_id, now_rfc3339};
pub use validate::{FieldError, FieldRules};
