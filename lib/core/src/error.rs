use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these —
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const PROTECTED_RECORD: &str = "PROTECTED_RECORD";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const API_ERROR: &str = "API_ERROR";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const PENDING: &str = "PENDING";
}

// ── ClientError ─────────────────────────────────────────────────────

/// Unified error type for the client stack.
///
/// The variants follow the failure taxonomy of the platform: local
/// validation, permission denial resolved before any request, protected
/// records rejected client-side, and transport/application failures from
/// the API itself.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Field-level validation failed locally; the request was never sent.
    #[error("{0}")]
    Validation(String),

    /// The permission set denies this action; the request was never sent.
    #[error("{0}")]
    PermissionDenied(String),

    /// The record is protected (system role, super-admin user); the
    /// request was never sent.
    #[error("{0}")]
    Protected(String),

    /// Missing/expired credentials, and the one refresh-and-retry did not
    /// recover. HTTP 401.
    #[error("{0}")]
    Unauthorized(String),

    /// The server refused the request outright. HTTP 403.
    #[error("{0}")]
    Forbidden(String),

    /// The API reported failure: `success: false` or a non-2xx status.
    #[error("{0}")]
    Api(String),

    /// Transport-level failure: connect, timeout, malformed body.
    #[error("{0}")]
    Network(String),

    /// Another mutation is already in flight for this store.
    #[error("{0}")]
    Pending(String),
}

impl ClientError {
    /// Stable, machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => error_code::VALIDATION_FAILED,
            ClientError::PermissionDenied(_) => error_code::PERMISSION_DENIED,
            ClientError::Protected(_) => error_code::PROTECTED_RECORD,
            ClientError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            ClientError::Forbidden(_) => error_code::PERMISSION_DENIED,
            ClientError::Api(_) => error_code::API_ERROR,
            ClientError::Network(_) => error_code::NETWORK_ERROR,
            ClientError::Pending(_) => error_code::PENDING,
        }
    }

    /// True for failures that never left the client (validation,
    /// permission, protected-record, pending). Used by tests to assert the
    /// network layer stayed untouched.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_)
                | ClientError::PermissionDenied(_)
                | ClientError::Protected(_)
                | ClientError::Pending(_)
        )
    }
}
