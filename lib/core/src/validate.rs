//! Field-level validation for CRUD drafts.
//!
//! Runs entirely client-side, before any request is built. All rules are
//! checked and all failures collected — validation never stops at the
//! first error.

use serde::{Deserialize, Serialize};

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Flatten a failure list into a one-line message for notifications.
pub fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error-collecting rule runner for one draft.
///
/// ```
/// use openhr_core::validate::FieldRules;
///
/// let mut rules = FieldRules::new();
/// rules.require("name", "  ");
/// rules.email("email", "not-an-address");
/// assert_eq!(rules.finish().unwrap_err().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct FieldRules {
    errors: Vec<FieldError>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed value must be non-empty.
    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "is required"));
        }
        self
    }

    /// Value must look like an email address. Empty values pass — combine
    /// with `require` when the field is mandatory.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.is_empty() && !is_email(value) {
            self.errors
                .push(FieldError::new(field, "must be a valid email address"));
        }
        self
    }

    /// Trimmed length must be at least `min`. Empty values pass.
    pub fn min_len(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len > 0 && len < min {
            self.errors.push(FieldError::new(
                field,
                format!("must be at least {} characters", min),
            ));
        }
        self
    }

    /// Length must not exceed `max` characters.
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors.push(FieldError::new(
                field,
                format!("must be at most {} characters", max),
            ));
        }
        self
    }

    /// Value must fall inside the inclusive range.
    pub fn range_i64(&mut self, field: &str, value: i64, min: i64, max: i64) -> &mut Self {
        if value < min || value > max {
            self.errors.push(FieldError::new(
                field,
                format!("must be between {} and {}", min, max),
            ));
        }
        self
    }

    /// Value must be at least `min`.
    pub fn at_least_f64(&mut self, field: &str, value: f64, min: f64) -> &mut Self {
        if value < min {
            self.errors
                .push(FieldError::new(field, format!("must be at least {}", min)));
        }
        self
    }

    /// Push a custom failure.
    pub fn fail(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// All failures collected so far; `Ok(())` when the draft is valid.
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain
/// with a non-empty TLD, no whitespace.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
