/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Get the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Derive a stable code from a display name: uppercase, spaces become
/// underscores, every other non-alphanumeric character is stripped.
///
/// `"HR Manager"` → `"HR_MANAGER"`.
pub fn derive_code(name: &str) -> String {
    let mut code = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            code.push(ch.to_ascii_uppercase());
        } else if ch.is_whitespace() && !code.ends_with('_') && !code.is_empty() {
            code.push('_');
        }
    }
    while code.ends_with('_') {
        code.pop();
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
    }

    #[test]
    fn test_now_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'));
    }

    #[test]
    fn test_derive_code_basic() {
        assert_eq!(derive_code("HR Manager"), "HR_MANAGER");
        assert_eq!(derive_code("blood group"), "BLOOD_GROUP");
    }

    #[test]
    fn test_derive_code_strips_non_alphanumerics() {
        assert_eq!(derive_code("Sr. Engineer (L2)"), "SR_ENGINEER_L2");
        assert_eq!(derive_code("a-b"), "AB");
    }

    #[test]
    fn test_derive_code_collapses_spaces() {
        assert_eq!(derive_code("  HR   Manager  "), "HR_MANAGER");
        assert_eq!(derive_code(""), "");
        assert_eq!(derive_code("   "), "");
    }
}
