use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Actions a permission set can grant on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Write,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One module's grants as returned by `GET /api/v1/{scope}/permissions/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleGrant {
    pub module: String,
    pub actions: Vec<Action>,
}

/// The resolved permission decisions for the current actor.
///
/// Read-only once built; consumers hold a snapshot and never mutate it.
/// The empty set denies everything, which is also the fail-closed result
/// of a resolution failure.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    grants: HashMap<String, HashSet<Action>>,
}

impl PermissionSet {
    /// The deny-everything set.
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Build from the wire-format grant list.
    pub fn from_grants(grants: Vec<ModuleGrant>) -> Self {
        let mut map: HashMap<String, HashSet<Action>> = HashMap::new();
        for grant in grants {
            map.entry(grant.module).or_default().extend(grant.actions);
        }
        Self { grants: map }
    }

    /// Build from `module:action` strings (e.g. `"roles:delete"`).
    /// Malformed entries are ignored.
    pub fn from_strings<'a>(perms: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map: HashMap<String, HashSet<Action>> = HashMap::new();
        for perm in perms {
            let Some((module, action)) = perm.rsplit_once(':') else {
                continue;
            };
            let action = match action {
                "read" => Action::Read,
                "write" => Action::Write,
                "update" => Action::Update,
                "delete" => Action::Delete,
                _ => continue,
            };
            map.entry(module.to_string()).or_default().insert(action);
        }
        Self { grants: map }
    }

    /// Whether the actor may perform `action` on `module`.
    pub fn allows(&self, module: &str, action: Action) -> bool {
        self.grants
            .get(module)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// The per-action decisions for one module.
    pub fn guard(&self, module: &str) -> AccessGuard {
        AccessGuard {
            can_read: self.allows(module, Action::Read),
            can_write: self.allows(module, Action::Write),
            can_update: self.allows(module, Action::Update),
            can_delete: self.allows(module, Action::Delete),
        }
    }

    /// Module codes with at least one grant, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.grants.keys().map(String::as_str).collect();
        modules.sort_unstable();
        modules
    }
}

/// Per-action access decisions for one module, resolved before any data
/// fetch and before any CRUD control is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessGuard {
    pub can_read: bool,
    pub can_write: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl AccessGuard {
    /// A guard that allows everything. Test fixtures only.
    pub fn allow_all() -> Self {
        Self {
            can_read: true,
            can_write: true,
            can_update: true,
            can_delete: true,
        }
    }

    pub fn can(&self, action: Action) -> bool {
        match action {
            Action::Read => self.can_read,
            Action::Write => self.can_write,
            Action::Update => self.can_update,
            Action::Delete => self.can_delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_denies_everything() {
        let set = PermissionSet::deny_all();
        assert!(!set.allows("countries", Action::Read));
        assert_eq!(set.guard("countries"), AccessGuard::default());
    }

    #[test]
    fn test_grants_resolve_per_action() {
        let set = PermissionSet::from_grants(vec![ModuleGrant {
            module: "cities".into(),
            actions: vec![Action::Read, Action::Write],
        }]);
        let guard = set.guard("cities");
        assert!(guard.can_read);
        assert!(guard.can_write);
        assert!(!guard.can_update);
        assert!(!guard.can_delete);
        // Other modules stay denied.
        assert!(!set.allows("roles", Action::Read));
    }

    #[test]
    fn test_from_strings() {
        let set = PermissionSet::from_strings(["roles:read", "roles:delete", "bogus", "roles:fly"]);
        assert!(set.allows("roles", Action::Read));
        assert!(set.allows("roles", Action::Delete));
        assert!(!set.allows("roles", Action::Write));
    }

    #[test]
    fn test_wire_format_roundtrip() {
        let raw = r#"[{"module":"users","actions":["read","update"]}]"#;
        let grants: Vec<ModuleGrant> = serde_json::from_str(raw).unwrap();
        let set = PermissionSet::from_grants(grants);
        assert!(set.allows("users", Action::Update));
        assert!(!set.allows("users", Action::Delete));
    }
}
