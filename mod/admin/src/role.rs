use serde::{Deserialize, Serialize};

use openhr_core::{derive_code, Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    /// `module:action` grants attached to the role.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// System roles ship with the platform and cannot be edited or
    /// deleted from the UI.
    #[serde(default)]
    pub is_system: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDraft {
    pub name: String,
    /// Left empty in the dialog; derived from the name on submit.
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Draft for RoleDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("name", &self.name)
            .min_len("name", &self.name, 3)
            .max_len("description", &self.description, 500);
        if self.permissions.is_empty() {
            rules.fail("permissions", "select at least one permission");
        }
        rules.finish().err().unwrap_or_default()
    }

    /// The code is derived, never typed: uppercase, spaces to
    /// underscores, other non-alphanumerics stripped.
    fn normalized(&self) -> Self {
        let mut draft = self.clone();
        draft.code = derive_code(&draft.name);
        draft
    }
}

impl Resource for Role {
    type Draft = RoleDraft;
    const MODULE: &'static str = "roles";
    const ENDPOINT: &'static str = "roles";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "Role";
    const PLURAL: &'static str = "roles";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.code.clone(), self.description.clone()]
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "isSystem" => Some(self.is_system.to_string()),
            _ => None,
        }
    }

    fn protected(&self) -> Option<String> {
        self.is_system
            .then(|| "System roles cannot be modified or deleted.".to_string())
    }

    fn draft(&self) -> RoleDraft {
        RoleDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            description: self.description.clone(),
            permissions: self.permissions.clone(),
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE", "SYSTEM", "PERMISSIONS"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.code.clone(),
            self.is_system.to_string(),
            self.permissions.len().to_string(),
        ]
    }
}
