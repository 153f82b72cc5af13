use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

/// Organization classification managed from the super-admin portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationType {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationTypeDraft {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Draft for OrganizationTypeDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules.require("name", &self.name).require("code", &self.code);
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for OrganizationType {
    type Draft = OrganizationTypeDraft;
    const MODULE: &'static str = "organization-types";
    const ENDPOINT: &'static str = "organization-types";
    const SCOPE: Scope = Scope::Admin;
    const SINGULAR: &'static str = "Organization type";
    const PLURAL: &'static str = "organization types";

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

    fn draft(&self) -> OrganizationTypeDraft {
        OrganizationTypeDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE", "ACTIVE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.code.clone(),
            self.is_active.to_string(),
        ]
    }
}
