use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role_id: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Draft for UserDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("name", &self.name)
            .require("email", &self.email)
            .email("email", &self.email)
            .require("roleId", &self.role_id);
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for User {
    type Draft = UserDraft;
    const MODULE: &'static str = "users";
    const ENDPOINT: &'static str = "users";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "User";
    const PLURAL: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone()]
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "roleId" => Some(self.role_id.clone()),
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }

    fn protected(&self) -> Option<String> {
        self.is_super_admin
            .then(|| "Super admin accounts cannot be modified or deleted.".to_string())
    }

    fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            role_id: self.role_id.clone(),
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "EMAIL", "ROLE", "ACTIVE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role_id.clone(),
            self.is_active.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validates_email_format() {
        let draft = UserDraft {
            name: "Asha Rao".into(),
            email: "asha-at-acme".into(),
            role_id: "r1".into(),
            is_active: true,
        };
        let errors = draft.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");

        let draft = UserDraft {
            email: "asha@acme.test".into(),
            ..draft
        };
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_super_admin_is_protected() {
        let user = User {
            id: "u1".into(),
            name: "Root".into(),
            email: "root@openhr.test".into(),
            role_id: "r0".into(),
            is_active: true,
            is_super_admin: true,
            audit: Audit::default(),
        };
        assert!(user.protected().is_some());
    }
}
