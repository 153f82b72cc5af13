use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

/// A state/province within a country.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: String,
    pub name: String,
    pub code: String,
    pub country_id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDraft {
    pub name: String,
    pub code: String,
    pub country_id: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Draft for StateDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("name", &self.name)
            .require("code", &self.code)
            .require("countryId", &self.country_id);
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for State {
    type Draft = StateDraft;
    const MODULE: &'static str = "states";
    const ENDPOINT: &'static str = "states";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "State";
    const PLURAL: &'static str = "states";

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
            "countryId" => Some(self.country_id.clone()),
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }

    fn draft(&self) -> StateDraft {
        StateDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            country_id: self.country_id.clone(),
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE", "COUNTRY", "ACTIVE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.code.clone(),
            self.country_id.clone(),
            self.is_active.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_parent_country() {
        let draft = StateDraft {
            name: "Maharashtra".into(),
            code: "MH".into(),
            ..StateDraft::default()
        };
        let errors = draft.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "countryId");
    }
}
