use serde::{Deserialize, Serialize};

use openhr_core::{Audit, Column, Draft, FieldError, FieldRules, Resource, Scope};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub state_id: String,
    pub country_id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDraft {
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub state_id: String,
    pub country_id: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Draft for CityDraft {
    fn validate(&self) -> Vec<FieldError> {
        let mut rules = FieldRules::new();
        rules
            .require("name", &self.name)
            .require("stateId", &self.state_id)
            .require("countryId", &self.country_id);
        rules.finish().err().unwrap_or_default()
    }
}

impl Resource for City {
    type Draft = CityDraft;
    const MODULE: &'static str = "cities";
    const ENDPOINT: &'static str = "cities";
    const SCOPE: Scope = Scope::Org;
    const SINGULAR: &'static str = "City";
    const PLURAL: &'static str = "cities";

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
            "stateId" => Some(self.state_id.clone()),
            "countryId" => Some(self.country_id.clone()),
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }

    fn draft(&self) -> CityDraft {
        CityDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            state_id: self.state_id.clone(),
            country_id: self.country_id.clone(),
            is_active: self.is_active,
        }
    }

    fn columns() -> &'static [Column] {
        &["ID", "NAME", "CODE", "STATE", "ACTIVE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.code.clone(),
            self.state_id.clone(),
            self.is_active.to_string(),
        ]
    }
}
